//! Validated ray parameters for fixed-step marching.

use glam::Vec3;
use quarry_voxel::{CoordError, check_finite};
use thiserror::Error;

/// Upper bound on samples per cast. Keeps a tiny step with a long reach from
/// stalling a frame.
pub const MAX_RAY_STEPS: u32 = 1 << 20;

/// Errors from [`Ray::new`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum RayError {
    #[error("ray origin is invalid: {0}")]
    Origin(CoordError),
    #[error("ray direction is invalid: {0}")]
    Direction(CoordError),
    #[error("ray direction has zero length")]
    ZeroDirection,
    #[error("step length must be positive and finite, got {0}")]
    StepLength(f32),
    #[error("max distance must be non-negative and finite, got {0}")]
    MaxDistance(f32),
    #[error("ray would need {0} steps, more than the limit of {MAX_RAY_STEPS}")]
    TooManySteps(f64),
}

/// A ray marched in fixed steps of `look * step_length`.
///
/// The look vector is not renormalized: the step's length is the look
/// vector's own length times `step_length`, and the travelled distance
/// accumulates by that amount each sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    origin: Vec3,
    step: Vec3,
    max_distance: f32,
}

impl Ray {
    /// Builds a ray, rejecting non-finite input and degenerate steps.
    pub fn new(origin: Vec3, look: Vec3, step_length: f32, max_distance: f32) -> Result<Self, RayError> {
        let origin = check_finite(origin).map_err(RayError::Origin)?;
        let look = check_finite(look).map_err(RayError::Direction)?;
        if look.length_squared() == 0.0 {
            return Err(RayError::ZeroDirection);
        }
        if !(step_length.is_finite() && step_length > 0.0) {
            return Err(RayError::StepLength(step_length));
        }
        if !(max_distance.is_finite() && max_distance >= 0.0) {
            return Err(RayError::MaxDistance(max_distance));
        }
        let step = look * step_length;
        let steps = f64::from(max_distance) / f64::from(step.length());
        if !steps.is_finite() || steps > f64::from(MAX_RAY_STEPS) {
            return Err(RayError::TooManySteps(steps));
        }
        Ok(Self {
            origin,
            step,
            max_distance,
        })
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Displacement between consecutive samples.
    pub fn step(&self) -> Vec3 {
        self.step
    }

    /// Distance credited per sample.
    pub fn step_length(&self) -> f32 {
        self.step.length()
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Number of samples taken before the travelled distance reaches the
    /// maximum.
    pub fn sample_count(&self) -> u32 {
        (self.max_distance / self.step_length()).ceil() as u32
    }

    /// Position of sample `i`.
    pub fn sample(&self, i: u32) -> Vec3 {
        self.origin + self.step * i as f32
    }
}
