//! First-person look state for the session.

use glam::{Vec2, Vec3};

/// Pitch stays short of straight up or down so the look vector never loses
/// its heading.
const PITCH_LIMIT_DEGREES: f32 = 89.0;

/// A stationary camera with a yaw/pitch heading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    yaw_degrees: f32,
    pitch_degrees: f32,
}

impl Camera {
    pub fn new(position: Vec3, yaw_degrees: f32, pitch_degrees: f32) -> Self {
        Self {
            position,
            yaw_degrees: yaw_degrees.rem_euclid(360.0),
            pitch_degrees: pitch_degrees.clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES),
        }
    }

    pub fn yaw_degrees(&self) -> f32 {
        self.yaw_degrees
    }

    pub fn pitch_degrees(&self) -> f32 {
        self.pitch_degrees
    }

    /// Applies a look delta in degrees: `x` turns, `y` tilts up.
    pub fn turn(&mut self, delta: Vec2) {
        if !delta.is_finite() {
            return;
        }
        self.yaw_degrees = (self.yaw_degrees + delta.x).rem_euclid(360.0);
        self.pitch_degrees =
            (self.pitch_degrees + delta.y).clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
    }

    /// Unit look vector. Yaw 0 faces +X, yaw 90 faces +Z.
    pub fn look(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw_degrees.to_radians().sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch_degrees.to_radians().sin_cos();
        Vec3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw)
    }
}
