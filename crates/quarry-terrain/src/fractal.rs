//! Multi-octave OpenSimplex field normalized to `[-1, 1]`.
//!
//! With a single octave this is plain OpenSimplex noise, which is what the
//! column rule was tuned for. More octaves add finer detail on top while
//! keeping the output range fixed.

use noise::{NoiseFn, OpenSimplex};
use quarry_voxel::NoiseField;

/// Configuration for the terrain noise field.
#[derive(Clone, Debug, PartialEq)]
pub struct FractalParams {
    /// Seed handed to the underlying simplex generator.
    pub seed: u32,
    /// Number of octaves to composite. `1` gives plain simplex noise.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 1,
            lacunarity: 2.0,
            persistence: 0.5,
        }
    }
}

/// Fractal Brownian motion over OpenSimplex noise.
///
/// Each octave doubles in frequency and halves in amplitude (with the default
/// parameters). The sum is divided by the geometric amplitude total so the
/// result stays inside `[-1, 1]`.
pub struct FractalField {
    noise: OpenSimplex,
    params: FractalParams,
    max_amplitude: f64,
}

impl FractalField {
    /// Create a new field. Zero octaves are treated as one.
    pub fn new(mut params: FractalParams) -> Self {
        params.octaves = params.octaves.max(1);
        let noise = OpenSimplex::new(params.seed);
        let max_amplitude = geometric_sum(params.octaves, params.persistence);
        Self {
            noise,
            params,
            max_amplitude,
        }
    }

    /// Sum of all octave amplitudes, with the first octave at 1.
    pub fn max_amplitude(&self) -> f64 {
        self.max_amplitude
    }

    pub fn params(&self) -> &FractalParams {
        &self.params
    }

    fn raw(&self, x: f64, z: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        for _ in 0..self.params.octaves {
            total += self.noise.get([x * frequency, z * frequency]) * amplitude;
            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }
        total
    }
}

impl NoiseField for FractalField {
    fn sample(&self, x: f64, z: f64) -> f64 {
        if self.max_amplitude <= 0.0 {
            return 0.0;
        }
        (self.raw(x, z) / self.max_amplitude).clamp(-1.0, 1.0)
    }
}

fn geometric_sum(octaves: u32, persistence: f64) -> f64 {
    let mut sum = 0.0;
    let mut amp = 1.0;
    for _ in 0..octaves {
        sum += amp;
        amp *= persistence;
    }
    sum
}
