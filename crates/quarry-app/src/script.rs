//! Scripted input standing in for a real pointer and buttons.

use glam::Vec2;
use quarry_input::FrameInput;

/// Produces a steady yaw sweep and alternating remove/add clicks.
///
/// Every `click_period` steps one button is pressed for a single step:
/// remove first, then add, then remove again.
#[derive(Clone, Debug)]
pub struct ScriptedInput {
    turn_rate_degrees: f32,
    click_period: u32,
    step: u64,
}

impl ScriptedInput {
    pub fn new(turn_rate_degrees: f32, click_period: u32) -> Self {
        Self {
            turn_rate_degrees,
            click_period,
            step: 0,
        }
    }

    /// Input for the next simulation step of `dt` seconds.
    pub fn next_input(&mut self, dt: f64) -> FrameInput {
        let mut input = FrameInput {
            look_delta: Vec2::new(self.turn_rate_degrees * dt as f32, 0.0),
            ..FrameInput::default()
        };
        let period = u64::from(self.click_period);
        if period > 0 && self.step % period == period - 1 {
            if (self.step / period) % 2 == 0 {
                input.primary = true;
            } else {
                input.secondary = true;
            }
        }
        self.step += 1;
        input
    }
}
