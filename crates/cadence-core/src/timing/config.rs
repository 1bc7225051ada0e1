// Copyright 2026 cadence developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Timing configuration for the scheduling loops.
///
/// A pure value object: the derived step intervals are recomputed on every
/// read, never cached, so changing a target rate mid-run takes effect on the
/// next loop iteration. Construction performs no validation; the scheduler
/// calls [`TimingConfig::validate`] at start and treats a degenerate
/// interval as a configuration error instead of recovering silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Logic updates per second (Hz, must be > 0 to be valid).
    pub target_tick_rate: f64,
    /// Draw updates per second (Hz, must be > 0 to be valid).
    pub target_frame_rate: f64,
    /// Signed calibration offset added to the derived logic interval.
    pub tick_offset_ms: f64,
    /// Signed calibration offset added to the derived frame interval.
    pub frame_offset_ms: f64,
    /// When false the draw step bypasses its interval check entirely.
    pub frame_limiter_enabled: bool,
    /// Title for the window the graphics backend creates.
    pub window_title: String,
}

impl TimingConfig {
    /// Target interval between logic steps, in milliseconds.
    pub fn target_logic_interval_ms(&self) -> f64 {
        1000.0 / self.target_tick_rate + self.tick_offset_ms
    }

    /// Target interval between draw steps, in milliseconds.
    pub fn target_frame_interval_ms(&self) -> f64 {
        1000.0 / self.target_frame_rate + self.frame_offset_ms
    }

    /// Checks that both derived intervals are positive and finite.
    pub fn validate(&self) -> Result<(), EngineError> {
        let logic = self.target_logic_interval_ms();
        let frame = self.target_frame_interval_ms();
        if !logic.is_finite() || logic <= 0.0 {
            return Err(EngineError::Configuration(format!(
                "target logic interval must be positive, got {logic} ms \
                 (tick rate {} Hz, offset {} ms)",
                self.target_tick_rate, self.tick_offset_ms
            )));
        }
        if !frame.is_finite() || frame <= 0.0 {
            return Err(EngineError::Configuration(format!(
                "target frame interval must be positive, got {frame} ms \
                 (frame rate {} Hz, offset {} ms)",
                self.target_frame_rate, self.frame_offset_ms
            )));
        }
        Ok(())
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            target_tick_rate: 64.0,
            target_frame_rate: 60.0,
            // Calibration values carried over from tuning against real
            // hardware; adjust to trim game speed / frame pacing.
            tick_offset_ms: -0.15,
            frame_offset_ms: -0.02,
            frame_limiter_enabled: true,
            window_title: "Cadence".to_string(),
        }
    }
}
