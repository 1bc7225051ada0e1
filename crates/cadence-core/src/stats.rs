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

//! Smoothed performance statistics for the running engine.

/// Fixed slack added to a target interval before a measured step time
/// counts as "poor", in milliseconds.
pub const TIME_MARGIN_MS: f64 = 3.0;

/// Last-measured step times and smoothed rates, overwritten by the loop
/// after each completed step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineStats {
    /// Elapsed time between the two most recent draw steps, in ms.
    pub current_frametime_ms: f64,
    /// Elapsed time between the two most recent logic steps, in ms.
    pub current_logictime_ms: f64,
    /// Wall time of the most recent full loop iteration, in ms.
    pub current_total_loop_ms: f64,
    /// Rolling-average frames per second.
    pub fps: f64,
    /// Rolling-average ticks per second.
    pub tps: f64,
}

impl EngineStats {
    /// True when the last frame took longer than the target interval plus
    /// the fixed margin. False at exact equality.
    pub fn poor_framerate(&self, target_frame_interval_ms: f64) -> bool {
        self.current_frametime_ms > target_frame_interval_ms + TIME_MARGIN_MS
    }

    /// True when the last logic step took longer than the target interval
    /// plus the fixed margin. False at exact equality.
    pub fn poor_logicrate(&self, target_logic_interval_ms: f64) -> bool {
        self.current_logictime_ms > target_logic_interval_ms + TIME_MARGIN_MS
    }
}
