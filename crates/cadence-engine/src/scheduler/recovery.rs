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

/// Lazy one-shot texture-rebuild policy for the draw loop.
///
/// Context-loss-prone backends need an initial texture rebuild shortly
/// after window creation even when no focus/device-reset event ever fires.
/// Rather than rebuilding every frame, the draw loop counts its calls and
/// fires a single rebuild once the count passes a threshold derived from
/// the target frame rate (about a tenth of a second of frames).
///
/// Event-driven rebuilds (focus gained, device reset) bypass this policy
/// entirely; they act immediately and do not consult the counter.
#[derive(Debug, Default)]
pub struct RenderRecoveryPolicy {
    rebuilt_since_event: bool,
    calls_since_event: u32,
}

impl RenderRecoveryPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw-call count after which the one-shot rebuild fires. Never less
    /// than 1, even if the configured rate is mutated to a degenerate value
    /// mid-run.
    pub fn rebuild_threshold(target_frame_rate: f64) -> u32 {
        if !target_frame_rate.is_finite() || target_frame_rate <= 0.0 {
            return 1;
        }
        (target_frame_rate / 10.0).ceil() as u32
    }

    /// Records one draw-step call. Returns true exactly once per session,
    /// when the call count first exceeds the threshold.
    pub fn note_draw_call(&mut self, target_frame_rate: f64) -> bool {
        if self.rebuilt_since_event {
            return false;
        }
        if self.calls_since_event > Self::rebuild_threshold(target_frame_rate) {
            self.rebuilt_since_event = true;
            true
        } else {
            self.calls_since_event += 1;
            false
        }
    }

    /// Whether the one-shot rebuild has already fired.
    pub fn rebuilt(&self) -> bool {
        self.rebuilt_since_event
    }
}
