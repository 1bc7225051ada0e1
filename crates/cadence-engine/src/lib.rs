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

//! `cadence-engine` — the real-time scheduling core.
//!
//! Decouples a fixed-rate logic update from an independently paced draw
//! update, manages the worker thread(s) that drive both, tracks smoothed
//! performance statistics, and recovers graphics state after context loss.
//! Collaborating subsystems (graphics, audio, input, resources) are
//! consumed through the contracts in [`cadence_core::subsystem`].

pub mod scheduler;

pub use scheduler::{
    EngineEvent, EngineMode, EngineState, RenderRecoveryPolicy, Scheduler, Subsystems, ThreadRole,
};
