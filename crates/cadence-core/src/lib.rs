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

//! `cadence-core` — foundational crate for the Cadence scheduling engine.
//!
//! This crate holds everything the scheduler builds on but that carries no
//! lifecycle of its own:
//!
//! * [`timing`]: monotonic stopwatches, rolling sample averages, and the
//!   tick/frame timing configuration
//! * [`stats`]: smoothed performance statistics and poor-rate predicates
//! * [`error`]: the engine error hierarchy
//! * [`event`]: a generic thread-safe event channel
//! * [`subsystem`]: the contracts the scheduler drives its collaborators
//!   (graphics, audio, input, resources) through
//!
//! Higher-level crates (`cadence-engine`) provide the scheduler itself.

pub mod error;
pub mod event;
pub mod stats;
pub mod subsystem;
pub mod timing;

pub use error::EngineError;
pub use event::EventBus;
pub use stats::EngineStats;
pub use timing::{RollingAverage, Stopwatch, TimingConfig};
