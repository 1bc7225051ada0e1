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

//! Timing primitives for the scheduling loops.
//!
//! * [`Stopwatch`]: a restartable monotonic timer, the elapsed-time
//!   accumulator both loops measure against
//! * [`RollingAverage`]: a fixed-capacity circular sample buffer producing a
//!   smoothed mean of recent per-step rates
//! * [`TimingConfig`]: target tick/frame rates, calibration offsets, and the
//!   derived step intervals

mod config;
mod rolling_average;
mod stopwatch;

pub use self::config::TimingConfig;
pub use self::rolling_average::RollingAverage;
pub use self::stopwatch::Stopwatch;
