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

//! Defines the error hierarchy for the scheduling engine.
//!
//! None of these errors are retried; all of them are fatal to the running
//! loop. Diagnostics that are merely informative (backend fallback, stop
//! completion) are logged, never raised.

use std::fmt;

/// A fatal error reported by the engine or one of its subsystems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The engine was asked to do something its configuration or current
    /// state does not allow (unknown mode name, non-positive target
    /// interval, start while already running). Raised synchronously to the
    /// caller before any state changes.
    Configuration(String),
    /// The graphics backend reported an unexpected condition during a logic
    /// step. Triggers an immediate forced stop before propagating.
    Backend(String),
    /// A draw-step operation (clear/present) failed. Routed through the
    /// same forced-stop path as [`EngineError::Backend`].
    RenderFailure(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Configuration(msg) => {
                write!(f, "Invalid engine configuration: {msg}")
            }
            EngineError::Backend(msg) => {
                write!(f, "Unexpected graphics backend error, engine halted: {msg}")
            }
            EngineError::RenderFailure(msg) => {
                write!(f, "Render operation failed: {msg}")
            }
        }
    }
}

impl std::error::Error for EngineError {}
