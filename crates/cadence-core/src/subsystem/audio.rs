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

/// The lifecycle contract for the audio subsystem.
///
/// Playback and mixing are internal to the implementation; the scheduler
/// only initializes it alongside the other logic-side subsystems.
pub trait AudioSystem: Send {
    /// Initializes audio. Called exactly once per engine lifetime, lazily
    /// on first logic-loop entry.
    fn init(&mut self) -> Result<(), EngineError>;
}
