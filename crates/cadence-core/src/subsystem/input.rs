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

/// Window and device notifications the scheduler reacts to.
///
/// Anything else the event pump produces (keys, pointer, gamepads) is the
/// input subsystem's own business and never reaches the scheduling core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The user asked to close the window.
    WindowClose,
    /// The window regained focus; context-loss-prone backends must rebuild
    /// textures.
    FocusGained,
    /// The render device was reset; textures must be rebuilt regardless of
    /// backend.
    RenderDeviceReset,
}

/// The contract for the input/event-pump subsystem.
pub trait InputSource: Send {
    /// Initializes the event pump. Called exactly once per engine lifetime,
    /// lazily on first logic-loop entry.
    fn init(&mut self) -> Result<(), EngineError>;

    /// Drains pending events. Called at the start of every logic step,
    /// including while logic is paused. The scheduler dispatches the
    /// returned events synchronously, in order, before the step continues.
    fn poll_events(&mut self) -> Vec<InputEvent>;
}
