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
use crate::subsystem::backend::{Color, RenderTargetHandle, WindowHandle};

/// The abstract contract for the graphics subsystem.
///
/// The scheduler drives this during graphics initialization, every draw
/// step, and teardown. Implementations own the actual driver state; the
/// engine holds only the opaque window/render-target handles it is given.
pub trait GraphicsBackend: Send {
    /// Initializes the underlying graphics driver. Called exactly once per
    /// engine lifetime, lazily on first draw-loop entry.
    fn init(&mut self) -> Result<(), EngineError>;

    /// Driver names of the backends available on this system.
    fn available_backends(&self) -> Vec<String>;

    /// Creates the window the render target presents into.
    fn create_window(
        &mut self,
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<WindowHandle, EngineError>;

    /// Creates the active render target for the window.
    fn create_render_target(&mut self) -> Result<RenderTargetHandle, EngineError>;

    /// Sets the color `render_clear` fills with.
    fn set_clear_color(&mut self, color: Color);

    /// Clears the render target at the start of a draw step.
    fn render_clear(&mut self) -> Result<(), EngineError>;

    /// Presents the render target at the end of a draw step.
    fn render_present(&mut self) -> Result<(), EngineError>;

    /// Returns and clears the backend's pending error condition, if any.
    /// Polled once per logic step; a reported condition is fatal.
    fn take_backend_error(&mut self) -> Option<String>;

    /// Releases the render target. Only stop paths call this.
    fn destroy_render_target(&mut self);

    /// Releases the window. Only stop paths call this.
    fn destroy_window(&mut self);

    /// Terminates the graphics driver. Terminal; nothing is driven after.
    fn shutdown(&mut self);
}
