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

//! The contracts the scheduler drives its collaborators through.
//!
//! Audio playback, graphics driver management, resource storage, and input
//! polling are external to the scheduling core; the engine consumes them
//! only through the narrow lifecycle and action traits defined here. Any
//! backend (SDL, winit + wgpu, a test double) can implement these to run
//! under the scheduler.

mod audio;
mod backend;
mod graphics;
mod input;
mod resources;

pub use self::audio::AudioSystem;
pub use self::backend::{Color, RenderTargetHandle, VideoBackend, WindowHandle};
pub use self::graphics::GraphicsBackend;
pub use self::input::{InputEvent, InputSource};
pub use self::resources::ResourceStore;
