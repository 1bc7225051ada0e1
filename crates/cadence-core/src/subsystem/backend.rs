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

use std::fmt;

/// Identifier of a rendering backend the engine can be asked to use.
///
/// Selection is by driver name against the backends the graphics subsystem
/// enumerates; an unavailable request falls back to [`VideoBackend::Software`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoBackend {
    /// Let the graphics subsystem pick. Always considered available.
    Auto,
    Direct3d,
    OpenGl,
    OpenGlEs,
    OpenGlEs2,
    Metal,
    /// The fallback when a requested backend is unavailable.
    Software,
}

impl VideoBackend {
    /// The driver name used to match against enumerated backends.
    pub fn name(&self) -> &'static str {
        match self {
            VideoBackend::Auto => "auto",
            VideoBackend::Direct3d => "direct3d",
            VideoBackend::OpenGl => "opengl",
            VideoBackend::OpenGlEs => "opengles",
            VideoBackend::OpenGlEs2 => "opengles2",
            VideoBackend::Metal => "metal",
            VideoBackend::Software => "software",
        }
    }

    /// Backends that drop GPU-resident textures on focus changes and need
    /// the render-recovery rebuild treatment.
    pub fn is_context_loss_prone(&self) -> bool {
        matches!(
            self,
            VideoBackend::OpenGl | VideoBackend::OpenGlEs | VideoBackend::OpenGlEs2
        )
    }
}

impl fmt::Display for VideoBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opaque handle to the window created by the graphics subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub u64);

/// Opaque handle to the active render target.
///
/// Created once by the graphics-initializing path, then treated as a
/// read-only shared handle by the step functions until teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTargetHandle(pub u64);

/// An RGBA8 color, used for the default clear color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names_match_driver_strings() {
        assert_eq!(VideoBackend::Auto.name(), "auto");
        assert_eq!(VideoBackend::Direct3d.name(), "direct3d");
        assert_eq!(VideoBackend::OpenGl.name(), "opengl");
        assert_eq!(VideoBackend::OpenGlEs.name(), "opengles");
        assert_eq!(VideoBackend::OpenGlEs2.name(), "opengles2");
        assert_eq!(VideoBackend::Metal.name(), "metal");
        assert_eq!(VideoBackend::Software.name(), "software");
        assert_eq!(format!("{}", VideoBackend::OpenGl), "opengl");
    }

    #[test]
    fn only_the_opengl_family_is_context_loss_prone() {
        assert!(VideoBackend::OpenGl.is_context_loss_prone());
        assert!(VideoBackend::OpenGlEs.is_context_loss_prone());
        assert!(VideoBackend::OpenGlEs2.is_context_loss_prone());
        assert!(!VideoBackend::Direct3d.is_context_loss_prone());
        assert!(!VideoBackend::Metal.is_context_loss_prone());
        assert!(!VideoBackend::Software.is_context_loss_prone());
        assert!(!VideoBackend::Auto.is_context_loss_prone());
    }

    #[test]
    fn rgb_constructor_is_opaque() {
        let c = Color::rgb(120, 180, 230);
        assert_eq!(c.a, 255);
        assert_eq!(c, Color::rgba(120, 180, 230, 255));
    }
}
