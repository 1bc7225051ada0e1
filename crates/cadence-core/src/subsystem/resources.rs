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
use crate::subsystem::backend::RenderTargetHandle;

/// The contract for the texture/resource storage subsystem.
pub trait ResourceStore: Send {
    /// Hands the store the active render target once `start` has observed
    /// its creation. Textures are uploaded against this target.
    fn attach_render_target(&mut self, target: RenderTargetHandle) -> Result<(), EngineError>;

    /// Re-uploads GPU-resident textures after a context event. Invoked by
    /// the recovery policy; must be safe to call repeatedly.
    fn rebuild_textures(&mut self);

    /// Releases stored resources during engine teardown.
    fn quit(&mut self);
}
