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

/// Events the engine raises to the embedding application.
///
/// Handlers run synchronously on the loop thread that polled the
/// triggering input event, so ordering relative to the step is
/// deterministic. A handler must not call back into blocking scheduler
/// operations (`stop`); it should signal the owning thread instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// A close request arrived while closes were allowed and the engine was
    /// not configured to handle them itself.
    WindowClose,
}

pub(crate) type EngineEventHandler = Box<dyn Fn(EngineEvent) + Send + Sync>;
