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

//! Generic, decoupled primitives for cross-thread communication.
//!
//! The primary component is [`EventBus`], a thread-safe MPSC channel kept
//! generic so higher-level crates can define their own payload types. The
//! engine uses it as the fault channel: errors raised inside a worker
//! thread cross to the owning thread here instead of unwinding the worker.

mod bus;

pub use self::bus::EventBus;
