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

//! Lifecycle state for the scheduler.
//!
//! One explicit [`EngineState`] enum replaces the started/stopping/forced
//! flag combinations, and a fixed [`ThreadRole`]-keyed set of completion
//! flags tracks per-thread loop exit, so invalid flag combinations cannot
//! be represented.

use super::lock;
use cadence_core::EngineError;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// How the scheduler drives its steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMode {
    /// One worker thread interleaving logic and draw steps on independent
    /// timers.
    Synchronous,
    /// Two worker threads, one per step type, with no shared timer.
    Asynchronous,
}

impl FromStr for EngineMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sync" | "synchronous" => Ok(EngineMode::Synchronous),
            "async" | "asynchronous" => Ok(EngineMode::Asynchronous),
            other => Err(EngineError::Configuration(format!(
                "unknown engine mode '{other}'"
            ))),
        }
    }
}

/// The scheduler's lifecycle state. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    NotStarted,
    RunningSync,
    RunningAsync,
    /// Stop requested; waiting for loop threads to finish their in-flight
    /// step and signal completion.
    StoppingGraceful,
    /// Stop requested; resources will be released after a fixed grace
    /// period without awaiting the loop threads.
    StoppingForced,
    Stopped,
}

/// Identity of a loop thread, keying its completion flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadRole {
    /// The single thread of synchronous mode.
    Sync,
    /// The logic thread of asynchronous mode.
    AsyncLogic,
    /// The draw thread of asynchronous mode.
    AsyncDraw,
}

/// Fixed map from thread role to its loop-exited flag.
#[derive(Debug, Default)]
pub(crate) struct CompletionFlags {
    sync: AtomicBool,
    async_logic: AtomicBool,
    async_draw: AtomicBool,
}

impl CompletionFlags {
    fn flag(&self, role: ThreadRole) -> &AtomicBool {
        match role {
            ThreadRole::Sync => &self.sync,
            ThreadRole::AsyncLogic => &self.async_logic,
            ThreadRole::AsyncDraw => &self.async_draw,
        }
    }

    /// Signals that the thread with `role` has exited its loop.
    pub fn mark(&self, role: ThreadRole) {
        self.flag(role).store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self, role: ThreadRole) -> bool {
        self.flag(role).load(Ordering::SeqCst)
    }

    /// True once every thread the given mode runs has signaled completion.
    pub fn all_for(&self, mode: EngineMode) -> bool {
        match mode {
            EngineMode::Synchronous => self.is_set(ThreadRole::Sync),
            EngineMode::Asynchronous => {
                self.is_set(ThreadRole::AsyncLogic) && self.is_set(ThreadRole::AsyncDraw)
            }
        }
    }
}

/// Shared lifecycle cell: the state machine plus the coordination and
/// policy flags both the owner and the loop threads read.
#[derive(Debug)]
pub(crate) struct Lifecycle {
    state: Mutex<EngineState>,
    stop_requested: AtomicBool,
    forced: AtomicBool,
    pub completion: CompletionFlags,
    logic_paused: AtomicBool,
    draw_paused: AtomicBool,
    allow_close: AtomicBool,
    handle_close: AtomicBool,
    teardown_done: AtomicBool,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(EngineState::NotStarted),
            stop_requested: AtomicBool::new(false),
            forced: AtomicBool::new(false),
            completion: CompletionFlags::default(),
            logic_paused: AtomicBool::new(false),
            draw_paused: AtomicBool::new(false),
            allow_close: AtomicBool::new(true),
            handle_close: AtomicBool::new(false),
            teardown_done: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> EngineState {
        *lock(&self.state)
    }

    /// `NotStarted -> RunningSync|RunningAsync`; anything else is refused.
    pub fn begin_start(&self, mode: EngineMode) -> Result<(), EngineError> {
        let mut state = lock(&self.state);
        if *state != EngineState::NotStarted {
            return Err(EngineError::Configuration(format!(
                "start() is only valid before the first run (state: {:?})",
                *state
            )));
        }
        *state = match mode {
            EngineMode::Synchronous => EngineState::RunningSync,
            EngineMode::Asynchronous => EngineState::RunningAsync,
        };
        Ok(())
    }

    /// `Running* -> StoppingGraceful` and raises the stop flag.
    pub fn begin_graceful_stop(&self) -> Result<(), EngineError> {
        let mut state = lock(&self.state);
        match *state {
            EngineState::RunningSync | EngineState::RunningAsync => {
                *state = EngineState::StoppingGraceful;
                drop(state);
                self.stop_requested.store(true, Ordering::SeqCst);
                Ok(())
            }
            other => Err(EngineError::Configuration(format!(
                "stop() is only valid while running (state: {other:?})"
            ))),
        }
    }

    /// `* -> StoppingForced` and raises the stop and forced flags.
    /// Returns false when already forced or stopped, making the forced path
    /// idempotent.
    pub fn begin_forced_stop(&self) -> bool {
        let mut state = lock(&self.state);
        if matches!(*state, EngineState::StoppingForced | EngineState::Stopped) {
            return false;
        }
        *state = EngineState::StoppingForced;
        drop(state);
        self.stop_requested.store(true, Ordering::SeqCst);
        self.forced.store(true, Ordering::SeqCst);
        true
    }

    /// Enters the terminal `Stopped` state.
    pub fn finish_stop(&self) {
        *lock(&self.state) = EngineState::Stopped;
    }

    /// First caller wins the right to run teardown; later callers get false.
    pub fn claim_teardown(&self) -> bool {
        !self.teardown_done.swap(true, Ordering::SeqCst)
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::SeqCst)
    }

    pub fn forced(&self) -> bool {
        self.forced.load(Ordering::SeqCst)
    }

    pub fn logic_paused(&self) -> bool {
        self.logic_paused.load(Ordering::SeqCst)
    }

    pub fn set_logic_paused(&self, paused: bool) {
        self.logic_paused.store(paused, Ordering::SeqCst);
    }

    pub fn draw_paused(&self) -> bool {
        self.draw_paused.load(Ordering::SeqCst)
    }

    pub fn set_draw_paused(&self, paused: bool) {
        self.draw_paused.store(paused, Ordering::SeqCst);
    }

    pub fn allow_close(&self) -> bool {
        self.allow_close.load(Ordering::SeqCst)
    }

    pub fn set_allow_close(&self, allow: bool) {
        self.allow_close.store(allow, Ordering::SeqCst);
    }

    pub fn handle_close(&self) -> bool {
        self.handle_close.load(Ordering::SeqCst)
    }

    pub fn set_handle_close(&self, handle: bool) {
        self.handle_close.store(handle, Ordering::SeqCst);
    }
}
