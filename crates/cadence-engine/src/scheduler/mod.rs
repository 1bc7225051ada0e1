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

//! The scheduler: orchestrates initialization, the timing loop(s), thread
//! lifecycle, and shutdown.
//!
//! A [`Scheduler`] owns its timing configuration and statistics and drives
//! the application-owned subsystems through the contracts in
//! [`cadence_core::subsystem`]. `start` spawns the worker thread(s) and
//! blocks until the rendering surface exists; `stop` waits for the loops
//! to finish their in-flight step; `force_stop` releases resources after a
//! fixed grace period without waiting.

mod events;
mod loops;
mod recovery;
mod state;

pub use self::events::EngineEvent;
pub use self::recovery::RenderRecoveryPolicy;
pub use self::state::{EngineMode, EngineState, ThreadRole};

use self::events::EngineEventHandler;
use self::loops::Worker;
use self::state::Lifecycle;
use cadence_core::subsystem::{
    AudioSystem, GraphicsBackend, InputSource, RenderTargetHandle, ResourceStore, VideoBackend,
    WindowHandle,
};
use cadence_core::{EngineError, EngineStats, EventBus, TimingConfig};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

/// Fixed interval for the short coordination sleeps in `start` and `stop`.
const COORDINATION_POLL: Duration = Duration::from_millis(10);

/// How long a forced stop sleeps before tearing resources down.
const FORCED_STOP_GRACE: Duration = Duration::from_millis(10);

/// Locks a mutex, recovering the data if a peer thread panicked while
/// holding it. Lifecycle flags and stats stay usable across a poisoned
/// worker.
pub(crate) fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The application-owned collaborators the scheduler drives.
///
/// Worker threads and the owning thread both reach these, so they are held
/// behind `Arc<Mutex<..>>`; the scheduler never assumes exclusive
/// ownership.
#[derive(Clone)]
pub struct Subsystems {
    pub graphics: Arc<Mutex<dyn GraphicsBackend>>,
    pub audio: Arc<Mutex<dyn AudioSystem>>,
    pub input: Arc<Mutex<dyn InputSource>>,
    pub resources: Arc<Mutex<dyn ResourceStore>>,
}

impl Subsystems {
    pub fn new(
        graphics: impl GraphicsBackend + 'static,
        audio: impl AudioSystem + 'static,
        input: impl InputSource + 'static,
        resources: impl ResourceStore + 'static,
    ) -> Self {
        Self {
            graphics: Arc::new(Mutex::new(graphics)),
            audio: Arc::new(Mutex::new(audio)),
            input: Arc::new(Mutex::new(input)),
            resources: Arc::new(Mutex::new(resources)),
        }
    }
}

/// State shared between the scheduler facade and its worker threads.
pub(crate) struct EngineShared {
    pub lifecycle: Lifecycle,
    pub config: Mutex<TimingConfig>,
    pub stats: Mutex<EngineStats>,
    pub window: Mutex<Option<WindowHandle>>,
    pub render_target: Mutex<Option<RenderTargetHandle>>,
    pub faults: EventBus<EngineError>,
    pub on_window_close: Mutex<Option<EngineEventHandler>>,
    pub active_backend: VideoBackend,
    pub init_logic_done: AtomicBool,
    pub init_graphics_done: AtomicBool,
}

/// Releases the rendering surface and window, shuts the resource store
/// down, and terminates the graphics subsystem. Runs at most once per
/// engine lifetime no matter which stop path reaches it first.
fn teardown(shared: &EngineShared, subsystems: &Subsystems) {
    if !shared.lifecycle.claim_teardown() {
        return;
    }
    {
        let mut graphics = lock(&subsystems.graphics);
        graphics.destroy_render_target();
        graphics.destroy_window();
    }
    lock(&subsystems.resources).quit();
    lock(&subsystems.graphics).shutdown();
    *lock(&shared.render_target) = None;
    *lock(&shared.window) = None;
    log::debug!("Rendering resources released.");
}

/// The forced-stop path, callable from the owner or from a loop thread
/// (close handling, fault routing). Idempotent.
///
/// Workers are expected to observe the stop flag and exit on their own but
/// are deliberately not awaited: teardown proceeds after the grace sleep
/// even if a step is still in flight. This is an accepted risk of the
/// forced path, not an oversight.
pub(crate) fn force_stop_internal(shared: &EngineShared, subsystems: &Subsystems) {
    if !shared.lifecycle.begin_forced_stop() {
        return;
    }
    thread::sleep(FORCED_STOP_GRACE);
    teardown(shared, subsystems);
    shared.lifecycle.finish_stop();
    log::info!("Engine forcibly stopped.");
}

/// Picks the active backend: an unavailable request falls back to software
/// rendering with a logged diagnostic. `Auto` is always accepted.
fn resolve_backend(subsystems: &Subsystems, requested: VideoBackend) -> VideoBackend {
    if requested == VideoBackend::Auto {
        return requested;
    }
    let available = lock(&subsystems.graphics).available_backends();
    if available.iter().any(|name| name == requested.name()) {
        requested
    } else {
        log::warn!(
            "Render driver '{requested}' is not available (have: {available:?}); \
             switched to software fallback."
        );
        VideoBackend::Software
    }
}

/// The real-time scheduling core.
///
/// Owns timing configuration, statistics, lifecycle state, and the render
/// recovery policy for its lifetime; drives the application-owned
/// subsystems it is constructed with. One instance per engine — there is
/// no process-wide state.
pub struct Scheduler {
    shared: Arc<EngineShared>,
    subsystems: Subsystems,
    mode: Option<EngineMode>,
}

impl Scheduler {
    /// Creates a scheduler with default timing over the given subsystems.
    pub fn new(subsystems: Subsystems, requested_backend: VideoBackend) -> Self {
        Self::with_config(subsystems, requested_backend, TimingConfig::default())
    }

    pub fn with_config(
        subsystems: Subsystems,
        requested_backend: VideoBackend,
        config: TimingConfig,
    ) -> Self {
        let active_backend = resolve_backend(&subsystems, requested_backend);
        let shared = Arc::new(EngineShared {
            lifecycle: Lifecycle::new(),
            config: Mutex::new(config),
            stats: Mutex::new(EngineStats::default()),
            window: Mutex::new(None),
            render_target: Mutex::new(None),
            faults: EventBus::new(),
            on_window_close: Mutex::new(None),
            active_backend,
            init_logic_done: AtomicBool::new(false),
            init_graphics_done: AtomicBool::new(false),
        });
        Self {
            shared,
            subsystems,
            mode: None,
        }
    }

    /// Starts the engine in the given mode.
    ///
    /// Spawns the worker thread(s), then blocks the caller (sleeping, not
    /// spinning) until the initialization step has created the rendering
    /// surface, and hands the active render target to the resource store.
    /// Fails with a configuration error if the timing configuration is
    /// degenerate or the engine has already been started.
    pub fn start(&mut self, mode: EngineMode) -> Result<(), EngineError> {
        lock(&self.shared.config).validate()?;
        self.shared.lifecycle.begin_start(mode)?;
        self.mode = Some(mode);
        log::info!("Starting engine in {mode:?} mode.");

        let worker = Worker::new(Arc::clone(&self.shared), self.subsystems.clone());
        let spawned = match mode {
            EngineMode::Synchronous => {
                spawn_worker("cadence-sync", move || worker.run_sync())
            }
            EngineMode::Asynchronous => {
                let draw_worker = worker.clone();
                spawn_worker("cadence-logic", move || worker.run_async_logic()).and_then(|()| {
                    spawn_worker("cadence-draw", move || draw_worker.run_async_draw())
                })
            }
        };
        if let Err(err) = spawned {
            force_stop_internal(&self.shared, &self.subsystems);
            return Err(err);
        }

        loop {
            let surface_ready = lock(&self.shared.window).is_some()
                && lock(&self.shared.render_target).is_some();
            if surface_ready {
                break;
            }
            if self.shared.lifecycle.state() == EngineState::Stopped {
                // Initialization failed; the worker force-stopped and
                // reported over the fault channel.
                return Err(self.take_fault().unwrap_or_else(|| {
                    EngineError::Backend("engine stopped during initialization".to_string())
                }));
            }
            thread::sleep(COORDINATION_POLL);
        }

        let target = *lock(&self.shared.render_target);
        if let Some(target) = target {
            lock(&self.subsystems.resources).attach_render_target(target)?;
        }
        Ok(())
    }

    /// Requests a graceful stop and blocks until every loop thread has
    /// signaled completion, then releases resources.
    ///
    /// Loop threads finish the step they are in; nothing is abandoned
    /// mid-step. Fails with a configuration error when the engine is not
    /// running (never started, or already stopped by a forced path).
    pub fn stop(&mut self) -> Result<(), EngineError> {
        let mode = self.mode.ok_or_else(|| {
            EngineError::Configuration("stop() called but the engine was never started".to_string())
        })?;
        self.shared.lifecycle.begin_graceful_stop()?;
        log::info!("Graceful stop requested; waiting for loop threads.");
        thread::sleep(COORDINATION_POLL);
        if !self.shared.lifecycle.forced() {
            while !self.shared.lifecycle.completion.all_for(mode) {
                thread::sleep(COORDINATION_POLL);
            }
        }
        teardown(&self.shared, &self.subsystems);
        self.shared.lifecycle.finish_stop();
        log::info!("Engine stopped.");
        Ok(())
    }

    /// Stops without waiting for the loop threads: sets the stop flag,
    /// sleeps a fixed grace period, then releases resources. Also invoked
    /// internally by the close-handling policy and by fault routing.
    pub fn force_stop(&mut self) {
        force_stop_internal(&self.shared, &self.subsystems);
    }

    pub fn state(&self) -> EngineState {
        self.shared.lifecycle.state()
    }

    pub fn is_running(&self) -> bool {
        matches!(
            self.state(),
            EngineState::RunningSync | EngineState::RunningAsync
        )
    }

    /// Snapshot of the current performance statistics.
    pub fn stats(&self) -> EngineStats {
        lock(&self.shared.stats).clone()
    }

    pub fn fps(&self) -> f64 {
        lock(&self.shared.stats).fps
    }

    pub fn tps(&self) -> f64 {
        lock(&self.shared.stats).tps
    }

    pub fn current_frametime_ms(&self) -> f64 {
        lock(&self.shared.stats).current_frametime_ms
    }

    pub fn current_logictime_ms(&self) -> f64 {
        lock(&self.shared.stats).current_logictime_ms
    }

    /// Wall time of the most recent full loop iteration.
    pub fn total_time_ms(&self) -> f64 {
        lock(&self.shared.stats).current_total_loop_ms
    }

    pub fn is_poor_framerate(&self) -> bool {
        let target = lock(&self.shared.config).target_frame_interval_ms();
        lock(&self.shared.stats).poor_framerate(target)
    }

    pub fn is_poor_logicrate(&self) -> bool {
        let target = lock(&self.shared.config).target_logic_interval_ms();
        lock(&self.shared.stats).poor_logicrate(target)
    }

    /// Copy of the timing configuration.
    pub fn timing(&self) -> TimingConfig {
        lock(&self.shared.config).clone()
    }

    /// Replaces the timing configuration. Derived intervals are recomputed
    /// on read, so a change takes effect on the next loop iteration.
    pub fn set_timing(&self, config: TimingConfig) {
        *lock(&self.shared.config) = config;
    }

    pub fn logic_paused(&self) -> bool {
        self.shared.lifecycle.logic_paused()
    }

    pub fn set_logic_paused(&self, paused: bool) {
        self.shared.lifecycle.set_logic_paused(paused);
    }

    pub fn draw_paused(&self) -> bool {
        self.shared.lifecycle.draw_paused()
    }

    pub fn set_draw_paused(&self, paused: bool) {
        self.shared.lifecycle.set_draw_paused(paused);
    }

    pub fn allow_close(&self) -> bool {
        self.shared.lifecycle.allow_close()
    }

    pub fn set_allow_close(&self, allow: bool) {
        self.shared.lifecycle.set_allow_close(allow);
    }

    pub fn handle_close(&self) -> bool {
        self.shared.lifecycle.handle_close()
    }

    pub fn set_handle_close(&self, handle: bool) {
        self.shared.lifecycle.set_handle_close(handle);
    }

    /// Registers the handler invoked when a close request arrives while
    /// closes are allowed and `handle_close` is off. Runs synchronously on
    /// the loop thread; it must not call blocking scheduler operations.
    pub fn on_window_close(&self, handler: impl Fn(EngineEvent) + Send + Sync + 'static) {
        *lock(&self.shared.on_window_close) = Some(Box::new(handler));
    }

    /// Takes the next fault a loop thread reported, if any.
    pub fn take_fault(&self) -> Option<EngineError> {
        self.shared.faults.try_next()
    }

    /// Driver names of the backends the graphics subsystem enumerates.
    pub fn available_backends(&self) -> Vec<String> {
        lock(&self.subsystems.graphics).available_backends()
    }

    /// The backend actually in use after fallback resolution.
    pub fn active_backend(&self) -> VideoBackend {
        self.shared.active_backend
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if self.is_running() {
            log::warn!("Scheduler dropped while running; forcing stop.");
            force_stop_internal(&self.shared, &self.subsystems);
        }
    }
}

fn spawn_worker(
    name: &str,
    body: impl FnOnce() + Send + 'static,
) -> Result<(), EngineError> {
    thread::Builder::new()
        .name(name.to_string())
        .spawn(body)
        .map(|_| ())
        .map_err(|err| {
            EngineError::Configuration(format!("failed to spawn {name} thread: {err}"))
        })
}
