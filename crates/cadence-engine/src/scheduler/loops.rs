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

//! The worker-thread loops.
//!
//! Synchronous mode runs [`Worker::run_sync`] on one thread: two
//! independent elapsed-time accumulators, one per step type, polled in a
//! tight loop against the monotonic clock. Asynchronous mode runs
//! [`Worker::run_async_logic`] and [`Worker::run_async_draw`] on two
//! threads with no shared timer. Every loop signals its own completion
//! flag on exit; errors cross to the owning thread over the fault channel
//! instead of unwinding the worker.

use super::recovery::RenderRecoveryPolicy;
use super::state::ThreadRole;
use super::{force_stop_internal, lock, EngineShared, Subsystems};
use cadence_core::subsystem::{Color, InputEvent};
use cadence_core::{EngineError, RollingAverage, Stopwatch};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;

/// Sample window for the FPS/TPS rolling averages.
const RATE_SAMPLE_WINDOW: usize = 100;

/// When both accumulators are at least this far (ms) from their deadlines,
/// the loop yields the processor instead of spinning. Trades a little
/// pacing jitter for much lower idle power draw; shrink it if sub-2ms
/// deadlines start slipping.
const YIELD_SLACK_MS: f64 = 2.0;

const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;
const DEFAULT_CLEAR_COLOR: Color = Color::rgb(120, 180, 230);

/// One loop thread's view of the engine: the shared cell plus the
/// collaborator handles it drives.
#[derive(Clone)]
pub(crate) struct Worker {
    shared: Arc<EngineShared>,
    subsystems: Subsystems,
}

impl Worker {
    pub fn new(shared: Arc<EngineShared>, subsystems: Subsystems) -> Self {
        Self { shared, subsystems }
    }

    /// Initializes the logic-side subsystems. Idempotent across threads.
    fn init_logic(&self) -> Result<(), EngineError> {
        if self.shared.init_logic_done.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        lock(&self.subsystems.audio).init()?;
        lock(&self.subsystems.input).init()?;
        log::info!("Logic subsystems initialized.");
        Ok(())
    }

    /// Initializes the graphics backend, window, and render target.
    /// Idempotent across threads; `start()` polls for the handles this
    /// publishes.
    fn init_graphics(&self) -> Result<(), EngineError> {
        if self.shared.init_graphics_done.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        let title = lock(&self.shared.config).window_title.clone();
        let (window, target) = {
            let mut graphics = lock(&self.subsystems.graphics);
            graphics.init()?;
            let window = graphics.create_window(&title, WINDOW_WIDTH, WINDOW_HEIGHT)?;
            let target = graphics.create_render_target()?;
            graphics.set_clear_color(DEFAULT_CLEAR_COLOR);
            (window, target)
        };
        *lock(&self.shared.window) = Some(window);
        *lock(&self.shared.render_target) = Some(target);
        log::info!("Graphics initialized on backend '{}'.", self.shared.active_backend);
        Ok(())
    }

    /// One logic step: drain and dispatch input events, then (unless logic
    /// is paused) run application logic and check backend health.
    fn logic_step(&self) -> Result<(), EngineError> {
        let events = lock(&self.subsystems.input).poll_events();
        for event in events {
            self.dispatch(event);
        }
        if self.shared.lifecycle.logic_paused() {
            return Ok(());
        }
        // Application simulation would run here, between input dispatch and
        // the backend health check.
        if let Some(message) = lock(&self.subsystems.graphics).take_backend_error() {
            if !self.shared.lifecycle.stop_requested() {
                return Err(EngineError::Backend(message));
            }
        }
        Ok(())
    }

    /// Synchronous dispatch of a polled input event, on the polling thread.
    fn dispatch(&self, event: InputEvent) {
        match event {
            InputEvent::WindowClose => {
                let lifecycle = &self.shared.lifecycle;
                if !lifecycle.allow_close() {
                    return;
                }
                if lifecycle.handle_close() {
                    log::info!("Close request received; engine handles close itself.");
                    force_stop_internal(&self.shared, &self.subsystems);
                } else if let Some(handler) = lock(&self.shared.on_window_close).as_ref() {
                    handler(super::EngineEvent::WindowClose);
                }
            }
            InputEvent::FocusGained => {
                if self.shared.active_backend.is_context_loss_prone() {
                    log::debug!("Focus gained on '{}'; rebuilding textures.", self.shared.active_backend);
                    lock(&self.subsystems.resources).rebuild_textures();
                }
            }
            InputEvent::RenderDeviceReset => {
                log::debug!("Render device reset; rebuilding textures.");
                lock(&self.subsystems.resources).rebuild_textures();
            }
        }
    }

    /// One draw step: clear, run the lazy recovery check, present.
    fn draw_step(&self, recovery: &mut RenderRecoveryPolicy) -> Result<(), EngineError> {
        if self.shared.lifecycle.draw_paused() {
            return Ok(());
        }
        lock(&self.subsystems.graphics).render_clear()?;
        let target_frame_rate = lock(&self.shared.config).target_frame_rate;
        if recovery.note_draw_call(target_frame_rate)
            && self.shared.active_backend.is_context_loss_prone()
        {
            log::debug!("Initial lazy texture rebuild for '{}'.", self.shared.active_backend);
            lock(&self.subsystems.resources).rebuild_textures();
        }
        // A forced stop may have released the target mid-iteration; don't
        // present into it.
        if self.shared.lifecycle.stop_requested() {
            return Ok(());
        }
        lock(&self.subsystems.graphics).render_present()?;
        Ok(())
    }

    /// Routes a loop-thread fault: report it over the fault channel, then
    /// run the forced stop. The fault must be readable by the time the
    /// owner observes `Stopped`, so publish comes first.
    fn fail(&self, err: EngineError) {
        log::error!("Engine fault: {err}");
        self.shared.faults.publish(err);
        force_stop_internal(&self.shared, &self.subsystems);
    }

    /// Swallows draw errors caused by a concurrent stop tearing resources
    /// down; everything else is a real fault.
    fn fail_draw(&self, err: EngineError) {
        if self.shared.lifecycle.stop_requested() {
            log::debug!("Draw error during shutdown ignored: {err}");
        } else {
            self.fail(err);
        }
    }

    /// The synchronous-mode loop: logic and draw interleaved on one thread.
    pub fn run_sync(self) {
        log::debug!("Synchronous engine thread started.");
        if let Err(err) = self.init_logic().and_then(|()| self.init_graphics()) {
            self.fail(err);
            self.shared.lifecycle.completion.mark(ThreadRole::Sync);
            return;
        }

        let mut logic_timer = Stopwatch::new();
        let mut draw_timer = Stopwatch::new();
        let mut tps_avg = RollingAverage::new(RATE_SAMPLE_WINDOW);
        let mut fps_avg = RollingAverage::new(RATE_SAMPLE_WINDOW);
        let mut recovery = RenderRecoveryPolicy::new();
        // With the frame limiter off the draw step runs on every other
        // iteration only, roughly halving the achievable uncapped rate.
        // Intentional throttle-bypass pacing, not a bug.
        let mut flip = false;

        while !self.shared.lifecycle.stop_requested() {
            let iteration = Stopwatch::new();
            let (logic_interval, frame_interval, limiter_enabled) = {
                let config = lock(&self.shared.config);
                (
                    config.target_logic_interval_ms(),
                    config.target_frame_interval_ms(),
                    config.frame_limiter_enabled,
                )
            };

            let logic_elapsed = logic_timer.elapsed_ms_f64();
            if logic_elapsed >= logic_interval {
                logic_timer.restart();
                tps_avg.add_point(1000.0 / logic_elapsed);
                {
                    let mut stats = lock(&self.shared.stats);
                    stats.current_logictime_ms = logic_elapsed;
                    stats.tps = tps_avg.average();
                }
                if let Err(err) = self.logic_step() {
                    self.fail(err);
                    break;
                }
                if self.shared.lifecycle.stop_requested() {
                    // Dispatch above may have force-stopped; don't start a
                    // draw step against released resources.
                    break;
                }
            }

            let draw_elapsed = draw_timer.elapsed_ms_f64();
            if draw_elapsed >= frame_interval || !limiter_enabled {
                if !flip {
                    draw_timer.restart();
                    fps_avg.add_point(1000.0 / draw_elapsed);
                    {
                        let mut stats = lock(&self.shared.stats);
                        stats.current_frametime_ms = draw_elapsed;
                        stats.fps = fps_avg.average();
                    }
                    if let Err(err) = self.draw_step(&mut recovery) {
                        self.fail_draw(err);
                        break;
                    }
                }
                if !limiter_enabled {
                    flip = !flip;
                }
            }

            lock(&self.shared.stats).current_total_loop_ms = iteration.elapsed_ms_f64();

            // Busy-wait keeps sub-millisecond pacing; give the core back
            // only when both deadlines are comfortably far away.
            if limiter_enabled
                && logic_interval - logic_timer.elapsed_ms_f64() > YIELD_SLACK_MS
                && frame_interval - draw_timer.elapsed_ms_f64() > YIELD_SLACK_MS
            {
                thread::yield_now();
            }
        }

        self.shared.lifecycle.completion.mark(ThreadRole::Sync);
        log::debug!("Synchronous engine thread exited.");
    }

    /// The asynchronous-mode logic loop.
    pub fn run_async_logic(self) {
        log::debug!("Asynchronous logic thread started.");
        if let Err(err) = self.init_logic() {
            self.fail(err);
            self.shared.lifecycle.completion.mark(ThreadRole::AsyncLogic);
            return;
        }

        let mut logic_timer = Stopwatch::new();
        let mut tps_avg = RollingAverage::new(RATE_SAMPLE_WINDOW);

        while !self.shared.lifecycle.stop_requested() {
            let logic_interval = lock(&self.shared.config).target_logic_interval_ms();
            let logic_elapsed = logic_timer.elapsed_ms_f64();
            if logic_elapsed >= logic_interval {
                logic_timer.restart();
                tps_avg.add_point(1000.0 / logic_elapsed);
                {
                    let mut stats = lock(&self.shared.stats);
                    stats.current_logictime_ms = logic_elapsed;
                    stats.tps = tps_avg.average();
                }
                if let Err(err) = self.logic_step() {
                    self.fail(err);
                    break;
                }
            } else if logic_interval - logic_elapsed > YIELD_SLACK_MS {
                thread::yield_now();
            }
        }

        self.shared.lifecycle.completion.mark(ThreadRole::AsyncLogic);
        log::debug!("Asynchronous logic thread exited.");
    }

    /// The asynchronous-mode draw loop.
    pub fn run_async_draw(self) {
        log::debug!("Asynchronous draw thread started.");
        if let Err(err) = self.init_graphics() {
            self.fail(err);
            self.shared.lifecycle.completion.mark(ThreadRole::AsyncDraw);
            return;
        }

        let mut draw_timer = Stopwatch::new();
        let mut fps_avg = RollingAverage::new(RATE_SAMPLE_WINDOW);
        let mut recovery = RenderRecoveryPolicy::new();

        while !self.shared.lifecycle.stop_requested() {
            let (frame_interval, limiter_enabled) = {
                let config = lock(&self.shared.config);
                (config.target_frame_interval_ms(), config.frame_limiter_enabled)
            };
            let draw_elapsed = draw_timer.elapsed_ms_f64();
            if draw_elapsed >= frame_interval || !limiter_enabled {
                draw_timer.restart();
                fps_avg.add_point(1000.0 / draw_elapsed);
                {
                    let mut stats = lock(&self.shared.stats);
                    stats.current_frametime_ms = draw_elapsed;
                    stats.fps = fps_avg.average();
                }
                if let Err(err) = self.draw_step(&mut recovery) {
                    self.fail_draw(err);
                    break;
                }
            } else if frame_interval - draw_elapsed > YIELD_SLACK_MS {
                thread::yield_now();
            }
        }

        self.shared.lifecycle.completion.mark(ThreadRole::AsyncDraw);
        log::debug!("Asynchronous draw thread exited.");
    }
}
