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

//! Full-lifecycle tests of the scheduler against counting mock subsystems.

use cadence_core::subsystem::{
    AudioSystem, Color, GraphicsBackend, InputEvent, InputSource, RenderTargetHandle,
    ResourceStore, VideoBackend, WindowHandle,
};
use cadence_core::EngineError;
use cadence_engine::{EngineMode, EngineState, Scheduler, Subsystems};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

const WINDOW: WindowHandle = WindowHandle(1);
const TARGET: RenderTargetHandle = RenderTargetHandle(7);

/// Shared call counters every mock reports into.
#[derive(Default)]
struct Counters {
    graphics_init: AtomicUsize,
    audio_init: AtomicUsize,
    input_init: AtomicUsize,
    presents: AtomicUsize,
    presents_after_destroy: AtomicUsize,
    rebuilds: AtomicUsize,
    quits: AtomicUsize,
    shutdowns: AtomicUsize,
    targets_destroyed: AtomicUsize,
    windows_destroyed: AtomicUsize,
    attached: Mutex<Option<RenderTargetHandle>>,
}

struct MockGraphics {
    counters: Arc<Counters>,
    // Injected by tests to simulate a backend fault between logic steps.
    pending_error: Arc<Mutex<Option<String>>>,
    // Taken on the next init() call to simulate a driver that fails to
    // come up.
    init_failure: Arc<Mutex<Option<EngineError>>>,
    // Artificial per-present latency, to hold a draw step in flight.
    present_delay_ms: Arc<AtomicU64>,
    present_in_flight: Arc<AtomicBool>,
}

impl GraphicsBackend for MockGraphics {
    fn init(&mut self) -> Result<(), EngineError> {
        self.counters.graphics_init.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.init_failure.lock().unwrap().take() {
            return Err(err);
        }
        Ok(())
    }

    fn available_backends(&self) -> Vec<String> {
        vec![
            "direct3d".to_string(),
            "opengl".to_string(),
            "software".to_string(),
        ]
    }

    fn create_window(
        &mut self,
        _title: &str,
        _width: u32,
        _height: u32,
    ) -> Result<WindowHandle, EngineError> {
        Ok(WINDOW)
    }

    fn create_render_target(&mut self) -> Result<RenderTargetHandle, EngineError> {
        Ok(TARGET)
    }

    fn set_clear_color(&mut self, _color: Color) {}

    fn render_clear(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    fn render_present(&mut self) -> Result<(), EngineError> {
        self.present_in_flight.store(true, Ordering::SeqCst);
        if self.counters.targets_destroyed.load(Ordering::SeqCst) > 0 {
            self.counters
                .presents_after_destroy
                .fetch_add(1, Ordering::SeqCst);
        }
        let delay = self.present_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            thread::sleep(Duration::from_millis(delay));
        }
        self.counters.presents.fetch_add(1, Ordering::SeqCst);
        self.present_in_flight.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn take_backend_error(&mut self) -> Option<String> {
        self.pending_error.lock().unwrap().take()
    }

    fn destroy_render_target(&mut self) {
        self.counters.targets_destroyed.fetch_add(1, Ordering::SeqCst);
    }

    fn destroy_window(&mut self) {
        self.counters.windows_destroyed.fetch_add(1, Ordering::SeqCst);
    }

    fn shutdown(&mut self) {
        self.counters.shutdowns.fetch_add(1, Ordering::SeqCst);
    }
}

struct MockAudio {
    counters: Arc<Counters>,
}

impl AudioSystem for MockAudio {
    fn init(&mut self) -> Result<(), EngineError> {
        self.counters.audio_init.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct MockInput {
    counters: Arc<Counters>,
    queue: Arc<Mutex<VecDeque<InputEvent>>>,
}

impl InputSource for MockInput {
    fn init(&mut self) -> Result<(), EngineError> {
        self.counters.input_init.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.queue.lock().unwrap().drain(..).collect()
    }
}

struct MockResources {
    counters: Arc<Counters>,
}

impl ResourceStore for MockResources {
    fn attach_render_target(&mut self, target: RenderTargetHandle) -> Result<(), EngineError> {
        *self.counters.attached.lock().unwrap() = Some(target);
        Ok(())
    }

    fn rebuild_textures(&mut self) {
        self.counters.rebuilds.fetch_add(1, Ordering::SeqCst);
    }

    fn quit(&mut self) {
        self.counters.quits.fetch_add(1, Ordering::SeqCst);
    }
}

struct Harness {
    scheduler: Scheduler,
    counters: Arc<Counters>,
    events: Arc<Mutex<VecDeque<InputEvent>>>,
    pending_error: Arc<Mutex<Option<String>>>,
    init_failure: Arc<Mutex<Option<EngineError>>>,
    present_delay_ms: Arc<AtomicU64>,
    present_in_flight: Arc<AtomicBool>,
}

fn harness(backend: VideoBackend) -> Harness {
    let counters = Arc::new(Counters::default());
    let events = Arc::new(Mutex::new(VecDeque::new()));
    let pending_error = Arc::new(Mutex::new(None));
    let init_failure = Arc::new(Mutex::new(None));
    let present_delay_ms = Arc::new(AtomicU64::new(0));
    let present_in_flight = Arc::new(AtomicBool::new(false));
    let subsystems = Subsystems::new(
        MockGraphics {
            counters: Arc::clone(&counters),
            pending_error: Arc::clone(&pending_error),
            init_failure: Arc::clone(&init_failure),
            present_delay_ms: Arc::clone(&present_delay_ms),
            present_in_flight: Arc::clone(&present_in_flight),
        },
        MockAudio {
            counters: Arc::clone(&counters),
        },
        MockInput {
            counters: Arc::clone(&counters),
            queue: Arc::clone(&events),
        },
        MockResources {
            counters: Arc::clone(&counters),
        },
    );
    Harness {
        scheduler: Scheduler::new(subsystems, backend),
        counters,
        events,
        pending_error,
        init_failure,
        present_delay_ms,
        present_in_flight,
    }
}

fn push_event(harness: &Harness, event: InputEvent) {
    harness.events.lock().unwrap().push_back(event);
}

fn wait_for(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let started = Instant::now();
    while started.elapsed() < timeout {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    condition()
}

#[test]
fn sync_lifecycle_initializes_runs_and_stops_gracefully() {
    let mut h = harness(VideoBackend::Auto);
    assert_eq!(h.scheduler.state(), EngineState::NotStarted);

    h.scheduler
        .start(EngineMode::Synchronous)
        .expect("start should succeed");
    assert_eq!(h.scheduler.state(), EngineState::RunningSync);
    assert!(h.scheduler.is_running());
    // start() forwarded the render target to the resource store.
    assert_eq!(*h.counters.attached.lock().unwrap(), Some(TARGET));

    thread::sleep(Duration::from_millis(300));
    assert!(h.scheduler.tps() > 0.0, "logic steps should have run");
    assert!(h.scheduler.fps() > 0.0, "draw steps should have run");
    assert!(h.scheduler.current_logictime_ms() > 0.0);
    assert!(h.scheduler.current_frametime_ms() > 0.0);
    assert!(h.counters.presents.load(Ordering::SeqCst) > 0);

    h.scheduler.stop().expect("graceful stop should succeed");
    assert_eq!(h.scheduler.state(), EngineState::Stopped);
    assert!(!h.scheduler.is_running());
    assert!(h.scheduler.take_fault().is_none());

    assert_eq!(h.counters.graphics_init.load(Ordering::SeqCst), 1);
    assert_eq!(h.counters.audio_init.load(Ordering::SeqCst), 1);
    assert_eq!(h.counters.input_init.load(Ordering::SeqCst), 1);
    assert_eq!(h.counters.targets_destroyed.load(Ordering::SeqCst), 1);
    assert_eq!(h.counters.windows_destroyed.load(Ordering::SeqCst), 1);
    assert_eq!(h.counters.quits.load(Ordering::SeqCst), 1);
    assert_eq!(h.counters.shutdowns.load(Ordering::SeqCst), 1);
}

#[test]
fn async_mode_runs_logic_and_draw_on_independent_threads() {
    let mut h = harness(VideoBackend::Auto);
    h.scheduler
        .start(EngineMode::Asynchronous)
        .expect("async start should succeed");
    assert_eq!(h.scheduler.state(), EngineState::RunningAsync);

    thread::sleep(Duration::from_millis(300));
    assert!(h.scheduler.tps() > 0.0, "logic thread should have ticked");
    assert!(h.scheduler.fps() > 0.0, "draw thread should have drawn");

    h.scheduler.stop().expect("graceful stop should succeed");
    assert_eq!(h.scheduler.state(), EngineState::Stopped);
    assert!(h.scheduler.take_fault().is_none());
    assert_eq!(h.counters.quits.load(Ordering::SeqCst), 1);
}

#[test]
fn graceful_stop_waits_for_the_in_flight_draw_step() {
    let mut h = harness(VideoBackend::Auto);
    h.present_delay_ms.store(150, Ordering::SeqCst);
    h.scheduler.start(EngineMode::Synchronous).unwrap();

    // With every present pinned at 150 ms, the loop spends nearly all of
    // its time inside a draw step; catch one mid-present.
    assert!(wait_for(Duration::from_secs(2), || {
        h.present_in_flight.load(Ordering::SeqCst)
    }));

    h.scheduler.stop().expect("graceful stop should succeed");
    assert_eq!(h.scheduler.state(), EngineState::Stopped);
    assert!(
        !h.present_in_flight.load(Ordering::SeqCst),
        "stop() must not return while a draw step is still presenting"
    );
    assert_eq!(
        h.counters.presents_after_destroy.load(Ordering::SeqCst),
        0,
        "no present may run against released resources"
    );
}

#[test]
fn starting_twice_is_a_configuration_error() {
    let mut h = harness(VideoBackend::Auto);
    h.scheduler.start(EngineMode::Synchronous).unwrap();

    let err = h.scheduler.start(EngineMode::Synchronous).unwrap_err();
    assert!(matches!(err, EngineError::Configuration(_)));
    assert!(h.scheduler.is_running(), "failed start must not disturb the run");

    h.scheduler.stop().unwrap();
}

#[test]
fn degenerate_timing_is_rejected_before_any_state_change() {
    let mut h = harness(VideoBackend::Auto);
    let mut config = h.scheduler.timing();
    config.target_tick_rate = 0.0;
    h.scheduler.set_timing(config);

    let err = h.scheduler.start(EngineMode::Synchronous).unwrap_err();
    assert!(matches!(err, EngineError::Configuration(_)));
    assert_eq!(h.scheduler.state(), EngineState::NotStarted);
    assert_eq!(h.counters.graphics_init.load(Ordering::SeqCst), 0);
    assert_eq!(h.counters.audio_init.load(Ordering::SeqCst), 0);
}

#[test]
fn unknown_mode_name_fails_at_the_parse_boundary() {
    let h = harness(VideoBackend::Auto);
    let err = "turbo".parse::<EngineMode>().unwrap_err();
    assert!(matches!(err, EngineError::Configuration(_)));
    // Nothing reached the scheduler.
    assert_eq!(h.scheduler.state(), EngineState::NotStarted);
}

#[test]
fn force_stop_returns_without_waiting_and_tears_down_exactly_once() {
    let mut h = harness(VideoBackend::Auto);
    h.scheduler.start(EngineMode::Synchronous).unwrap();
    thread::sleep(Duration::from_millis(100));

    h.scheduler.force_stop();
    assert_eq!(h.scheduler.state(), EngineState::Stopped);
    assert_eq!(h.counters.quits.load(Ordering::SeqCst), 1);
    assert_eq!(h.counters.shutdowns.load(Ordering::SeqCst), 1);

    // A later graceful stop is refused and must not tear down again.
    assert!(h.scheduler.stop().is_err());
    h.scheduler.force_stop();
    assert_eq!(h.counters.quits.load(Ordering::SeqCst), 1);
    assert_eq!(h.counters.shutdowns.load(Ordering::SeqCst), 1);
}

#[test]
fn handled_close_forces_stop_without_raising_the_event() {
    let mut h = harness(VideoBackend::Auto);
    let fired = Arc::new(AtomicBool::new(false));
    let fired_probe = Arc::clone(&fired);
    h.scheduler
        .on_window_close(move |_| fired_probe.store(true, Ordering::SeqCst));
    h.scheduler.set_handle_close(true);

    h.scheduler.start(EngineMode::Synchronous).unwrap();
    push_event(&h, InputEvent::WindowClose);

    assert!(
        wait_for(Duration::from_secs(2), || h.scheduler.state()
            == EngineState::Stopped),
        "close handling should force-stop the engine"
    );
    assert!(!fired.load(Ordering::SeqCst), "no event when the engine handles close");
    assert_eq!(h.counters.quits.load(Ordering::SeqCst), 1);
}

#[test]
fn close_is_ignored_entirely_when_not_allowed() {
    let mut h = harness(VideoBackend::Auto);
    let fired = Arc::new(AtomicBool::new(false));
    let fired_probe = Arc::clone(&fired);
    h.scheduler
        .on_window_close(move |_| fired_probe.store(true, Ordering::SeqCst));
    h.scheduler.set_allow_close(false);

    h.scheduler.start(EngineMode::Synchronous).unwrap();
    push_event(&h, InputEvent::WindowClose);
    thread::sleep(Duration::from_millis(200));

    assert!(h.scheduler.is_running(), "a disallowed close must change nothing");
    assert!(!fired.load(Ordering::SeqCst));

    h.scheduler.stop().unwrap();
}

#[test]
fn close_event_reaches_the_registered_handler() {
    let mut h = harness(VideoBackend::Auto);
    let fired = Arc::new(AtomicBool::new(false));
    let fired_probe = Arc::clone(&fired);
    h.scheduler
        .on_window_close(move |event| {
            assert_eq!(event, cadence_engine::EngineEvent::WindowClose);
            fired_probe.store(true, Ordering::SeqCst);
        });

    h.scheduler.start(EngineMode::Synchronous).unwrap();
    push_event(&h, InputEvent::WindowClose);

    assert!(
        wait_for(Duration::from_secs(2), || fired.load(Ordering::SeqCst)),
        "the close handler should have been invoked"
    );
    assert!(h.scheduler.is_running(), "raising the event must not stop the engine");

    h.scheduler.stop().unwrap();
}

#[test]
fn device_reset_rebuilds_every_time_even_without_the_lazy_path() {
    // direct3d is available and not context-loss-prone, so the lazy path
    // never fires and every rebuild is attributable to an event.
    let mut h = harness(VideoBackend::Direct3d);
    h.scheduler.start(EngineMode::Synchronous).unwrap();

    thread::sleep(Duration::from_millis(200));
    assert_eq!(h.counters.rebuilds.load(Ordering::SeqCst), 0);

    push_event(&h, InputEvent::RenderDeviceReset);
    assert!(wait_for(Duration::from_secs(2), || {
        h.counters.rebuilds.load(Ordering::SeqCst) == 1
    }));
    push_event(&h, InputEvent::RenderDeviceReset);
    assert!(wait_for(Duration::from_secs(2), || {
        h.counters.rebuilds.load(Ordering::SeqCst) == 2
    }));

    h.scheduler.stop().unwrap();
}

#[test]
fn lazy_rebuild_fires_exactly_once_for_context_loss_backends() {
    let mut h = harness(VideoBackend::OpenGl);
    assert_eq!(h.scheduler.active_backend(), VideoBackend::OpenGl);
    h.scheduler.start(EngineMode::Synchronous).unwrap();

    // Threshold at 60 FPS is 6 draw calls (~100 ms); leave ample margin.
    assert!(wait_for(Duration::from_secs(2), || {
        h.counters.rebuilds.load(Ordering::SeqCst) == 1
    }));
    thread::sleep(Duration::from_millis(300));
    assert_eq!(
        h.counters.rebuilds.load(Ordering::SeqCst),
        1,
        "the lazy rebuild is one-shot per session"
    );

    h.scheduler.stop().unwrap();
}

#[test]
fn focus_gained_rebuilds_only_on_context_loss_backends() {
    // Non-context-loss backend: focus events are ignored.
    let mut d3d = harness(VideoBackend::Direct3d);
    d3d.scheduler.start(EngineMode::Synchronous).unwrap();
    push_event(&d3d, InputEvent::FocusGained);
    thread::sleep(Duration::from_millis(200));
    assert_eq!(d3d.counters.rebuilds.load(Ordering::SeqCst), 0);
    d3d.scheduler.stop().unwrap();

    // OpenGL: the lazy one-shot fires first, then the focus event adds one.
    let mut gl = harness(VideoBackend::OpenGl);
    gl.scheduler.start(EngineMode::Synchronous).unwrap();
    assert!(wait_for(Duration::from_secs(2), || {
        gl.counters.rebuilds.load(Ordering::SeqCst) == 1
    }));
    push_event(&gl, InputEvent::FocusGained);
    assert!(wait_for(Duration::from_secs(2), || {
        gl.counters.rebuilds.load(Ordering::SeqCst) == 2
    }));
    gl.scheduler.stop().unwrap();
}

#[test]
fn unavailable_backend_falls_back_to_software() {
    let h = harness(VideoBackend::Metal);
    assert_eq!(h.scheduler.active_backend(), VideoBackend::Software);

    let h = harness(VideoBackend::Direct3d);
    assert_eq!(h.scheduler.active_backend(), VideoBackend::Direct3d);

    let h = harness(VideoBackend::Auto);
    assert_eq!(h.scheduler.active_backend(), VideoBackend::Auto);
    assert!(h
        .scheduler
        .available_backends()
        .contains(&"software".to_string()));
}

#[test]
fn backend_fault_force_stops_and_crosses_the_fault_channel() {
    let mut h = harness(VideoBackend::Auto);
    h.scheduler.start(EngineMode::Synchronous).unwrap();
    thread::sleep(Duration::from_millis(100));

    *h.pending_error.lock().unwrap() = Some("device removed".to_string());

    assert!(
        wait_for(Duration::from_secs(2), || h.scheduler.state()
            == EngineState::Stopped),
        "a backend fault should force-stop the engine"
    );
    match h.scheduler.take_fault() {
        Some(EngineError::Backend(message)) => assert_eq!(message, "device removed"),
        other => panic!("expected a backend fault, got {other:?}"),
    }
    assert_eq!(h.counters.quits.load(Ordering::SeqCst), 1);
    assert_eq!(h.counters.shutdowns.load(Ordering::SeqCst), 1);
}

#[test]
fn initialization_failure_surfaces_the_real_cause_from_start() {
    let mut h = harness(VideoBackend::Auto);
    *h.init_failure.lock().unwrap() =
        Some(EngineError::Backend("no suitable adapter".to_string()));

    let err = h.scheduler.start(EngineMode::Synchronous).unwrap_err();
    assert_eq!(err, EngineError::Backend("no suitable adapter".to_string()));
    assert_eq!(h.scheduler.state(), EngineState::Stopped);
    // start() consumed the fault; nothing is left behind on the channel.
    assert!(h.scheduler.take_fault().is_none());
}

#[test]
fn pausing_draw_stops_presents_but_keeps_logic_ticking() {
    let mut h = harness(VideoBackend::Auto);
    h.scheduler.set_draw_paused(true);
    h.scheduler.start(EngineMode::Synchronous).unwrap();
    thread::sleep(Duration::from_millis(300));

    assert_eq!(h.counters.presents.load(Ordering::SeqCst), 0);
    assert!(h.scheduler.tps() > 0.0, "logic should keep running while draw is paused");

    h.scheduler.set_draw_paused(false);
    assert!(wait_for(Duration::from_secs(2), || {
        h.counters.presents.load(Ordering::SeqCst) > 0
    }));

    h.scheduler.stop().unwrap();
}
