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

// Cadence sandbox
// Headless demo: runs the scheduler against no-op subsystems and prints
// the timing statistics it gathers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use cadence_core::subsystem::{
    AudioSystem, Color, GraphicsBackend, InputEvent, InputSource, RenderTargetHandle,
    ResourceStore, VideoBackend, WindowHandle,
};
use cadence_core::{EngineError, TimingConfig};
use cadence_engine::{EngineMode, Scheduler, Subsystems};

struct HeadlessGraphics;

impl GraphicsBackend for HeadlessGraphics {
    fn init(&mut self) -> Result<(), EngineError> {
        log::info!("Headless graphics up.");
        Ok(())
    }

    fn available_backends(&self) -> Vec<String> {
        vec!["software".to_string()]
    }

    fn create_window(
        &mut self,
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<WindowHandle, EngineError> {
        log::info!("Pretending to open '{title}' at {width}x{height}.");
        Ok(WindowHandle(1))
    }

    fn create_render_target(&mut self) -> Result<RenderTargetHandle, EngineError> {
        Ok(RenderTargetHandle(1))
    }

    fn set_clear_color(&mut self, _color: Color) {}

    fn render_clear(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    fn render_present(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    fn take_backend_error(&mut self) -> Option<String> {
        None
    }

    fn destroy_render_target(&mut self) {}

    fn destroy_window(&mut self) {}

    fn shutdown(&mut self) {
        log::info!("Headless graphics down.");
    }
}

struct HeadlessAudio;

impl AudioSystem for HeadlessAudio {
    fn init(&mut self) -> Result<(), EngineError> {
        Ok(())
    }
}

struct HeadlessInput;

impl InputSource for HeadlessInput {
    fn init(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        Vec::new()
    }
}

struct HeadlessResources;

impl ResourceStore for HeadlessResources {
    fn attach_render_target(&mut self, target: RenderTargetHandle) -> Result<(), EngineError> {
        log::info!("Resource store bound to render target {}.", target.0);
        Ok(())
    }

    fn rebuild_textures(&mut self) {
        log::info!("Rebuilding textures.");
    }

    fn quit(&mut self) {}
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let mode: EngineMode = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or("sync")
        .parse()?;

    let subsystems = Subsystems::new(
        HeadlessGraphics,
        HeadlessAudio,
        HeadlessInput,
        HeadlessResources,
    );
    let config = TimingConfig {
        window_title: "Cadence Sandbox".to_string(),
        ..TimingConfig::default()
    };
    let mut scheduler = Scheduler::with_config(subsystems, VideoBackend::Auto, config);

    let closing = Arc::new(AtomicBool::new(false));
    let closing_flag = Arc::clone(&closing);
    scheduler.on_window_close(move |_| closing_flag.store(true, Ordering::SeqCst));

    scheduler.start(mode)?;
    log::info!("Engine running on backend '{}'.", scheduler.active_backend());

    for _ in 0..5 {
        thread::sleep(Duration::from_secs(1));
        let stats = scheduler.stats();
        log::info!(
            "tps {:.1} ({:.2} ms) | fps {:.1} ({:.2} ms) | loop {:.3} ms{}{}",
            stats.tps,
            stats.current_logictime_ms,
            stats.fps,
            stats.current_frametime_ms,
            stats.current_total_loop_ms,
            if scheduler.is_poor_logicrate() { " [logic lagging]" } else { "" },
            if scheduler.is_poor_framerate() { " [draw lagging]" } else { "" },
        );
        if closing.load(Ordering::SeqCst) {
            break;
        }
    }

    scheduler.stop()?;
    log::info!("Engine stopped cleanly.");
    Ok(())
}
