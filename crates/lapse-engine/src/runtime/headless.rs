use std::time::{Duration, Instant};

use anyhow::{bail, Result};

use crate::core::{App, AppControl, FrameCtx};
use crate::time::{FrameClock, FrameTime};
use crate::timers::TimerRegistry;

/// Source of per-frame delta time.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum ClockMode {
    /// Measured wall time, clamped by `FrameClock`.
    #[default]
    Realtime,
    /// Constant step per frame.
    Fixed(Duration),
}

/// Frame loop configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Name used in log lines.
    pub name: String,
    pub clock: ClockMode,
    /// Target frame duration. The loop sleeps for whatever is left of it after each
    /// frame; `None` runs frames back to back.
    pub frame_interval: Option<Duration>,
    /// Stop after this many frames.
    pub max_frames: Option<u64>,
    /// Stop once a frame ends with no registered timers.
    pub exit_when_idle: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            name: "lapse".to_string(),
            clock: ClockMode::Realtime,
            frame_interval: Some(Duration::from_micros(16_667)),
            max_frames: None,
            exit_when_idle: true,
        }
    }
}

/// Outcome of a finished run.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RunSummary {
    /// Frames handed to `App::on_frame`.
    pub frames: u64,
    /// Timers still registered when the loop ended.
    pub timers_remaining: usize,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs `app` until it exits, the frame limit is hit, or (optionally) no timers remain.
    ///
    /// Each frame: take a `FrameTime`, call `App::on_frame`, then tick the registry.
    pub fn run<A>(config: RuntimeConfig, mut app: A) -> Result<RunSummary>
    where
        A: App,
    {
        if config.max_frames.is_none() && !config.exit_when_idle {
            bail!(
                "runtime '{}' has no exit condition: set max_frames or exit_when_idle",
                config.name
            );
        }

        let mut clock = match config.clock {
            ClockMode::Realtime => FrameClock::new(),
            ClockMode::Fixed(step) => FrameClock::fixed(step),
        };
        let mut timers = TimerRegistry::new();

        log::info!("{}: runtime started ({:?})", config.name, config.clock);

        app.on_start(&mut timers);
        clock.reset();

        let mut frames = 0u64;
        loop {
            if config.max_frames.is_some_and(|max| frames >= max) {
                log::info!("{}: frame limit reached", config.name);
                break;
            }

            let started = Instant::now();
            let ft: FrameTime = clock.tick();

            let control = {
                let mut ctx = FrameCtx {
                    time: ft,
                    timers: &mut timers,
                };
                app.on_frame(&mut ctx)
            };
            frames += 1;

            if control == AppControl::Exit {
                log::info!("{}: exit requested by app", config.name);
                break;
            }

            timers.tick(ft.dt);

            if config.exit_when_idle && timers.is_empty() {
                log::info!("{}: no timers left", config.name);
                break;
            }

            if let Some(rest) = config
                .frame_interval
                .and_then(|interval| interval.checked_sub(started.elapsed()))
            {
                std::thread::sleep(rest);
            }
        }

        app.on_exit();

        let summary = RunSummary {
            frames,
            timers_remaining: timers.len(),
        };
        log::info!(
            "{}: runtime stopped after {} frames ({} timers remaining)",
            config.name,
            summary.frames,
            summary.timers_remaining
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::timers::{Scheduler, TimeUnit, TimerCtx};

    fn fixed(max_frames: Option<u64>, exit_when_idle: bool) -> RuntimeConfig {
        RuntimeConfig {
            name: "test".to_string(),
            clock: ClockMode::Fixed(Duration::from_millis(100)),
            frame_interval: None,
            max_frames,
            exit_when_idle,
        }
    }

    /// Registers a one-shot at startup and optionally exits at a given frame.
    struct Probe {
        fired: Rc<Cell<u32>>,
        exited: Rc<Cell<bool>>,
        delay: f32,
        exit_at: Option<u64>,
    }

    impl Probe {
        fn new(delay: f32, exit_at: Option<u64>) -> Self {
            Self {
                fired: Rc::new(Cell::new(0)),
                exited: Rc::new(Cell::new(false)),
                delay,
                exit_at,
            }
        }
    }

    impl App for Probe {
        fn on_start(&mut self, timers: &mut TimerRegistry) {
            let fired = Rc::clone(&self.fired);
            let bump = move |_: &mut TimerCtx<'_>| fired.set(fired.get() + 1);
            timers.create_one_shot_timer(bump, self.delay, TimeUnit::Seconds).unwrap();
        }

        fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
            assert_eq!(ctx.dt(), 0.1);
            if self.exit_at == Some(ctx.frame_index()) {
                AppControl::Exit
            } else {
                AppControl::Continue
            }
        }

        fn on_exit(&mut self) {
            self.exited.set(true);
        }
    }

    #[test]
    fn stops_when_idle() {
        let app = Probe::new(0.25, None);
        let (fired, exited) = (Rc::clone(&app.fired), Rc::clone(&app.exited));

        let summary = Runtime::run(fixed(None, true), app).unwrap();

        // 0.25s countdown at 0.1s per frame goes negative on frame 3.
        assert_eq!(summary, RunSummary { frames: 3, timers_remaining: 0 });
        assert_eq!(fired.get(), 1);
        assert!(exited.get());
    }

    #[test]
    fn stops_at_frame_limit() {
        let app = Probe::new(10.0, None);
        let fired = Rc::clone(&app.fired);

        let summary = Runtime::run(fixed(Some(5), true), app).unwrap();

        assert_eq!(summary, RunSummary { frames: 5, timers_remaining: 1 });
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn stops_on_app_exit() {
        let app = Probe::new(10.0, Some(1));
        let exited = Rc::clone(&app.exited);

        let summary = Runtime::run(fixed(None, true), app).unwrap();

        assert_eq!(summary.frames, 2);
        assert!(exited.get());
    }

    #[test]
    fn rejects_endless_config() {
        let err = Runtime::run(fixed(None, false), Probe::new(1.0, None)).unwrap_err();
        assert!(err.to_string().contains("no exit condition"));
    }
}
