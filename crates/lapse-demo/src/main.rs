use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};

use lapse_engine::core::{App, AppControl, FrameCtx};
use lapse_engine::logging::{init_logging, LoggingConfig};
use lapse_engine::runtime::{Runtime, RuntimeConfig};
use lapse_engine::timers::{Scheduler, TimeUnit, TimerId, TimerRegistry, TimerSpec};

/// Countdown sequence: a heartbeat and a frame spinner run while a bounded
/// "charge" timer fills up; when it completes it schedules the launch, which
/// stops everything else.
#[derive(Default)]
struct Countdown {
    background: Rc<RefCell<Vec<TimerId>>>,
}

impl App for Countdown {
    fn on_start(&mut self, timers: &mut TimerRegistry) {
        if let Err(e) = self.schedule(timers) {
            log::error!("failed to schedule countdown: {e}");
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        // Safety net in case the sequence never completes.
        if ctx.frame_index() > 60 * 30 {
            log::warn!("countdown did not finish, giving up");
            return AppControl::Exit;
        }
        AppControl::Continue
    }

    fn on_exit(&mut self) {
        log::info!("countdown finished");
    }
}

impl Countdown {
    fn schedule(&self, timers: &mut TimerRegistry) -> Result<()> {
        let heartbeat = timers
            .create_simple_timer(
                |ctx| log::info!("heartbeat at {:.2}s", ctx.elapsed()),
                1.0,
                TimeUnit::Seconds,
            )
            .context("heartbeat")?;

        let spinner = timers
            .create_simple_timer(
                |ctx| log::debug!("spinner: frame {}", ctx.elapsed()),
                30.0,
                TimeUnit::Frames,
            )
            .context("spinner")?;

        self.background.borrow_mut().extend([heartbeat, spinner]);

        let background = Rc::clone(&self.background);
        let charge = TimerSpec::bounded(0.5, 2.0, 0.25, |ctx| {
            let pct = ctx.progress().unwrap_or(0.0).max(0.0) * 100.0;
            log::info!("charging {pct:>5.1}%");
        })
        .on_complete(move |ctx| {
            log::info!("charged; launch in 1s");
            let launch = ctx.create_one_shot_timer(
                move |ctx| {
                    log::info!("launch!");
                    for id in background.borrow_mut().drain(..) {
                        ctx.stop_timer(id);
                    }
                },
                1.0,
                TimeUnit::Seconds,
            );
            if let Err(e) = launch {
                log::error!("failed to schedule launch: {e}");
            }
        });
        timers.create(charge).context("charge")?;

        Ok(())
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        name: "countdown".to_string(),
        ..RuntimeConfig::default()
    };

    let summary = Runtime::run(config, Countdown::default()).context("countdown runtime failed")?;
    log::info!("ran {} frames", summary.frames);

    Ok(())
}
