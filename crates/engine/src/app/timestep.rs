use std::time::Duration;

use tracing::info;

use super::clock::Clock;
use super::metrics::LoopCounters;

const DEFAULT_TARGET_TPS: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimestepConfig {
    pub target_tps: f64,
    pub yield_sleep: Duration,
    pub report_interval_ms: u64,
}

impl Default for TimestepConfig {
    fn default() -> Self {
        Self {
            target_tps: DEFAULT_TARGET_TPS,
            yield_sleep: Duration::from_millis(2),
            report_interval_ms: 1000,
        }
    }
}

/// Converts elapsed counter ticks into whole simulation steps.
///
/// Elapsed time is accumulated as a fractional number of pending steps;
/// each consumed step removes exactly one unit, so the remainder carries
/// over to the next frame instead of being lost.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimestep {
    tick_interval: f64,
    unprocessed: f64,
    last_counter: u64,
}

impl FixedTimestep {
    pub fn new(frequency: u64, target_tps: f64, start_counter: u64) -> Self {
        let target_tps = if target_tps.is_finite() && target_tps > 0.0 {
            target_tps
        } else {
            DEFAULT_TARGET_TPS
        };
        Self {
            tick_interval: frequency.max(1) as f64 / target_tps,
            unprocessed: 0.0,
            last_counter: start_counter,
        }
    }

    /// Counter ticks per simulation step.
    pub fn tick_interval(&self) -> f64 {
        self.tick_interval
    }

    pub fn pending_steps(&self) -> f64 {
        self.unprocessed
    }

    pub fn accumulate(&mut self, now_counter: u64) {
        let elapsed = now_counter.saturating_sub(self.last_counter);
        self.unprocessed += elapsed as f64 / self.tick_interval;
        self.last_counter = now_counter;
    }

    pub fn consume_step(&mut self) -> bool {
        if self.unprocessed >= 1.0 {
            self.unprocessed -= 1.0;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// The per-iteration work the fixed-timestep loop drives.
pub trait LoopDriver {
    fn tick(&mut self);
    fn render(&mut self);
    fn poll_input(&mut self) -> LoopControl;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopSummary {
    pub total_ticks: u64,
    pub total_frames: u64,
}

/// Runs until the driver's input poll asks to exit.
///
/// Each iteration: accumulate elapsed time, run every complete pending tick,
/// yield for `yield_sleep`, render once, then poll input. Input gathered by
/// the poll is first seen by the ticks of the following iteration.
pub fn run_fixed_timestep<C, D>(clock: &C, config: &TimestepConfig, driver: &mut D) -> LoopSummary
where
    C: Clock + ?Sized,
    D: LoopDriver + ?Sized,
{
    let mut timestep = FixedTimestep::new(clock.frequency(), config.target_tps, clock.counter());
    let mut counters = LoopCounters::new(clock.millis(), config.report_interval_ms);
    let mut summary = LoopSummary::default();

    loop {
        timestep.accumulate(clock.counter());
        while timestep.consume_step() {
            counters.record_tick();
            summary.total_ticks = summary.total_ticks.saturating_add(1);
            driver.tick();
        }

        clock.sleep(config.yield_sleep);

        counters.record_frame();
        summary.total_frames = summary.total_frames.saturating_add(1);
        driver.render();
        let control = driver.poll_input();

        if let Some(report) = counters.maybe_report(clock.millis()) {
            info!(ticks = report.ticks, frames = report.frames, "loop_metrics");
        }

        if control == LoopControl::Exit {
            break;
        }
    }

    summary
}
