/// Tick and frame totals for one reporting window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopReport {
    pub ticks: u32,
    pub frames: u32,
}

/// Counts ticks and frames and hands out a report once per interval of the
/// millisecond clock. The window start advances by whole intervals so a slow
/// iteration does not drift the reporting cadence.
#[derive(Debug)]
pub struct LoopCounters {
    window_start_ms: u64,
    interval_ms: u64,
    ticks: u32,
    frames: u32,
}

impl LoopCounters {
    pub fn new(start_ms: u64, interval_ms: u64) -> Self {
        Self {
            window_start_ms: start_ms,
            interval_ms: interval_ms.max(1),
            ticks: 0,
            frames: 0,
        }
    }

    pub fn record_tick(&mut self) {
        self.ticks = self.ticks.saturating_add(1);
    }

    pub fn record_frame(&mut self) {
        self.frames = self.frames.saturating_add(1);
    }

    pub fn maybe_report(&mut self, now_ms: u64) -> Option<LoopReport> {
        if now_ms.saturating_sub(self.window_start_ms) <= self.interval_ms {
            return None;
        }

        let report = LoopReport {
            ticks: self.ticks,
            frames: self.frames,
        };
        self.window_start_ms = self.window_start_ms.saturating_add(self.interval_ms);
        self.ticks = 0;
        self.frames = 0;
        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_carries_counts_and_resets() {
        let mut counters = LoopCounters::new(0, 1000);
        for _ in 0..60 {
            counters.record_tick();
        }
        counters.record_frame();
        counters.record_frame();

        let report = counters.maybe_report(1001).expect("report after interval");
        assert_eq!(report, LoopReport { ticks: 60, frames: 2 });

        counters.record_tick();
        assert_eq!(
            counters.maybe_report(2002),
            Some(LoopReport { ticks: 1, frames: 0 })
        );
    }

    #[test]
    fn no_report_until_interval_has_fully_elapsed() {
        let mut counters = LoopCounters::new(500, 1000);
        counters.record_frame();

        assert!(counters.maybe_report(1000).is_none());
        assert!(counters.maybe_report(1500).is_none());
        assert!(counters.maybe_report(1501).is_some());
    }

    #[test]
    fn window_advances_by_whole_intervals() {
        let mut counters = LoopCounters::new(0, 1000);
        assert!(counters.maybe_report(3500).is_some());
        assert!(counters.maybe_report(3500).is_some());
        assert!(counters.maybe_report(3500).is_some());
        assert!(counters.maybe_report(3500).is_none());
    }
}
