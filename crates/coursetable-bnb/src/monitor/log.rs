// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::{
    decision::Decision,
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    state::SearchState,
    stats::BnbSolverStatistics,
};
use coursetable_model::{catalog::Catalog, schedule::Schedule};
use std::time::{Duration, Instant};

/// Emits a progress table through the `log` facade at `info` level.
///
/// The clock is only read when `nodes_explored & clock_check_mask == 0`,
/// so the mask should be one less than a power of two.
#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best: Option<(u32, f64)>,
}

impl LogTreeSearchMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best: None,
        }
    }

    #[inline(always)]
    fn log_header(&self) {
        log::info!(
            "{:<9} | {:<14} | {:<7} | {:<16} | {:<16} | {:<10} | {:<10}",
            "Elapsed",
            "Nodes",
            "Depth",
            "Best (cr / gap)",
            "Node (cr / gap)",
            "Backtracks",
            "Pruned"
        );
        log::info!("{}", "-".repeat(101));
    }

    #[inline(always)]
    fn log_line(&mut self, state: &SearchState, stats: &BnbSolverStatistics) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();

        let best = match self.best {
            Some((credits, gap)) => format!("{} / {:.2}h", credits, gap),
            None => "-".to_string(),
        };
        let current = format!("{} / {:.2}h", state.credits(), state.gap());

        log::info!(
            "{:<9} | {:<14} | {:<7} | {:<16} | {:<16} | {:<10} | {:<10}",
            format!("{:.1}s", elapsed),
            stats.nodes_explored,
            state.num_decided(),
            best,
            current,
            stats.backtracks,
            stats.prunings_bound + stats.prunings_infeasible
        );

        self.last_log_time = now;
    }
}

impl Default for LogTreeSearchMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl std::fmt::Display for LogTreeSearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogTreeSearchMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl TreeSearchMonitor for LogTreeSearchMonitor {
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, catalog: &Catalog, _statistics: &BnbSolverStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best = None;
        log::info!("Searching {} courses", catalog.len());
        self.log_header();
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics) {
        log::info!("{}", "-".repeat(101));
        log::info!(
            "Search finished after {} nodes in {:.3}s",
            statistics.nodes_explored,
            statistics.time_total.as_secs_f64()
        );
    }

    fn on_step(&mut self, _state: &SearchState, _statistics: &BnbSolverStatistics) {}

    fn on_prune(
        &mut self,
        _state: &SearchState,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    fn on_decisions_enqueued(
        &mut self,
        _state: &SearchState,
        _count: usize,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    fn on_descend(
        &mut self,
        state: &SearchState,
        _decision: Decision,
        statistics: &BnbSolverStatistics,
    ) {
        if (statistics.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(state, statistics);
        }
    }

    fn on_backtrack(&mut self, _state: &SearchState, _statistics: &BnbSolverStatistics) {}

    fn on_solution_found(&mut self, schedule: &Schedule, _statistics: &BnbSolverStatistics) {
        self.best = Some((schedule.total_credits(), schedule.total_gap()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_best_solution_and_resets() {
        let mut monitor = LogTreeSearchMonitor::default();
        let stats = BnbSolverStatistics::default();
        monitor.on_solution_found(&Schedule::empty(), &stats);
        assert_eq!(monitor.best, Some((0, 0.0)));

        monitor.on_enter_search(&Catalog::default(), &stats);
        assert_eq!(monitor.best, None);
    }

    #[test]
    fn test_display() {
        let monitor = LogTreeSearchMonitor::new(Duration::from_secs(2), 1023);
        assert_eq!(
            monitor.to_string(),
            "LogTreeSearchMonitor(log_interval: 2s, clock_check_mask: 1023)"
        );
    }
}
