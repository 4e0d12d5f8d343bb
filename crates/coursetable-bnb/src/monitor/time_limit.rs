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
use coursetable_search::monitor::SearchCommand;
use std::time::{Duration, Instant};

/// A monitor that terminates the search after a specified duration.
///
/// Checks the clock only every `check_interval` steps to minimize overhead.
#[derive(Clone, Debug)]
pub struct TimeLimitMonitor {
    time_limit: Duration,
    start_time: Option<Instant>,
    check_interval: u64,
    steps_since_last_check: u64,
}

impl TimeLimitMonitor {
    /// Creates a new `TimeLimitMonitor` with the specified duration and check interval.
    /// `check_interval` specifies how many steps to take between time checks.
    /// A higher value reduces overhead but may lead to slightly exceeding the time limit.
    pub fn new(time_limit: Duration, check_interval: u64) -> Self {
        Self {
            time_limit,
            start_time: None,
            check_interval: check_interval.max(1),
            steps_since_last_check: 0,
        }
    }

    /// Creates a new `TimeLimitMonitor` with a default check interval of 10,000 steps.
    pub fn with_default_check_interval(time_limit: Duration) -> Self {
        Self::new(time_limit, 10_000)
    }

    /// Returns the configured time limit.
    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl std::fmt::Display for TimeLimitMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TimeLimitMonitor(time_limit: {:.3}s, check_interval: {})",
            self.time_limit.as_secs_f64(),
            self.check_interval
        )
    }
}

impl TreeSearchMonitor for TimeLimitMonitor {
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _catalog: &Catalog, _statistics: &BnbSolverStatistics) {
        self.start_time = Some(Instant::now());
        self.steps_since_last_check = 0;
    }

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {
        self.start_time = None;
    }

    fn search_command(
        &mut self,
        _state: &SearchState,
        _statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        self.steps_since_last_check = self.steps_since_last_check.saturating_add(1);

        if self.steps_since_last_check >= self.check_interval {
            self.steps_since_last_check = 0;

            if let Some(start) = self.start_time
                && start.elapsed() > self.time_limit
            {
                return SearchCommand::Terminate(format!(
                    "Time limit of {:.3} seconds exceeded",
                    self.time_limit.as_secs_f64()
                ));
            }
        }

        SearchCommand::Continue
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
        _state: &SearchState,
        _decision: Decision,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    fn on_backtrack(&mut self, _state: &SearchState, _statistics: &BnbSolverStatistics) {}

    fn on_solution_found(&mut self, _schedule: &Schedule, _statistics: &BnbSolverStatistics) {}
}
