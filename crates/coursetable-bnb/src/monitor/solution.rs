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

/// A monitor that terminates the search after a number of improving solutions.
///
/// Useful to stop at the first feasible improvement when any good schedule
/// is acceptable.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SolutionLimitMonitor {
    solution_limit: u64,
}

impl SolutionLimitMonitor {
    /// Creates a new `SolutionLimitMonitor`.
    #[inline]
    pub fn new(solution_limit: u64) -> Self {
        Self { solution_limit }
    }

    /// Returns the configured solution limit.
    #[inline]
    pub fn solution_limit(&self) -> u64 {
        self.solution_limit
    }
}

impl std::fmt::Display for SolutionLimitMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SolutionLimitMonitor(solution_limit: {})",
            self.solution_limit
        )
    }
}

impl TreeSearchMonitor for SolutionLimitMonitor {
    fn name(&self) -> &str {
        "SolutionLimitMonitor"
    }

    fn on_enter_search(&mut self, _catalog: &Catalog, _statistics: &BnbSolverStatistics) {}

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {}

    #[inline]
    fn search_command(
        &mut self,
        _state: &SearchState,
        statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        if statistics.solutions_found >= self.solution_limit {
            return SearchCommand::Terminate(format!(
                "Solution limit of {} reached",
                self.solution_limit
            ));
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminates_after_enough_solutions() {
        let mut monitor = SolutionLimitMonitor::new(1);
        let state = SearchState::new(0);
        let mut stats = BnbSolverStatistics::default();
        assert_eq!(
            monitor.search_command(&state, &stats),
            SearchCommand::Continue
        );
        stats.solutions_found = 1;
        assert!(matches!(
            monitor.search_command(&state, &stats),
            SearchCommand::Terminate(_)
        ));
    }
}
