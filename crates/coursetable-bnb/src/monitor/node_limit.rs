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

/// A monitor that terminates the search once a number of nodes was explored.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct NodeLimitMonitor {
    node_limit: u64,
}

impl NodeLimitMonitor {
    /// Creates a new `NodeLimitMonitor`.
    #[inline]
    pub fn new(node_limit: u64) -> Self {
        Self { node_limit }
    }

    /// Returns the configured node limit.
    #[inline]
    pub fn node_limit(&self) -> u64 {
        self.node_limit
    }
}

impl std::fmt::Display for NodeLimitMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeLimitMonitor(node_limit: {})", self.node_limit)
    }
}

impl TreeSearchMonitor for NodeLimitMonitor {
    fn name(&self) -> &str {
        "NodeLimitMonitor"
    }

    fn on_enter_search(&mut self, _catalog: &Catalog, _statistics: &BnbSolverStatistics) {}

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {}

    #[inline]
    fn search_command(
        &mut self,
        _state: &SearchState,
        statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        if statistics.nodes_explored >= self.node_limit {
            return SearchCommand::Terminate(format!(
                "Node limit of {} reached",
                self.node_limit
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
