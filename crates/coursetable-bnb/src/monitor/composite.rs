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

//! Monitoring combinators for tree search
//!
//! Provides `CompositeTreeSearchMonitor`, a fan-out monitor that forwards every
//! event to its children, so logging and early stopping can be mixed without
//! coupling them to the solver.
//!
//! Behavior
//! - Events are dispatched to child monitors in insertion order.
//! - `search_command` short-circuits on the first non-`Continue` response;
//!   put stricter stop conditions first.
//! - Other callbacks always fan out to all children.

use crate::{
    decision::Decision,
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    state::SearchState,
    stats::BnbSolverStatistics,
};
use coursetable_model::{catalog::Catalog, schedule::Schedule};
use coursetable_search::monitor::SearchCommand;

/// A tree search monitor that forwards events to a list of child monitors.
#[derive(Default)]
pub struct CompositeTreeSearchMonitor<'a> {
    monitors: Vec<Box<dyn TreeSearchMonitor + 'a>>,
}

impl<'a> CompositeTreeSearchMonitor<'a> {
    /// Creates a new empty `CompositeTreeSearchMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeTreeSearchMonitor` with room for `capacity` monitors.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: TreeSearchMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn TreeSearchMonitor + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns a slice of the monitors contained in the composite monitor.
    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn TreeSearchMonitor + 'a>] {
        &self.monitors
    }

    /// Returns the number of child monitors.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if the composite monitor contains no monitors.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a> FromIterator<Box<dyn TreeSearchMonitor + 'a>> for CompositeTreeSearchMonitor<'a> {
    #[inline(always)]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn TreeSearchMonitor + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Debug for CompositeTreeSearchMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeTreeSearchMonitor")
            .field("monitors", &self.monitors)
            .finish()
    }
}

impl TreeSearchMonitor for CompositeTreeSearchMonitor<'_> {
    #[inline(always)]
    fn name(&self) -> &str {
        "CompositeTreeSearchMonitor"
    }

    #[inline(always)]
    fn on_enter_search(&mut self, catalog: &Catalog, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(catalog, statistics);
        }
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }

    #[inline(always)]
    fn search_command(
        &mut self,
        state: &SearchState,
        statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        for monitor in &mut self.monitors {
            let command = monitor.search_command(state, statistics);
            if !matches!(command, SearchCommand::Continue) {
                return command;
            }
        }
        SearchCommand::Continue
    }

    #[inline(always)]
    fn on_step(&mut self, state: &SearchState, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_step(state, statistics);
        }
    }

    #[inline(always)]
    fn on_prune(
        &mut self,
        state: &SearchState,
        reason: PruneReason,
        statistics: &BnbSolverStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_prune(state, reason, statistics);
        }
    }

    #[inline(always)]
    fn on_decisions_enqueued(
        &mut self,
        state: &SearchState,
        count: usize,
        statistics: &BnbSolverStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_decisions_enqueued(state, count, statistics);
        }
    }

    #[inline(always)]
    fn on_descend(
        &mut self,
        state: &SearchState,
        decision: Decision,
        statistics: &BnbSolverStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_descend(state, decision, statistics);
        }
    }

    #[inline(always)]
    fn on_backtrack(&mut self, state: &SearchState, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_backtrack(state, statistics);
        }
    }

    #[inline(always)]
    fn on_solution_found(&mut self, schedule: &Schedule, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(schedule, statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{node_limit::NodeLimitMonitor, no_op::NoOperationMonitor};

    #[derive(Default)]
    struct Counting {
        steps: usize,
        solutions: usize,
        stop: bool,
    }

    impl TreeSearchMonitor for Counting {
        fn name(&self) -> &str {
            "Counting"
        }
        fn on_enter_search(&mut self, _catalog: &Catalog, _statistics: &BnbSolverStatistics) {}
        fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {}
        fn search_command(
            &mut self,
            _state: &SearchState,
            _statistics: &BnbSolverStatistics,
        ) -> SearchCommand {
            if self.stop {
                SearchCommand::Terminate("counting".to_string())
            } else {
                SearchCommand::Continue
            }
        }
        fn on_step(&mut self, _state: &SearchState, _statistics: &BnbSolverStatistics) {
            self.steps += 1;
        }
        fn on_prune(&mut self, _: &SearchState, _: PruneReason, _: &BnbSolverStatistics) {}
        fn on_decisions_enqueued(&mut self, _: &SearchState, _: usize, _: &BnbSolverStatistics) {}
        fn on_descend(&mut self, _: &SearchState, _: Decision, _: &BnbSolverStatistics) {}
        fn on_backtrack(&mut self, _: &SearchState, _: &BnbSolverStatistics) {}
        fn on_solution_found(&mut self, _: &Schedule, _: &BnbSolverStatistics) {
            self.solutions += 1;
        }
    }

    #[test]
    fn test_fans_out_to_all_children() {
        let mut first = Counting::default();
        let mut second = Counting::default();
        let state = SearchState::new(0);
        let stats = BnbSolverStatistics::default();
        {
            let mut composite = CompositeTreeSearchMonitor::new();
            composite.add_monitor(&mut first);
            composite.add_monitor(&mut second);
            assert_eq!(composite.len(), 2);
            composite.on_step(&state, &stats);
            composite.on_step(&state, &stats);
            composite.on_solution_found(&Schedule::empty(), &stats);
        }
        assert_eq!((first.steps, first.solutions), (2, 1));
        assert_eq!((second.steps, second.solutions), (2, 1));
    }

    #[test]
    fn test_first_termination_wins() {
        let state = SearchState::new(0);
        let stats = BnbSolverStatistics::default();
        let mut composite = CompositeTreeSearchMonitor::with_capacity(3);
        composite.add_monitor(NoOperationMonitor::new());
        composite.add_monitor(NodeLimitMonitor::new(0));
        composite.add_monitor(Counting {
            stop: true,
            ..Default::default()
        });
        assert_eq!(
            composite.search_command(&state, &stats),
            SearchCommand::Terminate("Node limit of 0 reached".to_string())
        );
    }

    #[test]
    fn test_empty_composite_continues() {
        let mut composite = CompositeTreeSearchMonitor::default();
        assert!(composite.is_empty());
        assert_eq!(
            composite.search_command(&SearchState::new(0), &BnbSolverStatistics::default()),
            SearchCommand::Continue
        );
    }
}
