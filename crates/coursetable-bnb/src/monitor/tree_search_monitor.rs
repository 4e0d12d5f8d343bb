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

//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait and `PruneReason` for observing and
//! controlling branch-and-bound. Callbacks track the solver lifecycle, and a
//! monitor can stop the search via `SearchCommand` (default: Continue).
//!
//! Lifecycle highlights
//! - enter → step → {prune | decisions/descend/backtrack} → solution → exit
//! - `BnbSolverStatistics` is provided to every callback.
//!
//! Design notes
//! - Methods take `&mut self`; monitors are single-threaded.
//! - Keep callbacks lightweight; they run in the hot loop.
//! - `&mut M` is a monitor too, so a caller can keep ownership and inspect
//!   the monitor after the run.

use crate::{decision::Decision, state::SearchState, stats::BnbSolverStatistics};
use coursetable_model::{catalog::Catalog, schedule::Schedule};
use coursetable_search::monitor::SearchCommand;

/// Reasons for pruning a search node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// The decision would break a hard constraint.
    Infeasible,
    /// The node cannot beat the incumbent.
    BoundDominated,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::Infeasible => write!(f, "Infeasible"),
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
        }
    }
}

/// Trait for monitoring and controlling the search process of the solver.
pub trait TreeSearchMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called when the search starts.
    fn on_enter_search(&mut self, catalog: &Catalog, statistics: &BnbSolverStatistics);
    /// Called when the search ends.
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics);
    /// Called once per step to determine whether the search goes on.
    fn search_command(
        &mut self,
        _state: &SearchState,
        _statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called at each step of the search.
    fn on_step(&mut self, state: &SearchState, statistics: &BnbSolverStatistics);
    /// Called when a decision or a node is pruned.
    fn on_prune(
        &mut self,
        state: &SearchState,
        reason: PruneReason,
        statistics: &BnbSolverStatistics,
    );
    /// Called when decisions are enqueued for exploration.
    fn on_decisions_enqueued(
        &mut self,
        state: &SearchState,
        count: usize,
        statistics: &BnbSolverStatistics,
    );
    /// Called after descending into a child node.
    fn on_descend(
        &mut self,
        state: &SearchState,
        decision: Decision,
        statistics: &BnbSolverStatistics,
    );
    /// Called when backtracking to a parent node.
    fn on_backtrack(&mut self, state: &SearchState, statistics: &BnbSolverStatistics);
    /// Called when a new incumbent is installed.
    fn on_solution_found(&mut self, schedule: &Schedule, statistics: &BnbSolverStatistics);
}

impl<M> TreeSearchMonitor for &mut M
where
    M: TreeSearchMonitor + ?Sized,
{
    #[inline(always)]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline(always)]
    fn on_enter_search(&mut self, catalog: &Catalog, statistics: &BnbSolverStatistics) {
        (**self).on_enter_search(catalog, statistics);
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics) {
        (**self).on_exit_search(statistics);
    }

    #[inline(always)]
    fn search_command(
        &mut self,
        state: &SearchState,
        statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        (**self).search_command(state, statistics)
    }

    #[inline(always)]
    fn on_step(&mut self, state: &SearchState, statistics: &BnbSolverStatistics) {
        (**self).on_step(state, statistics);
    }

    #[inline(always)]
    fn on_prune(
        &mut self,
        state: &SearchState,
        reason: PruneReason,
        statistics: &BnbSolverStatistics,
    ) {
        (**self).on_prune(state, reason, statistics);
    }

    #[inline(always)]
    fn on_decisions_enqueued(
        &mut self,
        state: &SearchState,
        count: usize,
        statistics: &BnbSolverStatistics,
    ) {
        (**self).on_decisions_enqueued(state, count, statistics);
    }

    #[inline(always)]
    fn on_descend(
        &mut self,
        state: &SearchState,
        decision: Decision,
        statistics: &BnbSolverStatistics,
    ) {
        (**self).on_descend(state, decision, statistics);
    }

    #[inline(always)]
    fn on_backtrack(&mut self, state: &SearchState, statistics: &BnbSolverStatistics) {
        (**self).on_backtrack(state, statistics);
    }

    #[inline(always)]
    fn on_solution_found(&mut self, schedule: &Schedule, statistics: &BnbSolverStatistics) {
        (**self).on_solution_found(schedule, statistics);
    }
}

impl std::fmt::Debug for dyn TreeSearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl std::fmt::Display for dyn TreeSearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}
