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

//! Branch-and-Bound solver for single-semester course selection.
//!
//! This module implements a stateful search engine that decides, course by
//! course, whether to include or exclude it, while pruning branches whose
//! optimistic bound cannot beat the incumbent. The `BnbSolver` owns reusable
//! trail and stack storage; a preallocation path minimizes memory churn
//! across repeated solves, and a fast `reset` keeps capacities while clearing
//! per-run state.
//!
//! A search session object encapsulates per-run state, statistics and timing.
//! The objective is supplied as an `ObjectiveStrategy`, so the loop below is
//! shared by every objective. The convenience entry points at the bottom of
//! the module cover the common cases with a fresh solver and no monitor.

use crate::{
    decision::{Decision, DecisionKind},
    incumbent::Incumbent,
    monitor::{
        no_op::NoOperationMonitor,
        tree_search_monitor::{PruneReason, TreeSearchMonitor},
    },
    objective::{
        ObjectiveStrategy, combined::CombinedStrategy, max_credits::MaxCreditsStrategy,
        min_gap::MinGapStrategy,
    },
    order::{Requirement, SearchOrder},
    result::BnbSolverOutcome,
    stack::SearchStack,
    state::SearchState,
    stats::BnbSolverStatistics,
    trail::SearchTrail,
};
use coursetable_model::{
    catalog::Catalog,
    schedule::{Schedule, Selection},
};
use coursetable_search::{monitor::SearchCommand, objective::Objective, result::TerminationReason};

/// An exact branch-and-bound solver for the course selection problem.
///
/// Note that this is just the execution engine: the order of the courses, the
/// bounds and the comparison of objective values are provided by an
/// `ObjectiveStrategy`.
#[derive(Clone, Debug, Default)]
pub struct BnbSolver {
    trail: SearchTrail,
    stack: SearchStack,
}

impl BnbSolver {
    /// Create a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            trail: SearchTrail::new(),
            stack: SearchStack::new(),
        }
    }

    /// Create a new solver instance with storage preallocated for catalogs
    /// of up to `num_courses` courses.
    ///
    /// # Note
    ///
    /// The solver grows its storage on demand anyway; preallocating only moves
    /// the cost of the allocations to construction time.
    #[inline]
    pub fn preallocated(num_courses: usize) -> Self {
        Self {
            trail: SearchTrail::preallocated(num_courses),
            stack: SearchStack::preallocated(num_courses),
        }
    }

    /// Solve the catalog under `strategy`, with no completed courses.
    #[inline]
    pub fn solve<S, M>(
        &mut self,
        catalog: &Catalog,
        strategy: &S,
        monitor: M,
    ) -> BnbSolverOutcome<S::Value>
    where
        S: ObjectiveStrategy,
        M: TreeSearchMonitor,
    {
        self.solve_internal(catalog, &Selection::new(), strategy, monitor)
    }

    /// Solve the catalog under `strategy`. Prerequisites listed in
    /// `completed` count as satisfied without being scheduled.
    #[inline]
    pub fn solve_with_completed<S, M>(
        &mut self,
        catalog: &Catalog,
        completed: &Selection,
        strategy: &S,
        monitor: M,
    ) -> BnbSolverOutcome<S::Value>
    where
        S: ObjectiveStrategy,
        M: TreeSearchMonitor,
    {
        self.solve_internal(catalog, completed, strategy, monitor)
    }

    /// Solve the catalog for an algorithm-neutral `Objective`.
    ///
    /// The objective value of the outcome is reported as a single number:
    /// the credits for `MaxCredits`, the gap for `MinGap` and the score for
    /// `Combined`.
    ///
    /// # Panics
    ///
    /// Panics if `objective` is a combined objective with an invalid penalty.
    pub fn solve_objective<M>(
        &mut self,
        catalog: &Catalog,
        completed: &Selection,
        objective: &Objective,
        monitor: M,
    ) -> BnbSolverOutcome<f64>
    where
        M: TreeSearchMonitor,
    {
        match *objective {
            Objective::MaxCredits => self
                .solve_internal(catalog, completed, &MaxCreditsStrategy::new(), monitor)
                .map_value(f64::from),
            Objective::MinGap => self
                .solve_internal(catalog, completed, &MinGapStrategy::new(), monitor)
                .map_value(|value| value.gap),
            Objective::Combined { penalty } => self.solve_internal(
                catalog,
                completed,
                &CombinedStrategy::new(penalty),
                monitor,
            ),
        }
    }

    fn solve_internal<S, M>(
        &mut self,
        catalog: &Catalog,
        completed: &Selection,
        strategy: &S,
        mut monitor: M,
    ) -> BnbSolverOutcome<S::Value>
    where
        S: ObjectiveStrategy,
        M: TreeSearchMonitor,
    {
        let session =
            BnbSolverSearchSession::new(self, catalog, completed, strategy, &mut monitor);
        let outcome = session.run();
        self.reset();
        outcome
    }

    /// Reset the internal state of the solver.
    ///
    /// # Note
    ///
    /// This does not deallocate any memory used by the trail or stack,
    /// but only resets their logical state.
    #[inline]
    fn reset(&mut self) {
        self.trail.reset();
        self.stack.reset();
    }
}

/// A search session for the branch-and-bound solver.
/// This struct encapsulates the state and logic of a single search run.
struct BnbSolverSearchSession<'a, S, M>
where
    S: ObjectiveStrategy,
{
    solver: &'a mut BnbSolver,
    catalog: &'a Catalog,
    strategy: &'a S,
    monitor: &'a mut M,
    order: SearchOrder,
    state: SearchState,
    incumbent: Incumbent<S::Value>,
    stats: BnbSolverStatistics,
    start_time: std::time::Instant,
}

impl<S, M> std::fmt::Debug for BnbSolverSearchSession<'_, S, M>
where
    S: ObjectiveStrategy,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("strategy", &self.strategy.name())
            .field("state", &self.state)
            .field("incumbent", &self.incumbent)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<S, M> std::fmt::Display for BnbSolverSearchSession<'_, S, M>
where
    S: ObjectiveStrategy,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchSession(strategy: {}, best: {} = {}, nodes: {})",
            self.strategy.name(),
            self.incumbent.schedule(),
            self.incumbent.value(),
            self.stats.nodes_explored
        )
    }
}

impl<'a, S, M> BnbSolverSearchSession<'a, S, M>
where
    S: ObjectiveStrategy,
    M: TreeSearchMonitor,
{
    /// Create a new search session.
    #[inline]
    fn new(
        solver: &'a mut BnbSolver,
        catalog: &'a Catalog,
        completed: &Selection,
        strategy: &'a S,
        monitor: &'a mut M,
    ) -> Self {
        let order = SearchOrder::new(catalog, completed, |a, b| strategy.compare_courses(a, b));
        let state = SearchState::new(order.len());
        let incumbent = Incumbent::empty(strategy.value(0, 0.0));

        Self {
            solver,
            catalog,
            strategy,
            monitor,
            order,
            state,
            incumbent,
            stats: BnbSolverStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Run the search session.
    #[inline]
    fn run(mut self) -> BnbSolverOutcome<S::Value> {
        self.monitor.on_enter_search(self.catalog, &self.stats);
        self.initialize();

        let termination_reason = loop {
            self.monitor.on_step(&self.state, &self.stats);
            self.stats.on_step();

            if let SearchCommand::Terminate(msg) =
                self.monitor.search_command(&self.state, &self.stats)
            {
                break TerminationReason::Aborted(msg);
            }

            if self.solver.stack.is_current_level_empty() {
                if self.solver.stack.depth() <= 1 {
                    break TerminationReason::OptimalityProven;
                }
                self.backtrack_step();
            } else {
                self.process_next_decision();
            }
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);

        log::debug!(
            "branch-and-bound ({}) finished with {} after {} nodes: {} = {}",
            self.strategy.name(),
            termination_reason,
            self.stats.nodes_explored,
            self.incumbent.schedule(),
            self.incumbent.value()
        );

        self.finalize_result(termination_reason)
    }

    /// Finalize the solver result based on the incumbent and the
    /// termination reason.
    ///
    /// # Note
    ///
    /// This consumes self.
    #[inline]
    fn finalize_result(self, reason: TerminationReason) -> BnbSolverOutcome<S::Value> {
        let (value, schedule) = self.incumbent.into_parts();
        match reason {
            TerminationReason::OptimalityProven => {
                BnbSolverOutcome::optimal(schedule, value, self.stats)
            }
            TerminationReason::Aborted(msg) => {
                BnbSolverOutcome::aborted(schedule, value, msg, self.stats)
            }
        }
    }

    /// Initialize the search session.
    ///
    /// Makes sure the trail and stack do not have to grow during the search,
    /// sets up the root frame and enqueues the root decisions unless the root
    /// bound already fails to beat the empty schedule.
    #[inline]
    fn initialize(&mut self) {
        let n = self.order.len();
        self.solver.trail.ensure_capacity(n);
        self.solver.stack.ensure_capacity(n);

        debug_assert!(
            self.solver.trail.is_empty() && self.solver.stack.is_empty(),
            "called `BnbSolverSearchSession::initialize` with a dirty solver: {} trail entries, {} stack entries",
            self.solver.trail.num_entries(),
            self.solver.stack.num_entries()
        );

        // Root frame. Crucial to have this before pushing decisions!
        self.solver.trail.push_frame();
        self.solver.stack.push_frame();
        self.stats.on_node_explored();
        self.stats.on_depth_update(self.solver.stack.depth() as u64);

        if self.state.is_complete() {
            return;
        }

        if !self.is_bound_promising() {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(&self.state, PruneReason::BoundDominated, &self.stats);
            return;
        }

        self.enqueue_decisions();
    }

    #[inline]
    fn backtrack_step(&mut self) {
        self.stats.on_backtrack();
        self.monitor.on_backtrack(&self.state, &self.stats);

        self.solver.trail.backtrack(&mut self.state);
        self.solver.stack.pop_frame();
    }

    /// Process the next decision from the stack.
    #[inline(always)]
    fn process_next_decision(&mut self) {
        let Some(decision) = self.solver.stack.pop() else {
            return;
        };

        debug_assert!(
            decision.position() == self.state.next_position(),
            "called `BnbSolverSearchSession::process_next_decision` with decision for position {} but the next open position is {}",
            decision.position(),
            self.state.next_position()
        );

        self.stats.on_decision_generated();
        self.descend(decision);
    }

    /// Descend into the child node produced by `decision`.
    #[inline(always)]
    fn descend(&mut self, decision: Decision) {
        let position = decision.position();

        self.solver.trail.push_frame();
        match decision.kind() {
            DecisionKind::Include => self.solver.trail.apply_include(
                &mut self.state,
                position,
                self.order.interval(position),
                self.order.credits(position),
            ),
            DecisionKind::Exclude => self.solver.trail.apply_exclude(&mut self.state, position),
        }
        self.solver.stack.push_frame();

        debug_assert_eq!(
            self.solver.trail.depth(),
            self.solver.stack.depth(),
            "trail and stack frames out of sync after descending on {}",
            decision
        );

        self.stats.on_node_explored();
        self.stats.on_depth_update(self.solver.stack.depth() as u64);
        self.monitor.on_descend(&self.state, decision, &self.stats);

        if self.state.is_complete() {
            self.handle_complete_solution();
            return;
        }

        // Node-level bound check
        if !self.is_bound_promising() {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(&self.state, PruneReason::BoundDominated, &self.stats);
            self.backtrack_step();
            return;
        }

        self.enqueue_decisions();
    }

    /// Returns `true` if some completion of the current node could still be
    /// strictly better than the incumbent.
    #[inline(always)]
    fn is_bound_promising(&self) -> bool {
        let bound = self.strategy.bound(&self.state, &self.order);
        self.strategy.is_better(&bound, self.incumbent.value())
    }

    /// Pushes the legal decisions for the next open position onto the
    /// current stack level. EXCLUDE is pushed first so INCLUDE is explored
    /// first.
    #[inline(always)]
    fn enqueue_decisions(&mut self) {
        let position = self.state.next_position();
        let mut count = 0;

        if self.can_exclude(position) {
            self.solver.stack.push(Decision::exclude(position));
            count += 1;
        } else {
            self.stats.on_pruning_infeasible();
            self.monitor
                .on_prune(&self.state, PruneReason::Infeasible, &self.stats);
        }

        if self.can_include(position) {
            self.solver.stack.push(Decision::include(position));
            count += 1;
        } else {
            self.stats.on_pruning_infeasible();
            self.monitor
                .on_prune(&self.state, PruneReason::Infeasible, &self.stats);
        }

        self.monitor
            .on_decisions_enqueued(&self.state, count, &self.stats);
    }

    /// A course can be included if it does not overlap the timeline and every
    /// prerequisite that was already decided has been accepted. Prerequisites
    /// later in the order become obligations, checked by `can_exclude`.
    #[inline(always)]
    fn can_include(&self, position: usize) -> bool {
        let prerequisites = match self.order.requirement(position) {
            Requirement::Unschedulable => return false,
            Requirement::Pending(prerequisites) => prerequisites,
        };

        let obligations_met = prerequisites
            .iter()
            .all(|&p| p > position || self.state.is_selected(p));

        obligations_met && !self.state.conflicts(&self.order.interval(position))
    }

    /// A course can be excluded unless an accepted course depends on it.
    #[inline(always)]
    fn can_exclude(&self, position: usize) -> bool {
        !self
            .order
            .dependents(position)
            .iter()
            .any(|&d| d < position && self.state.is_selected(d))
    }

    /// Handle a complete selection at the current node.
    #[inline(always)]
    fn handle_complete_solution(&mut self) {
        let value = self
            .strategy
            .value(self.state.credits(), self.state.gap());

        if !self.strategy.is_better(&value, self.incumbent.value()) {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(&self.state, PruneReason::BoundDominated, &self.stats);
            return;
        }

        let schedule = Schedule::from_courses(self.state.timeline().iter().map(|entry| {
            self.catalog
                .course(self.order.course_index(entry.position()))
        }));

        self.stats.on_solution_found();
        self.monitor.on_solution_found(&schedule, &self.stats);
        self.incumbent.install(value, schedule);
    }
}

/// Returns an optimal schedule maximizing the total credits.
pub fn max_credits(catalog: &Catalog) -> Schedule {
    BnbSolver::new()
        .solve(catalog, &MaxCreditsStrategy::new(), NoOperationMonitor::new())
        .into_schedule()
}

/// Returns an optimal schedule minimizing the total gap, preferring more
/// credits among equal gaps.
pub fn min_gap(catalog: &Catalog) -> Schedule {
    BnbSolver::new()
        .solve(catalog, &MinGapStrategy::new(), NoOperationMonitor::new())
        .into_schedule()
}

/// Returns an optimal schedule maximizing `credits - penalty * gap`.
///
/// # Panics
///
/// Panics if `penalty` is negative or not finite.
pub fn combined(catalog: &Catalog, penalty: f64) -> Schedule {
    BnbSolver::new()
        .solve(
            catalog,
            &CombinedStrategy::new(penalty),
            NoOperationMonitor::new(),
        )
        .into_schedule()
}

/// Returns an optimal schedule for `objective`.
pub fn search(catalog: &Catalog, objective: &Objective) -> Schedule {
    search_with_completed(catalog, &Selection::new(), objective)
}

/// Returns an optimal schedule for `objective`, treating the courses in
/// `completed` as already passed.
pub fn search_with_completed(
    catalog: &Catalog,
    completed: &Selection,
    objective: &Objective,
) -> Schedule {
    BnbSolver::new()
        .solve_objective(catalog, completed, objective, NoOperationMonitor::new())
        .into_schedule()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{
        composite::CompositeTreeSearchMonitor, log::LogTreeSearchMonitor,
        node_limit::NodeLimitMonitor, solution::SolutionLimitMonitor,
    };
    use crate::objective::testing::{catalog_from_specs, course_specs, CourseSpec};
    use coursetable_model::{course::Course, timing::validate_selection};
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn course(id: &str, start: f64, end: f64, credits: u32) -> Course {
        Course::new(id, id, start, end, credits).unwrap()
    }

    fn ids(schedule: &Schedule) -> Vec<&str> {
        schedule.selection().iter().collect()
    }

    /// The best value over every feasible subset of the catalog.
    fn brute_force<S>(catalog: &Catalog, completed: &Selection, strategy: &S) -> S::Value
    where
        S: ObjectiveStrategy,
    {
        let n = catalog.len();
        assert!(n <= 16);
        let mut best = strategy.value(0, 0.0);
        for mask in 0u32..(1u32 << n) {
            let courses: Vec<&Course> = (0..n)
                .filter(|&i| mask & (1 << i) != 0)
                .map(|i| &catalog.courses()[i])
                .collect();
            let schedule = Schedule::from_courses(courses.iter().copied());
            if validate_selection(catalog, schedule.selection(), completed).is_err() {
                continue;
            }
            let value = strategy.value(schedule.total_credits(), schedule.total_gap());
            if strategy.is_better(&value, &best) {
                best = value;
            }
        }
        best
    }

    fn assert_optimal<S>(catalog: &Catalog, completed: &Selection, strategy: &S)
    where
        S: ObjectiveStrategy,
    {
        let outcome = BnbSolver::new().solve_with_completed(
            catalog,
            completed,
            strategy,
            NoOperationMonitor::new(),
        );
        assert!(outcome.is_optimal());

        let schedule = outcome.schedule();
        assert!(
            validate_selection(catalog, schedule.selection(), completed).is_ok(),
            "{}: infeasible schedule {}",
            strategy.name(),
            schedule
        );

        let found = strategy.value(schedule.total_credits(), schedule.total_gap());
        let best = brute_force(catalog, completed, strategy);
        assert!(
            !strategy.is_better(&best, &found) && !strategy.is_better(&found, &best),
            "{}: found {} but the optimum is {} in\n{}",
            strategy.name(),
            found,
            best,
            catalog
        );
    }

    fn random_catalog(rng: &mut ChaCha8Rng, n: usize) -> Catalog {
        let specs: Vec<CourseSpec> = (0..n)
            .map(|_| {
                let prerequisite = if rng.random_bool(0.25) {
                    Some(rng.random_range(0..n + 2))
                } else {
                    None
                };
                (
                    rng.random_range(7..19),
                    rng.random_range(1..4),
                    rng.random_range(1..7),
                    prerequisite,
                )
            })
            .collect();
        catalog_from_specs(&specs)
    }

    fn divergence_catalog() -> Catalog {
        Catalog::new(vec![
            course("A", 8.0, 10.0, 4),
            course("B", 10.0, 12.0, 4),
            course("C", 8.0, 13.0, 8),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_catalog_yields_empty_schedule() {
        let catalog = Catalog::default();
        for objective in [
            Objective::MaxCredits,
            Objective::MinGap,
            Objective::combined(0.5),
        ] {
            assert_eq!(search(&catalog, &objective), Schedule::empty());
        }

        let outcome = BnbSolver::new().solve(
            &catalog,
            &MaxCreditsStrategy::new(),
            NoOperationMonitor::new(),
        );
        assert!(outcome.is_optimal());
        assert_eq!(outcome.objective_value(), &0);
        assert_eq!(outcome.statistics().nodes_explored, 1);
    }

    #[test]
    fn test_single_course_is_always_selected() {
        let catalog = Catalog::new(vec![course("A", 9.0, 11.0, 3)]).unwrap();
        for schedule in [
            max_credits(&catalog),
            min_gap(&catalog),
            combined(&catalog, 0.0),
            combined(&catalog, 10.0),
        ] {
            assert_eq!(ids(&schedule), vec!["A"]);
            assert_eq!(schedule.total_credits(), 3);
            assert_eq!(schedule.total_gap(), 0.0);
        }
    }

    #[test]
    fn test_max_credits_divergence_keeps_first_found() {
        let schedule = max_credits(&divergence_catalog());
        assert_eq!(ids(&schedule), vec!["C"]);
        assert_eq!(schedule.total_credits(), 8);
    }

    #[test]
    fn test_min_gap_divergence_prefers_zero_gap_pair() {
        let schedule = min_gap(&divergence_catalog());
        assert_eq!(ids(&schedule), vec!["A", "B"]);
        assert_eq!(schedule.total_credits(), 8);
        assert_eq!(schedule.total_gap(), 0.0);
    }

    #[test]
    fn test_max_credits_with_gaps() {
        let catalog = Catalog::new(vec![
            course("Algebra", 8.0, 10.0, 4),
            course("Physics", 9.0, 11.0, 5),
            course("History", 12.0, 14.0, 3),
            course("Biology", 13.0, 15.0, 4),
            course("Art", 16.0, 17.0, 2),
        ])
        .unwrap();

        let schedule = max_credits(&catalog);
        assert_eq!(schedule.total_credits(), 11);
        assert_eq!(ids(&schedule), vec!["Art", "Biology", "Physics"]);
        assert_eq!(schedule.total_gap(), 3.0);

        let schedule = min_gap(&catalog);
        assert_eq!(schedule.total_gap(), 0.0);
        assert_eq!(schedule.total_credits(), 5);
    }

    #[test]
    fn test_max_credits_at_the_credit_limit() {
        let catalog = Catalog::new(vec![
            course("A", 8.0, 9.0, 2_000_000_000),
            course("B", 9.0, 10.0, 2_000_000_000),
            course("C", 8.0, 10.0, 294_967_295),
        ])
        .unwrap();
        assert_eq!(catalog.total_credits(), u32::MAX);

        let schedule = max_credits(&catalog);
        assert_eq!(ids(&schedule), vec!["A", "B"]);
        assert_eq!(schedule.total_credits(), 4_000_000_000);
    }

    #[test]
    fn test_prerequisite_missing_from_catalog_excludes_course() {
        let catalog = Catalog::new(vec![
            course("Intro", 8.0, 10.0, 3),
            course("Advanced", 10.0, 12.0, 6)
                .with_prerequisites(["Basics"])
                .unwrap(),
        ])
        .unwrap();

        for objective in [
            Objective::MaxCredits,
            Objective::MinGap,
            Objective::combined(1.0),
        ] {
            let schedule = search(&catalog, &objective);
            assert_eq!(ids(&schedule), vec!["Intro"], "{objective}");
        }
    }

    #[test]
    fn test_completed_prerequisite_enables_course() {
        let catalog = Catalog::new(vec![
            course("Intro", 8.0, 10.0, 3),
            course("Advanced", 10.0, 12.0, 6)
                .with_prerequisites(["Basics"])
                .unwrap(),
        ])
        .unwrap();
        let completed: Selection = ["Basics"].into_iter().collect();

        for objective in [
            Objective::MaxCredits,
            Objective::MinGap,
            Objective::combined(1.0),
        ] {
            let schedule = search_with_completed(&catalog, &completed, &objective);
            assert_eq!(ids(&schedule), vec!["Advanced", "Intro"], "{objective}");
            assert_eq!(schedule.total_credits(), 9);
        }
    }

    #[test]
    fn test_prerequisite_decided_after_dependent_is_enforced() {
        // Under the credit order "Advanced" is decided before "Intro", so
        // including it leaves an obligation on "Intro".
        let catalog = Catalog::new(vec![
            course("Intro", 8.0, 10.0, 1),
            course("Advanced", 10.0, 12.0, 6)
                .with_prerequisites(["Intro"])
                .unwrap(),
            course("Clash", 9.0, 11.0, 5),
        ])
        .unwrap();

        let schedule = max_credits(&catalog);
        assert_eq!(ids(&schedule), vec!["Advanced", "Intro"]);
        assert_eq!(schedule.total_credits(), 7);
        assert!(validate_selection(&catalog, schedule.selection(), &Selection::new()).is_ok());
    }

    #[test]
    fn test_prerequisite_conflicting_with_dependent_blocks_both() {
        let catalog = Catalog::new(vec![
            course("Intro", 8.0, 10.0, 1),
            course("Advanced", 9.0, 11.0, 6)
                .with_prerequisites(["Intro"])
                .unwrap(),
        ])
        .unwrap();
        let schedule = max_credits(&catalog);
        assert_eq!(ids(&schedule), vec!["Intro"]);
    }

    #[test]
    fn test_combined_penalty_trades_credits_for_gap() {
        let catalog = Catalog::new(vec![
            course("Morning", 8.0, 9.0, 3),
            course("Evening", 17.0, 18.0, 3),
            course("Noon", 9.0, 10.0, 1),
        ])
        .unwrap();

        let schedule = combined(&catalog, 0.0);
        assert_eq!(schedule.total_credits(), 7);

        let schedule = combined(&catalog, 1.0);
        assert_eq!(ids(&schedule), vec!["Morning", "Noon"]);
        assert_eq!(schedule.total_gap(), 0.0);
    }

    #[test]
    fn test_combined_gap_is_monotone_in_penalty() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..10 {
            let catalog = random_catalog(&mut rng, 9);
            let mut previous_gap = f64::INFINITY;
            for penalty in [0.0, 0.25, 0.5, 1.0, 2.0, 4.0, 8.0] {
                let gap = combined(&catalog, penalty).total_gap();
                assert!(
                    gap <= previous_gap + 1e-9,
                    "gap grew from {previous_gap} to {gap} at penalty {penalty}"
                );
                previous_gap = gap;
            }
        }
    }

    #[test]
    fn test_optimal_against_brute_force_on_random_catalogs() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5EED);
        let empty = Selection::new();
        for round in 0..40 {
            let n = 1 + round % 12;
            let catalog = random_catalog(&mut rng, n);
            assert_optimal(&catalog, &empty, &MaxCreditsStrategy::new());
            assert_optimal(&catalog, &empty, &MinGapStrategy::new());
            assert_optimal(&catalog, &empty, &CombinedStrategy::new(0.5));
            assert_optimal(&catalog, &empty, &CombinedStrategy::new(3.0));
        }
    }

    #[test]
    fn test_optimal_with_completed_courses() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..20 {
            let catalog = random_catalog(&mut rng, 10);
            let completed: Selection = ["C0", "C3", "Unknown"].into_iter().collect();
            assert_optimal(&catalog, &completed, &MaxCreditsStrategy::new());
            assert_optimal(&catalog, &completed, &MinGapStrategy::new());
            assert_optimal(&catalog, &completed, &CombinedStrategy::new(1.0));
        }
    }

    #[test]
    fn test_node_limit_aborts_with_feasible_schedule() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let catalog = random_catalog(&mut rng, 12);

        let outcome = BnbSolver::new().solve(
            &catalog,
            &MinGapStrategy::new(),
            NodeLimitMonitor::new(5),
        );
        assert!(!outcome.is_optimal());
        assert!(outcome.result().is_feasible());
        assert!(matches!(
            outcome.termination_reason(),
            TerminationReason::Aborted(_)
        ));
        assert!(
            validate_selection(&catalog, outcome.schedule().selection(), &Selection::new()).is_ok()
        );
        assert!(outcome.statistics().nodes_explored <= 6);
    }

    #[test]
    fn test_solution_limit_returns_first_improvement() {
        let catalog = divergence_catalog();
        let outcome = BnbSolver::new().solve(
            &catalog,
            &MaxCreditsStrategy::new(),
            SolutionLimitMonitor::new(1),
        );
        assert!(!outcome.is_optimal());
        assert_eq!(outcome.statistics().solutions_found, 1);
        assert_eq!(ids(outcome.schedule()), vec!["C"]);
    }

    #[test]
    fn test_monitors_do_not_affect_results() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let catalog = random_catalog(&mut rng, 10);
        let strategy = CombinedStrategy::new(0.75);

        let plain = BnbSolver::new().solve(&catalog, &strategy, NoOperationMonitor::new());

        let mut log = LogTreeSearchMonitor::default();
        let mut composite = CompositeTreeSearchMonitor::new();
        composite.add_monitor(&mut log);
        composite.add_monitor(NoOperationMonitor::new());
        let monitored = BnbSolver::new().solve(&catalog, &strategy, composite);

        assert_eq!(plain.schedule(), monitored.schedule());
        assert_eq!(
            plain.statistics().nodes_explored,
            monitored.statistics().nodes_explored
        );
    }

    #[test]
    fn test_statistics_coherence_after_solve() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let catalog = random_catalog(&mut rng, 11);
        let outcome =
            BnbSolver::new().solve(&catalog, &MaxCreditsStrategy::new(), NoOperationMonitor::new());
        let stats = outcome.statistics();

        // Every explored node except the root comes from a popped decision.
        assert_eq!(stats.nodes_explored, stats.decisions_generated + 1);
        assert!(stats.max_depth <= catalog.len() as u64 + 1);
        assert!(stats.steps >= stats.nodes_explored);
        assert!(stats.backtracks <= stats.nodes_explored);
        assert!(stats.solutions_found >= 1);
    }

    #[test]
    fn test_idempotent_re_solve_same_optimum() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let catalog = random_catalog(&mut rng, 10);
        let strategy = MinGapStrategy::new();

        let mut solver = BnbSolver::preallocated(4);
        let first = solver.solve(&catalog, &strategy, NoOperationMonitor::new());
        let second = solver.solve(&catalog, &strategy, NoOperationMonitor::new());

        assert_eq!(first.schedule(), second.schedule());
        assert_eq!(first.objective_value(), second.objective_value());
        assert_eq!(
            first.statistics().nodes_explored,
            second.statistics().nodes_explored
        );
        assert!(solver.trail.is_empty());
        assert!(solver.stack.is_empty());
    }

    #[test]
    fn test_solve_objective_reports_scalar_value() {
        let catalog = divergence_catalog();
        let mut solver = BnbSolver::new();
        let empty = Selection::new();

        let outcome =
            solver.solve_objective(&catalog, &empty, &Objective::MaxCredits, NoOperationMonitor::new());
        assert_eq!(outcome.objective_value(), &8.0);

        let outcome =
            solver.solve_objective(&catalog, &empty, &Objective::MinGap, NoOperationMonitor::new());
        assert_eq!(outcome.objective_value(), &0.0);

        let outcome = solver.solve_objective(
            &catalog,
            &empty,
            &Objective::combined(1.0),
            NoOperationMonitor::new(),
        );
        assert_eq!(outcome.objective_value(), &8.0);
    }

    #[test]
    fn test_bound_prunes_nodes() {
        // Eight disjoint one-hour courses: the credit bound stops the search
        // as soon as the all-include branch is found.
        let courses = (0..8)
            .map(|i| {
                let start = 8.0 + f64::from(i);
                course(&format!("C{i}"), start, start + 1.0, 2)
            })
            .collect();
        let catalog = Catalog::new(courses).unwrap();
        let outcome =
            BnbSolver::new().solve(&catalog, &MaxCreditsStrategy::new(), NoOperationMonitor::new());
        assert_eq!(outcome.schedule().total_credits(), 16);
        assert_eq!(outcome.statistics().solutions_found, 1);
        assert!(outcome.statistics().prunings_bound > 0);
        assert!(outcome.statistics().nodes_explored < 64);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_engine_matches_brute_force(specs in course_specs(9), penalty in 0.0f64..4.0) {
            let catalog = catalog_from_specs(&specs);
            let empty = Selection::new();
            assert_optimal(&catalog, &empty, &MaxCreditsStrategy::new());
            assert_optimal(&catalog, &empty, &MinGapStrategy::new());
            assert_optimal(&catalog, &empty, &CombinedStrategy::new(penalty));
        }
    }
}
