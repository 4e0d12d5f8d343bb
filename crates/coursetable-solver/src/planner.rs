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

//! The comparison planner.
//!
//! `Planner::compare` spawns one scoped thread per configured algorithm. The
//! threads share the catalog by reference and never communicate; each one
//! reports its schedule, status and wall-clock time, and the entries are
//! collected in the configured order.
//!
//! Time and node limits only apply to the branch-and-bound search. A limited
//! search reports the best schedule it found together with the limit that
//! stopped it.

use crate::{
    config::{Algorithm, PlannerConfig},
    report::{Comparison, ComparisonEntry, EntryStatus},
};
use coursetable_bnb::{
    bnb::BnbSolver,
    monitor::{
        composite::CompositeTreeSearchMonitor, node_limit::NodeLimitMonitor,
        time_limit::TimeLimitMonitor,
    },
};
use coursetable_greedy::greedy::GreedyScheduler;
use coursetable_ilp::ilp::IlpSolver;
use coursetable_model::{catalog::Catalog, schedule::Selection};
use coursetable_search::{objective::Objective, result::TerminationReason};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors raised while building a planner.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    #[error("the gap penalty must be finite and non-negative, got {0}")]
    InvalidPenalty(f64),
    #[error("no algorithm was selected")]
    NoAlgorithms,
}

/// Runs the configured algorithms on a catalog and compares their schedules.
#[derive(Clone, Debug)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    #[inline]
    pub fn builder() -> PlannerBuilder {
        PlannerBuilder::new()
    }

    #[inline]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Runs every configured algorithm on `catalog`.
    #[inline]
    pub fn compare(&self, catalog: &Catalog) -> Comparison {
        self.compare_with_completed(catalog, &Selection::new())
    }

    /// Runs every configured algorithm on `catalog`, treating the courses in
    /// `completed` as already passed.
    pub fn compare_with_completed(&self, catalog: &Catalog, completed: &Selection) -> Comparison {
        let objective = self.config.objective;
        let mut entries = Vec::with_capacity(self.config.algorithms.len());

        std::thread::scope(|scope| {
            let mut handles = Vec::with_capacity(self.config.algorithms.len());

            for &algorithm in &self.config.algorithms {
                let config = &self.config;
                let handle = scope.spawn(move || run_algorithm(algorithm, config, catalog, completed));
                handles.push((algorithm, handle));
            }

            for (algorithm, handle) in handles {
                let entry = handle.join().unwrap_or_else(|_| {
                    log::error!("{} thread panicked", algorithm);
                    ComparisonEntry::failed(algorithm, "thread panicked", Duration::ZERO)
                });
                entries.push(entry);
            }
        });

        let comparison = Comparison::new(objective, entries);
        if let Some(best) = comparison.best() {
            log::info!(
                "compared {} algorithms on {} courses ({}): best is {}",
                comparison.entries.len(),
                catalog.len(),
                objective,
                best.algorithm
            );
        }
        comparison
    }
}

fn run_algorithm(
    algorithm: Algorithm,
    config: &PlannerConfig,
    catalog: &Catalog,
    completed: &Selection,
) -> ComparisonEntry {
    let objective = &config.objective;
    let start = Instant::now();

    match algorithm {
        Algorithm::BranchAndBound => {
            let mut monitor = CompositeTreeSearchMonitor::with_capacity(2);
            if let Some(limit) = config.time_limit {
                monitor.add_monitor(TimeLimitMonitor::with_default_check_interval(limit));
            }
            if let Some(limit) = config.node_limit {
                monitor.add_monitor(NodeLimitMonitor::new(limit));
            }

            let outcome = BnbSolver::preallocated(catalog.len())
                .solve_objective(catalog, completed, objective, monitor);
            let status = match outcome.termination_reason() {
                TerminationReason::OptimalityProven => EntryStatus::Optimal,
                TerminationReason::Aborted(reason) => EntryStatus::Aborted(reason.clone()),
            };
            log::debug!(
                "{} finished with {} nodes explored",
                algorithm,
                outcome.statistics().nodes_explored
            );
            ComparisonEntry::completed(
                algorithm,
                status,
                outcome.into_schedule(),
                start.elapsed(),
                objective,
            )
        }
        Algorithm::Greedy => {
            let schedule =
                GreedyScheduler::preallocated(catalog.len()).schedule_with_completed(catalog, completed);
            ComparisonEntry::completed(
                algorithm,
                EntryStatus::Heuristic,
                schedule,
                start.elapsed(),
                objective,
            )
        }
        Algorithm::Ilp => {
            match IlpSolver::with_default_backend().solve_with_completed(catalog, completed, objective) {
                Ok(schedule) => ComparisonEntry::completed(
                    algorithm,
                    EntryStatus::Optimal,
                    schedule,
                    start.elapsed(),
                    objective,
                ),
                Err(err) => {
                    log::warn!("{} failed: {}", algorithm, err);
                    ComparisonEntry::failed(algorithm, err.to_string(), start.elapsed())
                }
            }
        }
    }
}

/// Builds a validated `Planner`.
#[derive(Clone, Debug)]
pub struct PlannerBuilder {
    config: PlannerConfig,
}

impl Default for PlannerBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl PlannerBuilder {
    /// A builder with the default objective and no algorithms.
    #[inline]
    pub fn new() -> Self {
        Self {
            config: PlannerConfig {
                algorithms: Vec::new(),
                ..PlannerConfig::default()
            },
        }
    }

    /// A builder starting from an existing configuration.
    #[inline]
    pub fn from_config(config: PlannerConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.config.objective = objective;
        self
    }

    /// Adds `algorithm` unless it is already selected.
    #[inline]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        if !self.config.algorithms.contains(&algorithm) {
            self.config.algorithms.push(algorithm);
        }
        self
    }

    #[inline]
    pub fn with_algorithms<I>(self, algorithms: I) -> Self
    where
        I: IntoIterator<Item = Algorithm>,
    {
        algorithms
            .into_iter()
            .fold(self, |builder, algorithm| builder.with_algorithm(algorithm))
    }

    #[inline]
    pub fn with_all_algorithms(self) -> Self {
        self.with_algorithms(Algorithm::ALL)
    }

    #[inline]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.config.time_limit = Some(time_limit);
        self
    }

    #[inline]
    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.config.node_limit = Some(node_limit);
        self
    }

    pub fn build(self) -> Result<Planner, PlannerError> {
        if let Objective::Combined { penalty } = self.config.objective
            && !self.config.objective.is_valid()
        {
            return Err(PlannerError::InvalidPenalty(penalty));
        }
        if self.config.algorithms.is_empty() {
            return Err(PlannerError::NoAlgorithms);
        }
        Ok(Planner {
            config: self.config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursetable_model::{course::Course, schedule::Schedule};

    fn course(id: &str, start: f64, end: f64, credits: u32) -> Course {
        Course::new(id, id, start, end, credits).unwrap()
    }

    fn divergent_catalog() -> Catalog {
        Catalog::new(vec![
            course("A", 8.0, 10.0, 4),
            course("B", 10.0, 12.0, 4),
            course("C", 8.0, 13.0, 8),
        ])
        .unwrap()
    }

    fn wide_catalog() -> Catalog {
        Catalog::new(
            (0..14)
                .map(|i| {
                    let start = 8.0 + f64::from(i % 7);
                    course(&format!("C{i}"), start, start + 1.5, 1 + i % 4)
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_builder_validation() {
        assert_eq!(
            PlannerBuilder::new().build().unwrap_err(),
            PlannerError::NoAlgorithms
        );
        let err = PlannerBuilder::new()
            .with_all_algorithms()
            .with_objective(Objective::Combined { penalty: -1.0 })
            .build()
            .unwrap_err();
        assert_eq!(err, PlannerError::InvalidPenalty(-1.0));
    }

    #[test]
    fn test_builder_deduplicates_algorithms() {
        let planner = PlannerBuilder::new()
            .with_algorithm(Algorithm::Ilp)
            .with_all_algorithms()
            .with_node_limit(10)
            .build()
            .unwrap();
        assert_eq!(
            planner.config().algorithms,
            vec![Algorithm::Ilp, Algorithm::BranchAndBound, Algorithm::Greedy]
        );
        assert_eq!(planner.config().node_limit, Some(10));
    }

    #[test]
    fn test_compare_all_algorithms() {
        let planner = PlannerBuilder::from_config(PlannerConfig::default())
            .build()
            .unwrap();
        let comparison = planner.compare(&divergent_catalog());

        assert_eq!(comparison.entries.len(), 3);
        let bnb = comparison.entry(Algorithm::BranchAndBound).unwrap();
        assert_eq!(bnb.status, EntryStatus::Optimal);
        assert_eq!(bnb.score, Some(8.0));

        let ilp = comparison.entry(Algorithm::Ilp).unwrap();
        assert_eq!(ilp.status, EntryStatus::Optimal);
        assert_eq!(ilp.score, Some(8.0));

        let greedy = comparison.entry(Algorithm::Greedy).unwrap();
        assert_eq!(greedy.status, EntryStatus::Heuristic);
        assert!(greedy.score.unwrap() <= 8.0);

        assert_eq!(
            comparison.best().map(|e| e.algorithm),
            Some(Algorithm::BranchAndBound)
        );
    }

    #[test]
    fn test_exact_algorithms_agree_on_min_gap() {
        let planner = Planner::builder()
            .with_objective(Objective::MinGap)
            .with_algorithms([Algorithm::BranchAndBound, Algorithm::Ilp])
            .build()
            .unwrap();
        let comparison = planner.compare(&divergent_catalog());
        for entry in &comparison.entries {
            let schedule = entry.schedule.as_ref().unwrap();
            assert_eq!(schedule.total_gap(), 0.0, "{}", entry.algorithm);
            assert_eq!(schedule.total_credits(), 8, "{}", entry.algorithm);
        }
    }

    #[test]
    fn test_node_limit_aborts_branch_and_bound() {
        let planner = Planner::builder()
            .with_algorithm(Algorithm::BranchAndBound)
            .with_node_limit(1)
            .build()
            .unwrap();
        let comparison = planner.compare(&wide_catalog());
        let entry = comparison.entry(Algorithm::BranchAndBound).unwrap();
        assert_eq!(
            entry.status,
            EntryStatus::Aborted("Node limit of 1 reached".to_string())
        );
        assert_eq!(entry.schedule, Some(Schedule::empty()));
    }

    #[test]
    fn test_generous_time_limit_keeps_optimality() {
        let planner = Planner::builder()
            .with_algorithm(Algorithm::BranchAndBound)
            .with_time_limit(Duration::from_secs(60))
            .build()
            .unwrap();
        let comparison = planner.compare(&wide_catalog());
        assert!(comparison.entries[0].is_optimal());
    }

    #[test]
    fn test_completed_prerequisites_are_forwarded() {
        let catalog = Catalog::new(vec![
            course("Intro", 8.0, 9.0, 2),
            course("Advanced", 10.0, 12.0, 6)
                .with_prerequisites(["Basics"])
                .unwrap(),
        ])
        .unwrap();
        let planner = Planner::builder().with_all_algorithms().build().unwrap();

        let comparison = planner.compare(&catalog);
        for entry in &comparison.entries {
            assert!(!entry.schedule.as_ref().unwrap().contains("Advanced"));
        }

        let completed: Selection = ["Basics"].into_iter().collect();
        let comparison = planner.compare_with_completed(&catalog, &completed);
        for entry in &comparison.entries {
            assert!(
                entry.schedule.as_ref().unwrap().contains("Advanced"),
                "{}",
                entry.algorithm
            );
        }
    }

    #[test]
    fn test_empty_catalog() {
        let planner = Planner::builder().with_all_algorithms().build().unwrap();
        let comparison = planner.compare(&Catalog::default());
        for entry in &comparison.entries {
            assert_eq!(entry.schedule, Some(Schedule::empty()));
        }
    }
}
