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

//! The greedy sweep.
//!
//! `GreedyScheduler` keeps its ranking and acceptance buffers between calls,
//! so a long-lived scheduler does not allocate per catalog once the buffers
//! are large enough.

use coursetable_model::{
    catalog::Catalog,
    course::Course,
    index::CourseIndex,
    schedule::{Schedule, Selection},
};
use std::cmp::Ordering;

/// The ranking key of a course: smaller is better.
#[inline]
pub fn priority(course: &Course) -> f64 {
    course.end_time() / f64::from(course.credits())
}

/// Compares two courses by `priority`.
#[inline]
pub fn compare_priority(a: &Course, b: &Course) -> Ordering {
    priority(a).total_cmp(&priority(b))
}

/// Builds a schedule by sweeping the courses in order of `priority`.
#[derive(Clone, Debug, Default)]
pub struct GreedyScheduler {
    order: Vec<CourseIndex>,
    accepted: Vec<CourseIndex>,
}

impl GreedyScheduler {
    /// Creates a new scheduler.
    #[inline]
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            accepted: Vec::new(),
        }
    }

    /// Creates a new scheduler with buffers sized for `num_courses` courses.
    #[inline]
    pub fn preallocated(num_courses: usize) -> Self {
        Self {
            order: Vec::with_capacity(num_courses),
            accepted: Vec::with_capacity(num_courses),
        }
    }

    /// Schedules the catalog with no completed courses.
    #[inline]
    pub fn schedule(&mut self, catalog: &Catalog) -> Schedule {
        self.schedule_with_completed(catalog, &Selection::new())
    }

    /// Schedules the catalog. Prerequisites listed in `completed` count as
    /// satisfied without being scheduled.
    pub fn schedule_with_completed(&mut self, catalog: &Catalog, completed: &Selection) -> Schedule {
        self.order.clear();
        self.accepted.clear();

        self.order.extend((0..catalog.len()).map(CourseIndex::new));
        // Stable, so ties keep catalog order.
        self.order
            .sort_by(|&a, &b| compare_priority(catalog.course(a), catalog.course(b)));

        let mut selection = Selection::new();
        for &index in &self.order {
            let course = catalog.course(index);

            let prerequisites_met = course
                .prerequisites()
                .iter()
                .all(|p| completed.contains(p) || selection.contains(p));
            if !prerequisites_met {
                continue;
            }

            let conflicts = self
                .accepted
                .iter()
                .any(|&other| course.conflicts_with(catalog.course(other)));
            if conflicts {
                continue;
            }

            self.accepted.push(index);
            selection.insert(course.id());
        }

        let schedule =
            Schedule::from_courses(self.accepted.iter().map(|&index| catalog.course(index)));

        log::debug!(
            "greedy accepted {} of {} courses: {}",
            self.accepted.len(),
            catalog.len(),
            schedule
        );

        schedule
    }
}

impl std::fmt::Display for GreedyScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GreedyScheduler(capacity: {})", self.order.capacity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursetable_bnb::bnb;
    use coursetable_model::timing::validate_selection;
    use coursetable_search::objective::Objective;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn course(id: &str, start: f64, end: f64, credits: u32) -> Course {
        Course::new(id, id, start, end, credits).unwrap()
    }

    fn ids(schedule: &Schedule) -> Vec<&str> {
        schedule.selection().iter().collect()
    }

    #[test]
    fn test_no_conflicts_selects_everything() {
        let catalog = Catalog::new(vec![
            course("C1", 8.0, 10.0, 4),
            course("C2", 10.0, 12.0, 3),
            course("C3", 14.0, 16.0, 5),
        ])
        .unwrap();
        let schedule = GreedyScheduler::new().schedule(&catalog);
        assert_eq!(schedule.num_courses(), 3);
        assert_eq!(schedule.total_credits(), 12);
        assert_eq!(schedule.total_gap(), 2.0);
    }

    #[test]
    fn test_ranking_prefers_early_high_credit_courses() {
        // Ratios: C1 = 6.0, C2 = 2.5, C3 = 5.33.
        let catalog = Catalog::new(vec![
            course("C1", 8.0, 12.0, 2),
            course("C2", 8.0, 10.0, 4),
            course("C3", 14.0, 16.0, 3),
        ])
        .unwrap();
        let schedule = GreedyScheduler::new().schedule(&catalog);
        assert_eq!(ids(&schedule), vec!["C2", "C3"]);
    }

    #[test]
    fn test_same_slot_prefers_more_credits() {
        let catalog = Catalog::new(vec![
            course("C1", 8.0, 10.0, 2),
            course("C2", 8.0, 10.0, 5),
            course("C3", 14.0, 16.0, 3),
        ])
        .unwrap();
        let schedule = GreedyScheduler::new().schedule(&catalog);
        assert_eq!(ids(&schedule), vec!["C2", "C3"]);
        assert_eq!(schedule.total_credits(), 8);
    }

    #[test]
    fn test_all_conflicting_selects_one() {
        let catalog = Catalog::new(vec![
            course("C1", 8.0, 12.0, 4),
            course("C2", 9.0, 11.0, 3),
            course("C3", 10.0, 14.0, 5),
        ])
        .unwrap();
        let schedule = GreedyScheduler::new().schedule(&catalog);
        assert_eq!(schedule.num_courses(), 1);
        assert_eq!(schedule.total_gap(), 0.0);
    }

    #[test]
    fn test_missing_prerequisite_is_skipped() {
        let catalog = Catalog::new(vec![
            course("C1", 8.0, 10.0, 4).with_prerequisites(["C0"]).unwrap(),
            course("C2", 10.0, 12.0, 3),
            course("C3", 14.0, 16.0, 5),
        ])
        .unwrap();

        let mut scheduler = GreedyScheduler::new();
        let schedule = scheduler.schedule(&catalog);
        assert_eq!(ids(&schedule), vec!["C2", "C3"]);

        let completed: Selection = ["C0"].into_iter().collect();
        let schedule = scheduler.schedule_with_completed(&catalog, &completed);
        assert_eq!(schedule.num_courses(), 3);
        assert_eq!(schedule.total_credits(), 12);
    }

    #[test]
    fn test_prerequisite_accepted_earlier_in_sweep() {
        // "Basics" ranks first, so "Advanced" may follow it.
        let catalog = Catalog::new(vec![
            course("Advanced", 10.0, 12.0, 3)
                .with_prerequisites(["Basics"])
                .unwrap(),
            course("Basics", 8.0, 9.0, 4),
        ])
        .unwrap();
        let schedule = GreedyScheduler::new().schedule(&catalog);
        assert_eq!(ids(&schedule), vec!["Advanced", "Basics"]);
    }

    #[test]
    fn test_prerequisite_ranked_later_blocks_dependent() {
        let catalog = Catalog::new(vec![
            course("Advanced", 8.0, 9.0, 6)
                .with_prerequisites(["Basics"])
                .unwrap(),
            course("Basics", 15.0, 17.0, 1),
        ])
        .unwrap();
        let schedule = GreedyScheduler::new().schedule(&catalog);
        assert_eq!(ids(&schedule), vec!["Basics"]);
    }

    #[test]
    fn test_empty_catalog() {
        let schedule = GreedyScheduler::new().schedule(&Catalog::default());
        assert_eq!(schedule, Schedule::empty());
    }

    #[test]
    fn test_feasible_and_never_better_than_exact() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let mut scheduler = GreedyScheduler::preallocated(12);
        for _ in 0..30 {
            let n = rng.random_range(1..=12usize);
            let courses = (0..n)
                .map(|i| {
                    let start = f64::from(rng.random_range(7u32..19));
                    let end = start + f64::from(rng.random_range(1u32..4));
                    let c = course(&format!("C{i}"), start, end, rng.random_range(1u32..7));
                    if i > 0 && rng.random_bool(0.3) {
                        c.with_prerequisites([format!("C{}", rng.random_range(0..i))])
                            .unwrap()
                    } else {
                        c
                    }
                })
                .collect();
            let catalog = Catalog::new(courses).unwrap();

            let greedy = scheduler.schedule(&catalog);
            assert!(validate_selection(&catalog, greedy.selection(), &Selection::new()).is_ok());

            for objective in [
                Objective::MaxCredits,
                Objective::MinGap,
                Objective::combined(0.5),
            ] {
                let exact = bnb::search(&catalog, &objective);
                assert!(
                    !objective.is_better(&greedy, &exact),
                    "greedy {greedy} beats exact {exact} under {objective}"
                );
            }
        }
    }
}
