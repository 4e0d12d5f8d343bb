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

//! The search order.
//!
//! `SearchOrder` fixes, once per solve, the sequence in which courses are
//! decided and caches everything the inner loop needs per position: the
//! meeting interval, the credits, the suffix sums of credits used by the
//! bounds, and the prerequisite structure translated into positions.
//!
//! Prerequisites are resolved against the caller's completed set first. A
//! completed prerequisite disappears. One that names a catalog course becomes
//! a pending requirement on that course's position. One that is neither
//! completed nor in the catalog makes the course unschedulable, and so does
//! a pending requirement on an unschedulable course.

use coursetable_core::math::interval::TimeInterval;
use coursetable_model::{
    catalog::Catalog, course::Course, index::CourseIndex, schedule::Selection,
};
use smallvec::SmallVec;
use std::cmp::Ordering;

/// Prerequisite positions of a single course.
pub type PrerequisitePositions = SmallVec<[usize; 4]>;

/// What must hold for the course at a position to be included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Requirement {
    /// The course can never be part of a feasible selection.
    Unschedulable,
    /// Every listed position has to be included as well.
    Pending(PrerequisitePositions),
}

/// The fixed order in which courses are decided, with per-position caches.
#[derive(Clone, Debug)]
pub struct SearchOrder {
    courses: Vec<CourseIndex>,
    intervals: Vec<TimeInterval<f64>>,
    credits: Vec<u32>,
    /// `suffix_credits[p]` is the sum of the credits at positions `p..len`.
    suffix_credits: Vec<u32>,
    requirements: Vec<Requirement>,
    dependents: Vec<PrerequisitePositions>,
}

impl SearchOrder {
    /// Sorts the catalog with `compare` (stable, so ties keep catalog order)
    /// and resolves prerequisites against `completed`.
    pub fn new<F>(catalog: &Catalog, completed: &Selection, mut compare: F) -> Self
    where
        F: FnMut(&Course, &Course) -> Ordering,
    {
        let n = catalog.len();
        let all = catalog.courses();

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| compare(&all[a], &all[b]));

        let mut position_of = vec![0usize; n];
        for (position, &catalog_index) in order.iter().enumerate() {
            position_of[catalog_index] = position;
        }

        let courses: Vec<CourseIndex> = order.iter().map(|&i| CourseIndex::new(i)).collect();
        let intervals: Vec<TimeInterval<f64>> = order.iter().map(|&i| all[i].interval()).collect();
        let credits: Vec<u32> = order.iter().map(|&i| all[i].credits()).collect();

        let mut suffix_credits = vec![0u32; n + 1];
        for p in (0..n).rev() {
            suffix_credits[p] = suffix_credits[p + 1].saturating_add(credits[p]);
        }

        let mut requirements: Vec<Requirement> = order
            .iter()
            .map(|&i| resolve_requirement(catalog, completed, &all[i], &position_of))
            .collect();
        propagate_unschedulable(&mut requirements);

        let mut dependents: Vec<PrerequisitePositions> = vec![SmallVec::new(); n];
        for (position, requirement) in requirements.iter().enumerate() {
            if let Requirement::Pending(prerequisites) = requirement {
                for &p in prerequisites {
                    dependents[p].push(position);
                }
            }
        }

        Self {
            courses,
            intervals,
            credits,
            suffix_credits,
            requirements,
            dependents,
        }
    }

    /// Returns the number of positions.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Returns the catalog index of the course at `position`.
    #[inline(always)]
    pub fn course_index(&self, position: usize) -> CourseIndex {
        debug_assert!(
            position < self.len(),
            "called `SearchOrder::course_index` with position out of bounds: the len is {} but the position is {}",
            self.len(),
            position
        );
        self.courses[position]
    }

    #[inline(always)]
    pub fn interval(&self, position: usize) -> TimeInterval<f64> {
        self.intervals[position]
    }

    #[inline(always)]
    pub fn credits(&self, position: usize) -> u32 {
        self.credits[position]
    }

    /// Returns the sum of the credits of all positions from `position` on.
    #[inline(always)]
    pub fn remaining_credits(&self, position: usize) -> u32 {
        debug_assert!(
            position <= self.len(),
            "called `SearchOrder::remaining_credits` with position out of bounds: the len is {} but the position is {}",
            self.len(),
            position
        );
        self.suffix_credits[position]
    }

    #[inline(always)]
    pub fn requirement(&self, position: usize) -> &Requirement {
        &self.requirements[position]
    }

    /// Returns `false` if the course at `position` can never be included.
    #[inline(always)]
    pub fn is_schedulable(&self, position: usize) -> bool {
        !matches!(self.requirements[position], Requirement::Unschedulable)
    }

    /// Returns the positions of the courses that list the course at
    /// `position` as a pending prerequisite.
    #[inline(always)]
    pub fn dependents(&self, position: usize) -> &[usize] {
        &self.dependents[position]
    }
}

fn resolve_requirement(
    catalog: &Catalog,
    completed: &Selection,
    course: &Course,
    position_of: &[usize],
) -> Requirement {
    let mut pending = PrerequisitePositions::new();
    for prerequisite in course.prerequisites() {
        if completed.contains(prerequisite) {
            continue;
        }
        match catalog.index_of(prerequisite) {
            Some(index) => pending.push(position_of[index.get()]),
            None => return Requirement::Unschedulable,
        }
    }
    Requirement::Pending(pending)
}

/// Marks every course that transitively depends on an unschedulable course
/// as unschedulable itself.
fn propagate_unschedulable(requirements: &mut [Requirement]) {
    loop {
        let mut changed = false;
        for position in 0..requirements.len() {
            let blocked = match &requirements[position] {
                Requirement::Pending(prerequisites) => prerequisites
                    .iter()
                    .any(|&p| matches!(requirements[p], Requirement::Unschedulable)),
                Requirement::Unschedulable => false,
            };
            if blocked {
                requirements[position] = Requirement::Unschedulable;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str, start: f64, end: f64, credits: u32, prerequisites: &[&str]) -> Course {
        Course::new(id, id, start, end, credits)
            .unwrap()
            .with_prerequisites(prerequisites.iter().copied())
            .unwrap()
    }

    fn by_end(a: &Course, b: &Course) -> Ordering {
        a.end_time().total_cmp(&b.end_time())
    }

    #[test]
    fn test_order_is_stable_and_caches_credits() {
        let catalog = Catalog::new(vec![
            course("Late", 14.0, 16.0, 2, &[]),
            course("TieA", 8.0, 10.0, 3, &[]),
            course("TieB", 9.0, 10.0, 4, &[]),
        ])
        .unwrap();
        let order = SearchOrder::new(&catalog, &Selection::new(), by_end);

        let ids: Vec<&str> = (0..order.len())
            .map(|p| catalog.course(order.course_index(p)).id())
            .collect();
        assert_eq!(ids, vec!["TieA", "TieB", "Late"]);
        assert_eq!(order.credits(1), 4);
        assert_eq!(order.remaining_credits(0), 9);
        assert_eq!(order.remaining_credits(2), 2);
        assert_eq!(order.remaining_credits(3), 0);
    }

    #[test]
    fn test_prerequisites_become_positions() {
        let catalog = Catalog::new(vec![
            course("B", 10.0, 12.0, 4, &["A"]),
            course("A", 8.0, 9.0, 4, &[]),
        ])
        .unwrap();
        let order = SearchOrder::new(&catalog, &Selection::new(), by_end);

        // A ends first, so A sits at position 0 and B at position 1.
        assert_eq!(order.requirement(1), &Requirement::Pending(SmallVec::from_slice(&[0])));
        assert_eq!(order.dependents(0), &[1]);
        assert!(order.dependents(1).is_empty());
    }

    #[test]
    fn test_completed_prerequisites_vanish() {
        let catalog = Catalog::new(vec![course("B", 10.0, 12.0, 4, &["A", "X"])]).unwrap();
        let completed: Selection = ["A", "X"].into_iter().collect();
        let order = SearchOrder::new(&catalog, &completed, by_end);
        assert_eq!(order.requirement(0), &Requirement::Pending(SmallVec::new()));
        assert!(order.is_schedulable(0));
    }

    #[test]
    fn test_unknown_prerequisite_is_unschedulable_transitively() {
        let catalog = Catalog::new(vec![
            course("A", 8.0, 9.0, 4, &["Missing"]),
            course("B", 9.0, 10.0, 4, &["A"]),
            course("C", 10.0, 11.0, 4, &["B"]),
            course("D", 11.0, 12.0, 4, &[]),
        ])
        .unwrap();
        let order = SearchOrder::new(&catalog, &Selection::new(), by_end);
        assert!(!order.is_schedulable(0));
        assert!(!order.is_schedulable(1));
        assert!(!order.is_schedulable(2));
        assert!(order.is_schedulable(3));
    }
}
