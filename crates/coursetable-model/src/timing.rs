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

//! Interval, gap and prerequisite utilities.
//!
//! Pure functions over courses. Intervals are half-open, so back-to-back
//! courses neither conflict nor leave a gap. The gap of a set of courses is
//! the idle time between chronologically consecutive courses.

use crate::{
    catalog::Catalog,
    course::Course,
    error::ScheduleViolation,
    schedule::Selection,
};

/// Returns `true` if the meeting intervals of `a` and `b` overlap.
#[inline]
pub fn overlaps(a: &Course, b: &Course) -> bool {
    a.conflicts_with(b)
}

/// Returns `max(0, later.start - earlier.end)`, where `later` is the course
/// with the later start. Symmetric.
#[inline]
pub fn gap(a: &Course, b: &Course) -> f64 {
    a.gap_to(b)
}

/// Returns the total idle time of the given courses: they are sorted by start
/// time and the gaps between consecutive courses are summed. Zero for fewer
/// than two courses.
pub fn total_gap<'a, I>(courses: I) -> f64
where
    I: IntoIterator<Item = &'a Course>,
{
    let mut sorted: Vec<&Course> = courses.into_iter().collect();
    sorted.sort_by(|a, b| a.start_time().total_cmp(&b.start_time()));
    sorted.windows(2).map(|w| gap(w[0], w[1])).sum()
}

/// Returns the sum of the credits of the given courses.
pub fn total_credits<'a, I>(courses: I) -> u32
where
    I: IntoIterator<Item = &'a Course>,
{
    courses
        .into_iter()
        .fold(0u32, |acc, c| acc.saturating_add(c.credits()))
}

/// Returns `true` if every prerequisite of `course` is in `selection`.
#[inline]
pub fn prerequisites_satisfied(course: &Course, selection: &Selection) -> bool {
    course
        .prerequisites()
        .iter()
        .all(|p| selection.contains(p))
}

/// Returns every pair of overlapping courses as `(id, id)`, in input order.
pub fn find_conflicts<'a>(courses: &[&'a Course]) -> Vec<(&'a str, &'a str)> {
    let mut conflicts = Vec::new();
    for (i, &a) in courses.iter().enumerate() {
        for &b in &courses[i + 1..] {
            if overlaps(a, b) {
                conflicts.push((a.id(), b.id()));
            }
        }
    }
    conflicts
}

/// Returns `true` if any two of the given courses overlap.
pub fn has_conflicts(courses: &[&Course]) -> bool {
    let mut sorted: Vec<&Course> = courses.to_vec();
    sorted.sort_by(|a, b| a.start_time().total_cmp(&b.start_time()));
    sorted.windows(2).any(|w| overlaps(w[0], w[1]))
}

/// Checks a selection against the hard constraints.
///
/// Every id must name a catalog course, no two selected courses may overlap,
/// and each prerequisite of a selected course must be selected as well or be
/// part of `completed`.
///
/// # Errors
///
/// Returns the first `ScheduleViolation` found: unknown ids first, then
/// conflicts in chronological order, then missing prerequisites in id order.
pub fn validate_selection(
    catalog: &Catalog,
    selection: &Selection,
    completed: &Selection,
) -> Result<(), ScheduleViolation> {
    let mut courses = Vec::with_capacity(selection.len());
    for id in selection.iter() {
        let course = catalog
            .get(id)
            .ok_or_else(|| ScheduleViolation::UnknownCourse(id.to_owned()))?;
        courses.push(course);
    }

    let mut chronological = courses.clone();
    chronological.sort_by(|a, b| a.start_time().total_cmp(&b.start_time()));
    if let Some(&(first, second)) = find_conflicts(&chronological).first() {
        return Err(ScheduleViolation::Conflict {
            first: first.to_owned(),
            second: second.to_owned(),
        });
    }

    for course in courses {
        if let Some(missing) = course
            .prerequisites()
            .iter()
            .find(|p| !selection.contains(p) && !completed.contains(p))
        {
            return Err(ScheduleViolation::MissingPrerequisite {
                course: course.id().to_owned(),
                prerequisite: missing.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn course(id: &str, start: f64, end: f64, credits: u32) -> Course {
        Course::new(id, id, start, end, credits).unwrap()
    }

    #[test]
    fn test_overlaps_half_open() {
        let a = course("A", 8.0, 10.0, 4);
        let b = course("B", 10.0, 12.0, 4);
        let c = course("C", 9.0, 11.0, 4);
        assert!(!overlaps(&a, &b));
        assert!(overlaps(&a, &c));
        assert!(overlaps(&c, &b));
    }

    #[test]
    fn test_gap_is_symmetric() {
        let a = course("A", 8.0, 10.0, 4);
        let b = course("B", 12.0, 14.0, 4);
        assert_eq!(gap(&a, &b), 2.0);
        assert_eq!(gap(&b, &a), 2.0);
    }

    #[test]
    fn test_total_gap_sorts_by_start() {
        let a = course("A", 8.0, 9.0, 1);
        let b = course("B", 10.0, 11.0, 1);
        let c = course("C", 14.0, 15.0, 1);
        assert_eq!(total_gap([&c, &a, &b]), 4.0);
        assert_eq!(total_gap([&a]), 0.0);
        assert_eq!(total_gap(std::iter::empty::<&Course>()), 0.0);
    }

    #[test]
    fn test_total_credits() {
        let a = course("A", 8.0, 9.0, 3);
        let b = course("B", 10.0, 11.0, 4);
        assert_eq!(total_credits([&a, &b]), 7);
    }

    #[test]
    fn test_prerequisites_satisfied() {
        let b = course("B", 10.0, 12.0, 3).with_prerequisites(["A"]).unwrap();
        let mut selection = Selection::new();
        assert!(!prerequisites_satisfied(&b, &selection));
        selection.insert("A");
        assert!(prerequisites_satisfied(&b, &selection));
    }

    #[test]
    fn test_find_and_has_conflicts() {
        let a = course("A", 8.0, 10.0, 1);
        let b = course("B", 9.0, 11.0, 1);
        let c = course("C", 10.5, 12.0, 1);
        let d = course("D", 13.0, 14.0, 1);
        assert_eq!(find_conflicts(&[&a, &b, &c]), vec![("A", "B"), ("B", "C")]);
        assert!(has_conflicts(&[&c, &a, &b]));
        assert!(!has_conflicts(&[&a, &c, &d]));
        assert!(!has_conflicts(&[]));
    }

    #[test]
    fn test_validate_selection() {
        let catalog = Catalog::new(vec![
            course("A", 8.0, 10.0, 4),
            course("B", 10.0, 12.0, 4).with_prerequisites(["A"]).unwrap(),
            course("C", 9.0, 11.0, 3),
            course("D", 12.0, 13.0, 2).with_prerequisites(["X"]).unwrap(),
        ])
        .unwrap();
        let none = Selection::new();

        let ok: Selection = ["A", "B"].into_iter().collect();
        assert_eq!(validate_selection(&catalog, &ok, &none), Ok(()));

        let unknown: Selection = ["Q"].into_iter().collect();
        assert_eq!(
            validate_selection(&catalog, &unknown, &none),
            Err(ScheduleViolation::UnknownCourse("Q".into()))
        );

        let conflict: Selection = ["A", "C"].into_iter().collect();
        assert_eq!(
            validate_selection(&catalog, &conflict, &none),
            Err(ScheduleViolation::Conflict {
                first: "A".into(),
                second: "C".into()
            })
        );

        let missing: Selection = ["B"].into_iter().collect();
        assert_eq!(
            validate_selection(&catalog, &missing, &none),
            Err(ScheduleViolation::MissingPrerequisite {
                course: "B".into(),
                prerequisite: "A".into()
            })
        );

        let completed: Selection = ["A", "X"].into_iter().collect();
        let with_history: Selection = ["B", "D"].into_iter().collect();
        assert_eq!(validate_selection(&catalog, &with_history, &completed), Ok(()));
    }

    proptest! {
        #[test]
        fn prop_has_conflicts_matches_pairwise_check(
            raw in proptest::collection::vec((0.0f64..20.0, 0.5f64..4.0), 0..8)
        ) {
            let courses: Vec<Course> = raw
                .iter()
                .enumerate()
                .map(|(i, &(start, len))| course(&format!("C{i}"), start, start + len, 1))
                .collect();
            let refs: Vec<&Course> = courses.iter().collect();
            prop_assert_eq!(has_conflicts(&refs), !find_conflicts(&refs).is_empty());
        }

        #[test]
        fn prop_total_gap_is_order_independent(
            raw in proptest::collection::vec((0.0f64..20.0, 0.5f64..4.0), 0..8)
        ) {
            let courses: Vec<Course> = raw
                .iter()
                .enumerate()
                .map(|(i, &(start, len))| course(&format!("C{i}"), start, start + len, 1))
                .collect();
            let forward = total_gap(courses.iter());
            let backward = total_gap(courses.iter().rev());
            prop_assert!((forward - backward).abs() < 1e-9);
            prop_assert!(forward >= 0.0);
        }
    }
}
