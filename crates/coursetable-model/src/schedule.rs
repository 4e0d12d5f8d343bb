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

//! Selections and schedules.
//!
//! A `Selection` is the set of chosen course ids. A `Schedule` pairs a
//! selection with its total credits and total gap; it is the common result
//! shape of every solver in the workspace.

use crate::{
    catalog::Catalog,
    course::Course,
    timing::{total_credits, total_gap},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A set of course ids with deterministic (lexicographic) iteration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(BTreeSet<String>);

impl Selection {
    /// Creates an empty selection.
    #[inline]
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Inserts an id, returning `true` if it was not present yet.
    #[inline]
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.0.insert(id.into())
    }

    /// Removes an id, returning `true` if it was present.
    #[inline]
    pub fn remove(&mut self, id: &str) -> bool {
        self.0.remove(id)
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the ids in lexicographic order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }
}

impl<S> FromIterator<S> for Selection
where
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S> Extend<S> for Selection
where
    S: Into<String>,
{
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, id) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", id)?;
        }
        write!(f, "}}")
    }
}

/// A selection together with its total credits and total gap in hours.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    selection: Selection,
    total_credits: u32,
    total_gap: f64,
}

impl Schedule {
    /// Creates a schedule from precomputed totals.
    #[inline]
    pub fn new(selection: Selection, total_credits: u32, total_gap: f64) -> Self {
        Self {
            selection,
            total_credits,
            total_gap,
        }
    }

    /// The empty schedule `({}, 0, 0)`.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a schedule from the selected courses, computing both totals.
    ///
    /// The courses are expected to be pairwise non-overlapping.
    pub fn from_courses<'a, I>(courses: I) -> Self
    where
        I: IntoIterator<Item = &'a Course>,
    {
        let courses: Vec<&Course> = courses.into_iter().collect();
        Self {
            selection: courses.iter().map(|c| c.id()).collect(),
            total_credits: total_credits(courses.iter().copied()),
            total_gap: total_gap(courses.iter().copied()),
        }
    }

    #[inline]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[inline]
    pub fn total_credits(&self) -> u32 {
        self.total_credits
    }

    #[inline]
    pub fn total_gap(&self) -> f64 {
        self.total_gap
    }

    #[inline]
    pub fn num_courses(&self) -> usize {
        self.selection.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    /// Returns the selected courses of `catalog` in chronological order.
    /// Ids that are not part of the catalog are skipped.
    pub fn courses<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Course> {
        let mut courses: Vec<&Course> = self
            .selection
            .iter()
            .filter_map(|id| catalog.get(id))
            .collect();
        courses.sort_by(|a, b| a.start_time().total_cmp(&b.start_time()));
        courses
    }

    /// Decomposes the schedule into `(selection, total_credits, total_gap)`.
    #[inline]
    pub fn into_parts(self) -> (Selection, u32, f64) {
        (self.selection, self.total_credits, self.total_gap)
    }
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Schedule({}, credits: {}, gap: {:.2}h)",
            self.selection, self.total_credits, self.total_gap
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str, start: f64, end: f64, credits: u32) -> Course {
        Course::new(id, id, start, end, credits).unwrap()
    }

    #[test]
    fn test_selection_set_semantics() {
        let mut selection = Selection::new();
        assert!(selection.insert("B"));
        assert!(selection.insert("A"));
        assert!(!selection.insert("A"));
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec!["A", "B"]);
        assert!(selection.remove("A"));
        assert!(!selection.contains("A"));
        assert_eq!(format!("{}", selection), "{B}");
    }

    #[test]
    fn test_selection_collect_and_extend() {
        let mut selection: Selection = ["X", "Y"].into_iter().collect();
        selection.extend(vec![String::from("Z")]);
        assert_eq!(format!("{}", selection), "{X, Y, Z}");
    }

    #[test]
    fn test_empty_schedule() {
        let schedule = Schedule::empty();
        assert!(schedule.is_empty());
        assert_eq!(schedule.total_credits(), 0);
        assert_eq!(schedule.total_gap(), 0.0);
        assert_eq!(format!("{}", schedule), "Schedule({}, credits: 0, gap: 0.00h)");
    }

    #[test]
    fn test_from_courses_computes_totals() {
        let a = course("A", 8.0, 10.0, 4);
        let b = course("B", 13.0, 15.0, 3);
        let c = course("C", 10.0, 12.0, 2);
        let schedule = Schedule::from_courses([&b, &a, &c]);
        assert_eq!(schedule.num_courses(), 3);
        assert_eq!(schedule.total_credits(), 9);
        assert_eq!(schedule.total_gap(), 1.0);
        assert!(schedule.contains("C"));
    }

    #[test]
    fn test_courses_are_chronological() {
        let catalog = Catalog::new(vec![
            course("Late", 14.0, 15.0, 1),
            course("Early", 8.0, 9.0, 1),
        ])
        .unwrap();
        let schedule = Schedule::new(["Late", "Early", "Ghost"].into_iter().collect(), 2, 5.0);
        let ids: Vec<&str> = schedule.courses(&catalog).into_iter().map(Course::id).collect();
        assert_eq!(ids, vec!["Early", "Late"]);
    }

    #[test]
    fn test_schedule_serde() {
        let schedule = Schedule::new(["A"].into_iter().collect(), 4, 0.0);
        let json = serde_json::to_string(&schedule).unwrap();
        assert_eq!(json, r#"{"selection":["A"],"total_credits":4,"total_gap":0.0}"#);
        let (selection, credits, gap) = schedule.into_parts();
        assert_eq!(selection.len(), 1);
        assert_eq!(credits, 4);
        assert_eq!(gap, 0.0);
    }
}
