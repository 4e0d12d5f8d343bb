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

//! Search state management for the branch-and-bound engine.
//!
//! `SearchState` is the single mutable node of the depth-first search. It
//! records how far along the search order the decisions have progressed, the
//! accepted courses as a chronological timeline, and the accumulated credits
//! and gap. Mutations go through the trail so they can be undone in O(k) on
//! backtrack.
//!
//! Invariants
//! - Positions `0..next_position` are decided, the rest are open.
//! - `timeline` is sorted by start time and pairwise non-overlapping, and
//!   holds exactly the positions whose `selected` bit is set.
//! - `gap` equals the total gap of the timeline up to float rounding.

use coursetable_core::{math::interval::TimeInterval, num::non_negative};
use fixedbitset::FixedBitSet;

/// An accepted course on the timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineEntry {
    interval: TimeInterval<f64>,
    position: usize,
}

impl TimelineEntry {
    #[inline(always)]
    pub fn new(interval: TimeInterval<f64>, position: usize) -> Self {
        Self { interval, position }
    }

    #[inline(always)]
    pub fn interval(&self) -> TimeInterval<f64> {
        self.interval
    }

    /// Returns the position of the course in the search order.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.position
    }
}

/// The mutable state of a search in progress.
#[derive(Clone, Debug)]
pub struct SearchState {
    num_courses: usize,
    next_position: usize,
    selected: FixedBitSet,
    timeline: Vec<TimelineEntry>,
    credits: u32,
    gap: f64,
}

impl SearchState {
    /// Creates the root state for `num_courses` undecided courses.
    pub fn new(num_courses: usize) -> Self {
        Self {
            num_courses,
            next_position: 0,
            selected: FixedBitSet::with_capacity(num_courses),
            timeline: Vec::with_capacity(num_courses),
            credits: 0,
            gap: 0.0,
        }
    }

    #[inline(always)]
    pub fn num_courses(&self) -> usize {
        self.num_courses
    }

    /// Returns the position of the next course to decide.
    #[inline(always)]
    pub fn next_position(&self) -> usize {
        self.next_position
    }

    #[inline(always)]
    pub fn num_decided(&self) -> usize {
        self.next_position
    }

    /// Returns `true` once every course has been decided.
    #[inline(always)]
    pub fn is_complete(&self) -> bool {
        self.next_position == self.num_courses
    }

    #[inline(always)]
    pub fn num_selected(&self) -> usize {
        self.timeline.len()
    }

    /// Returns the credits of the accepted courses.
    #[inline(always)]
    pub fn credits(&self) -> u32 {
        self.credits
    }

    /// Returns the total gap of the accepted courses.
    #[inline(always)]
    pub fn gap(&self) -> f64 {
        self.gap
    }

    /// Returns `true` if the course at `position` has been decided.
    #[inline(always)]
    pub fn is_decided(&self, position: usize) -> bool {
        position < self.next_position
    }

    /// Returns `true` if the course at `position` has been accepted.
    #[inline(always)]
    pub fn is_selected(&self, position: usize) -> bool {
        debug_assert!(
            position < self.num_courses,
            "called `SearchState::is_selected` with position out of bounds: the len is {} but the position is {}",
            self.num_courses,
            position
        );
        self.selected.contains(position)
    }

    /// Returns the accepted courses in chronological order.
    #[inline(always)]
    pub fn timeline(&self) -> &[TimelineEntry] {
        &self.timeline
    }

    /// Returns the index at which a course with this interval would be
    /// inserted into the timeline.
    #[inline]
    pub fn insertion_point(&self, interval: &TimeInterval<f64>) -> usize {
        self.timeline
            .partition_point(|entry| entry.interval.start() < interval.start())
    }

    /// Returns `true` if `interval` overlaps an accepted course.
    ///
    /// Only the chronological neighbours have to be checked because the
    /// timeline is sorted and non-overlapping.
    #[inline]
    pub fn conflicts(&self, interval: &TimeInterval<f64>) -> bool {
        let index = self.insertion_point(interval);
        (index > 0 && self.timeline[index - 1].interval.overlaps(interval))
            || (index < self.timeline.len() && self.timeline[index].interval.overlaps(interval))
    }

    /// Returns the change of the total gap if a non-conflicting course with
    /// this interval were accepted.
    ///
    /// The new course replaces the gap between its neighbours by the two gaps
    /// it leaves on either side. Appending after the last course reduces to
    /// the gap to the previously last course.
    #[inline]
    pub fn gap_delta(&self, interval: &TimeInterval<f64>) -> f64 {
        let index = self.insertion_point(interval);
        let previous = index.checked_sub(1).map(|i| self.timeline[i].interval);
        let next = self.timeline.get(index).map(|entry| entry.interval);

        match (previous, next) {
            (Some(p), Some(n)) => p.gap_to(interval) + interval.gap_to(&n) - p.gap_to(&n),
            (Some(p), None) => p.gap_to(interval),
            (None, Some(n)) => interval.gap_to(&n),
            (None, None) => 0.0,
        }
    }

    /// Returns how much of the idle time between the neighbours of
    /// `interval` it would cover. Zero if it lies before the first or after
    /// the last accepted course.
    #[inline]
    pub fn idle_overlap(&self, interval: &TimeInterval<f64>) -> f64 {
        let index = self.insertion_point(interval);
        if index == 0 || index >= self.timeline.len() {
            return 0.0;
        }
        let before = self.timeline[index - 1].interval.end();
        let after = self.timeline[index].interval.start();
        TimeInterval::try_new(before, after).map_or(0.0, |idle| idle.intersection_len(interval))
    }

    /// Returns the span from the first start to the last end of the accepted
    /// courses.
    #[inline]
    pub fn span(&self) -> Option<TimeInterval<f64>> {
        let first = self.timeline.first()?;
        let last = self.timeline.last()?;
        Some(first.interval.hull(&last.interval))
    }

    /// Inserts an accepted course and sets the new totals.
    #[inline]
    pub(crate) fn insert(
        &mut self,
        timeline_index: usize,
        entry: TimelineEntry,
        new_credits: u32,
        new_gap: f64,
    ) {
        debug_assert!(
            !self.selected.contains(entry.position),
            "called `SearchState::insert` with position {} which is already selected",
            entry.position
        );
        self.timeline.insert(timeline_index, entry);
        self.selected.insert(entry.position);
        self.credits = new_credits;
        self.gap = non_negative(new_gap);
    }

    /// Removes the accepted course at `timeline_index` and restores the totals.
    #[inline]
    pub(crate) fn remove(&mut self, timeline_index: usize, old_credits: u32, old_gap: f64) {
        let entry = self.timeline.remove(timeline_index);
        self.selected.set(entry.position, false);
        self.credits = old_credits;
        self.gap = old_gap;
    }

    #[inline(always)]
    pub(crate) fn set_next_position(&mut self, position: usize) {
        debug_assert!(
            position <= self.num_courses,
            "called `SearchState::set_next_position` with position out of bounds: the len is {} but the position is {}",
            self.num_courses,
            position
        );
        self.next_position = position;
    }
}

impl std::fmt::Display for SearchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchState(decided: {}/{}, selected: {}, credits: {}, gap: {:.2})",
            self.next_position,
            self.num_courses,
            self.timeline.len(),
            self.credits,
            self.gap
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: f64, end: f64) -> TimeInterval<f64> {
        TimeInterval::new(start, end)
    }

    fn state_with(intervals: &[(f64, f64)]) -> SearchState {
        let mut state = SearchState::new(intervals.len() + 4);
        for (position, &(start, end)) in intervals.iter().enumerate() {
            let interval = iv(start, end);
            let index = state.insertion_point(&interval);
            let gap = state.gap() + state.gap_delta(&interval);
            state.insert(index, TimelineEntry::new(interval, position), 1, gap);
        }
        state
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = SearchState::new(3);
        assert_eq!(state.next_position(), 0);
        assert!(!state.is_complete());
        assert_eq!(state.num_selected(), 0);
        assert_eq!(state.span(), None);
        assert!(SearchState::new(0).is_complete());
    }

    #[test]
    fn test_conflicts_checks_both_neighbours() {
        let state = state_with(&[(8.0, 10.0), (12.0, 14.0)]);
        assert!(state.conflicts(&iv(9.0, 11.0)));
        assert!(state.conflicts(&iv(13.0, 14.5)));
        assert!(state.conflicts(&iv(7.0, 15.0)));
        assert!(!state.conflicts(&iv(10.0, 12.0)));
        assert!(!state.conflicts(&iv(14.0, 15.0)));
        assert!(!state.conflicts(&iv(6.0, 8.0)));
    }

    #[test]
    fn test_gap_delta_for_append_prepend_and_insert() {
        let state = state_with(&[(8.0, 10.0), (14.0, 16.0)]);
        assert_eq!(state.gap(), 4.0);
        // Append after the last course.
        assert_eq!(state.gap_delta(&iv(17.0, 18.0)), 1.0);
        // Prepend before the first course.
        assert_eq!(state.gap_delta(&iv(6.0, 7.0)), 1.0);
        // Fill the middle: 4h idle become 1h + 1h.
        assert_eq!(state.gap_delta(&iv(11.0, 13.0)), -2.0);
        // Fill it exactly.
        assert_eq!(state.gap_delta(&iv(10.0, 14.0)), -4.0);
    }

    #[test]
    fn test_idle_overlap() {
        let state = state_with(&[(8.0, 10.0), (14.0, 16.0)]);
        assert_eq!(state.idle_overlap(&iv(11.0, 12.0)), 1.0);
        assert_eq!(state.idle_overlap(&iv(10.0, 14.0)), 4.0);
        assert_eq!(state.idle_overlap(&iv(17.0, 18.0)), 0.0);
        assert_eq!(state.idle_overlap(&iv(6.0, 7.0)), 0.0);
    }

    #[test]
    fn test_insert_keeps_timeline_sorted_and_remove_restores() {
        let mut state = state_with(&[(14.0, 16.0), (8.0, 10.0)]);
        let starts: Vec<f64> = state.timeline().iter().map(|e| e.interval().start()).collect();
        assert_eq!(starts, vec![8.0, 14.0]);
        assert!(state.is_selected(0));
        assert!(state.is_selected(1));
        assert_eq!(state.span(), Some(iv(8.0, 16.0)));

        state.remove(0, 1, 0.0);
        assert!(!state.is_selected(1));
        assert_eq!(state.num_selected(), 1);
        assert_eq!(state.gap(), 0.0);
    }
}
