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

use crate::state::{SearchState, TimelineEntry};
use coursetable_core::math::interval::TimeInterval;

/// A record of a single decision applied to the search state.
///
/// `Included` carries what is needed to take the course off the timeline
/// again and restore the totals. `Excluded` only advanced the decision
/// cursor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TrailEntry {
    Included {
        position: usize,
        timeline_index: usize,
        old_credits: u32,
        old_gap: f64,
    },
    Excluded {
        position: usize,
    },
}

impl std::fmt::Display for TrailEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrailEntry::Included {
                position,
                timeline_index,
                old_credits,
                old_gap,
            } => write!(
                f,
                "TrailEntry::Included(position: {}, timeline_index: {}, old_credits: {}, old_gap: {})",
                position, timeline_index, old_credits, old_gap
            ),
            TrailEntry::Excluded { position } => {
                write!(f, "TrailEntry::Excluded(position: {})", position)
            }
        }
    }
}

/// A linear undo log with frame markers for backtracking.
///
/// Typical usage:
/// 1. Call `push_frame()` before applying a decision,
/// 2. apply it with `apply_include` or `apply_exclude`,
/// 3. call `backtrack(state)` to restore the state to the start of the frame.
#[derive(Debug, Clone, Default)]
pub struct SearchTrail {
    /// The linear history of all changes made to the state.
    entries: Vec<TrailEntry>,
    /// `frames[i]` stores the index in `entries` where depth `i` began.
    frames: Vec<usize>,
}

impl SearchTrail {
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Creates a trail with room for a full path over `num_courses` courses.
    #[inline]
    pub fn preallocated(num_courses: usize) -> Self {
        Self {
            entries: Vec::with_capacity(num_courses),
            frames: Vec::with_capacity(num_courses + 1),
        }
    }

    /// Ensures the trail holds a full path over `num_courses` courses without
    /// reallocating.
    pub fn ensure_capacity(&mut self, num_courses: usize) {
        if self.entries.capacity() < num_courses {
            self.entries.reserve(num_courses - self.entries.len());
        }
        if self.frames.capacity() < num_courses + 1 {
            self.frames.reserve(num_courses + 1 - self.frames.len());
        }
    }

    #[inline]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Marks the start of a new decision level.
    #[inline]
    pub fn push_frame(&mut self) {
        self.frames.push(self.entries.len());
    }

    /// Accepts the course at the state's next position.
    ///
    /// The course is inserted chronologically and the gap is updated by the
    /// neighbour delta. The caller must have checked that `interval` does not
    /// conflict with the timeline.
    pub fn apply_include(
        &mut self,
        state: &mut SearchState,
        position: usize,
        interval: TimeInterval<f64>,
        credits: u32,
    ) {
        debug_assert!(
            position == state.next_position(),
            "called `SearchTrail::apply_include` with position {} but the next open position is {}",
            position,
            state.next_position()
        );
        debug_assert!(
            !state.conflicts(&interval),
            "called `SearchTrail::apply_include` with position {} which overlaps the timeline",
            position
        );

        let timeline_index = state.insertion_point(&interval);
        let old_credits = state.credits();
        let old_gap = state.gap();
        let new_gap = old_gap + state.gap_delta(&interval);

        self.entries.push(TrailEntry::Included {
            position,
            timeline_index,
            old_credits,
            old_gap,
        });

        state.insert(
            timeline_index,
            TimelineEntry::new(interval, position),
            old_credits.saturating_add(credits),
            new_gap,
        );
        state.set_next_position(position + 1);
    }

    /// Rejects the course at the state's next position.
    pub fn apply_exclude(&mut self, state: &mut SearchState, position: usize) {
        debug_assert!(
            position == state.next_position(),
            "called `SearchTrail::apply_exclude` with position {} but the next open position is {}",
            position,
            state.next_position()
        );

        self.entries.push(TrailEntry::Excluded { position });
        state.set_next_position(position + 1);
    }

    /// Backtracks to the previous frame, undoing every decision applied
    /// since then. Does nothing if there is no frame.
    pub fn backtrack(&mut self, state: &mut SearchState) {
        let Some(start) = self.frames.pop() else {
            return;
        };

        while self.entries.len() > start {
            let Some(entry) = self.entries.pop() else {
                break;
            };
            match entry {
                TrailEntry::Included {
                    position,
                    timeline_index,
                    old_credits,
                    old_gap,
                } => {
                    state.remove(timeline_index, old_credits, old_gap);
                    state.set_next_position(position);
                }
                TrailEntry::Excluded { position } => state.set_next_position(position),
            }
        }
    }

    /// Clears all entries and frames, keeping the allocations.
    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
        self.frames.clear();
    }
}

impl std::fmt::Display for SearchTrail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchTrail(entries: {}, depth: {})",
            self.entries.len(),
            self.frames.len()
        )
    }
}
