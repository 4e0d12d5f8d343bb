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

use crate::decision::Decision;

/// A frame-structured LIFO stack of pending decisions.
///
/// `SearchStack` stores all enqueued `Decision`s linearly and uses a
/// `frames` index stack to mark decision-level boundaries. Popping a frame
/// truncates `entries` back to the recorded start index.
#[derive(Clone, Debug, Default)]
pub struct SearchStack {
    /// The linear stack of pending decisions.
    entries: Vec<Decision>,
    /// `frames[i]` stores the index in `entries` where depth `i` began.
    frames: Vec<usize>,
}

impl SearchStack {
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Creates a stack with room for a full path over `num_courses` courses.
    /// Every level holds at most two decisions.
    #[inline]
    pub fn preallocated(num_courses: usize) -> Self {
        Self {
            entries: Vec::with_capacity(num_courses.saturating_mul(2)),
            frames: Vec::with_capacity(num_courses.saturating_add(1)),
        }
    }

    /// Ensures the stack holds a full path over `num_courses` courses without
    /// reallocating.
    #[inline]
    pub fn ensure_capacity(&mut self, num_courses: usize) {
        let entry_capacity = num_courses.saturating_mul(2);
        let frame_capacity = num_courses.saturating_add(1);

        if self.entries.capacity() < entry_capacity {
            self.entries.reserve(entry_capacity - self.entries.len());
        }
        if self.frames.capacity() < frame_capacity {
            self.frames.reserve(frame_capacity - self.frames.len());
        }
    }

    #[inline]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    /// Returns the current search depth.
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

    /// Pops the current frame, dropping its remaining decisions.
    #[inline]
    pub fn pop_frame(&mut self) -> Option<()> {
        let start = self.frames.pop()?;
        if self.entries.len() > start {
            self.entries.truncate(start);
        }
        Some(())
    }

    #[inline]
    pub fn push(&mut self, decision: Decision) {
        self.entries.push(decision);
    }

    /// Pops the next decision (LIFO).
    #[inline]
    pub fn pop(&mut self) -> Option<Decision> {
        self.entries.pop()
    }

    /// Clears all entries and frames, keeping the allocations.
    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
        self.frames.clear();
    }

    /// Returns `true` if the current level has no remaining decisions.
    #[inline]
    pub fn is_current_level_empty(&self) -> bool {
        match self.frames.last() {
            Some(&start) => self.entries.len() <= start,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_scope_decisions() {
        let mut stack = SearchStack::preallocated(2);
        assert!(stack.is_empty());
        assert!(stack.is_current_level_empty());

        stack.push_frame();
        stack.push(Decision::exclude(0));
        stack.push(Decision::include(0));
        assert_eq!(stack.depth(), 1);
        assert!(!stack.is_current_level_empty());

        assert_eq!(stack.pop(), Some(Decision::include(0)));
        stack.push_frame();
        assert!(stack.is_current_level_empty());
        stack.push(Decision::include(1));
        assert_eq!(stack.num_entries(), 2);

        stack.pop_frame();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.num_entries(), 1);
        assert_eq!(stack.pop(), Some(Decision::exclude(0)));
        assert!(stack.is_current_level_empty());
    }

    #[test]
    fn test_reset() {
        let mut stack = SearchStack::new();
        stack.ensure_capacity(4);
        stack.push_frame();
        stack.push(Decision::include(0));
        stack.reset();
        assert!(stack.is_empty());
        assert_eq!(stack.num_entries(), 0);
        assert_eq!(stack.pop_frame(), None);
    }
}
