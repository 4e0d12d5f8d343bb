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

use coursetable_model::schedule::Schedule;

/// The best complete selection found so far and its objective value.
///
/// A search starts from the empty schedule, which is always feasible, so
/// there is always an incumbent to return.
#[derive(Debug, Clone)]
pub struct Incumbent<V> {
    value: V,
    schedule: Schedule,
}

impl<V> Incumbent<V>
where
    V: Copy,
{
    /// Creates the incumbent for the empty schedule with the given value.
    #[inline]
    pub fn empty(value: V) -> Self {
        Self {
            value,
            schedule: Schedule::empty(),
        }
    }

    #[inline(always)]
    pub fn value(&self) -> &V {
        &self.value
    }

    #[inline(always)]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Replaces the incumbent.
    #[inline]
    pub fn install(&mut self, value: V, schedule: Schedule) {
        self.value = value;
        self.schedule = schedule;
    }

    #[inline]
    pub fn into_parts(self) -> (V, Schedule) {
        (self.value, self.schedule)
    }
}
