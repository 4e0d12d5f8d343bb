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

use crate::{
    objective::ObjectiveStrategy,
    order::SearchOrder,
    state::SearchState,
};
use coursetable_model::course::Course;
use std::cmp::Ordering;

/// FO1: maximize the total credits.
///
/// Courses are decided by descending credits, then ascending end time. The
/// bound adds the credits of every open course to the accepted credits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaxCreditsStrategy;

impl MaxCreditsStrategy {
    #[inline(always)]
    pub fn new() -> Self {
        Self
    }
}

impl ObjectiveStrategy for MaxCreditsStrategy {
    type Value = u32;

    fn name(&self) -> &str {
        "MaxCreditsStrategy"
    }

    #[inline]
    fn compare_courses(&self, a: &Course, b: &Course) -> Ordering {
        b.credits()
            .cmp(&a.credits())
            .then_with(|| a.end_time().total_cmp(&b.end_time()))
    }

    #[inline(always)]
    fn value(&self, credits: u32, _gap: f64) -> u32 {
        credits
    }

    #[inline(always)]
    fn bound(&self, state: &SearchState, order: &SearchOrder) -> u32 {
        state
            .credits()
            .saturating_add(order.remaining_credits(state.next_position()))
    }

    #[inline(always)]
    fn is_better(&self, candidate: &u32, incumbent: &u32) -> bool {
        candidate > incumbent
    }
}
