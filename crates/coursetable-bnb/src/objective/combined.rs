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
    objective::{ObjectiveStrategy, fillable_idle_time},
    order::SearchOrder,
    state::SearchState,
};
use coursetable_core::num::{definitely_greater, non_negative};
use coursetable_model::course::Course;
use std::cmp::Ordering;

/// FO3: maximize `credits - penalty * gap`.
///
/// Courses are decided by ascending `end_time / credits`. The bound adds all
/// open credits and gives back the penalty on the idle time open courses
/// could still fill, which keeps it admissible when a later course lands in
/// an existing gap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CombinedStrategy {
    penalty: f64,
}

impl CombinedStrategy {
    /// Creates a new `CombinedStrategy`.
    ///
    /// # Panics
    ///
    /// Panics if `penalty` is negative or not finite.
    #[inline]
    pub fn new(penalty: f64) -> Self {
        assert!(
            penalty.is_finite() && penalty >= 0.0,
            "called `CombinedStrategy::new` with invalid penalty: {}",
            penalty
        );
        Self { penalty }
    }

    /// Creates a new `CombinedStrategy`, or `None` if `penalty` is negative
    /// or not finite.
    #[inline]
    pub fn try_new(penalty: f64) -> Option<Self> {
        if penalty.is_finite() && penalty >= 0.0 {
            Some(Self { penalty })
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn penalty(&self) -> f64 {
        self.penalty
    }
}

impl ObjectiveStrategy for CombinedStrategy {
    type Value = f64;

    fn name(&self) -> &str {
        "CombinedStrategy"
    }

    #[inline]
    fn compare_courses(&self, a: &Course, b: &Course) -> Ordering {
        let ka = a.end_time() / f64::from(a.credits());
        let kb = b.end_time() / f64::from(b.credits());
        ka.total_cmp(&kb)
    }

    #[inline(always)]
    fn value(&self, credits: u32, gap: f64) -> f64 {
        f64::from(credits) - self.penalty * gap
    }

    #[inline]
    fn bound(&self, state: &SearchState, order: &SearchOrder) -> f64 {
        let credits = state
            .credits()
            .saturating_add(order.remaining_credits(state.next_position()));
        let gap = non_negative(state.gap() - fillable_idle_time(state, order));
        f64::from(credits) - self.penalty * gap
    }

    #[inline(always)]
    fn is_better(&self, candidate: &f64, incumbent: &f64) -> bool {
        definitely_greater(*candidate, *incumbent)
    }
}
