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
use coursetable_core::num::{approx_eq, definitely_less, non_negative};
use coursetable_model::course::Course;
use std::cmp::Ordering;

/// The lexicographic value of FO2: smaller gap first, then more credits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GapValue {
    pub gap: f64,
    pub credits: u32,
}

impl std::fmt::Display for GapValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gap {:.2}h, {} cr", self.gap, self.credits)
    }
}

/// FO2: minimize the total gap, breaking ties by more credits.
///
/// Courses are decided by ascending end time, so an accepted course is
/// always appended after the previous one. The bound pairs the smallest gap
/// still reachable with the largest credit total still reachable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MinGapStrategy;

impl MinGapStrategy {
    #[inline(always)]
    pub fn new() -> Self {
        Self
    }
}

impl ObjectiveStrategy for MinGapStrategy {
    type Value = GapValue;

    fn name(&self) -> &str {
        "MinGapStrategy"
    }

    #[inline]
    fn compare_courses(&self, a: &Course, b: &Course) -> Ordering {
        a.end_time().total_cmp(&b.end_time())
    }

    #[inline(always)]
    fn value(&self, credits: u32, gap: f64) -> GapValue {
        GapValue { gap, credits }
    }

    #[inline]
    fn bound(&self, state: &SearchState, order: &SearchOrder) -> GapValue {
        GapValue {
            gap: non_negative(state.gap() - fillable_idle_time(state, order)),
            credits: state
                .credits()
                .saturating_add(order.remaining_credits(state.next_position())),
        }
    }

    #[inline]
    fn is_better(&self, candidate: &GapValue, incumbent: &GapValue) -> bool {
        definitely_less(candidate.gap, incumbent.gap)
            || (approx_eq(candidate.gap, incumbent.gap) && candidate.credits > incumbent.credits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::testing::{assert_bound_admissible, catalog_from_specs, course_specs};
    use proptest::prelude::*;

    fn value(gap: f64, credits: u32) -> GapValue {
        GapValue { gap, credits }
    }

    #[test]
    fn test_lexicographic_comparison() {
        let strategy = MinGapStrategy::new();
        assert!(strategy.is_better(&value(0.0, 1), &value(1.0, 10)));
        assert!(strategy.is_better(&value(0.0, 8), &value(0.0, 0)));
        assert!(!strategy.is_better(&value(0.0, 8), &value(0.0, 8)));
        assert!(!strategy.is_better(&value(1e-12, 9), &value(0.0, 9)));
        assert!(strategy.is_better(&value(1e-12, 9), &value(0.0, 8)));
        assert!(!strategy.is_better(&value(2.0, 100), &value(1.0, 0)));
    }

    #[test]
    fn test_ordering_by_end_time() {
        let strategy = MinGapStrategy::new();
        let a = Course::new("A", "A", 8.0, 10.0, 4).unwrap();
        let c = Course::new("C", "C", 8.0, 13.0, 8).unwrap();
        assert_eq!(strategy.compare_courses(&a, &c), Ordering::Less);
    }

    #[test]
    fn test_display() {
        assert_eq!(value(1.5, 7).to_string(), "gap 1.50h, 7 cr");
    }

    proptest! {
        #[test]
        fn prop_bound_is_admissible(specs in course_specs(7)) {
            assert_bound_admissible(&MinGapStrategy::new(), &catalog_from_specs(&specs));
        }
    }
}
