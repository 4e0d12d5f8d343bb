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

//! Objective strategies.
//!
//! An `ObjectiveStrategy` tells the engine everything objective-specific:
//! the order in which courses are decided, the value of a complete
//! selection, an optimistic bound for a partial one, and when one value is
//! strictly better than another. The engine is generic over it, so the
//! search loop is shared by all objectives.
//!
//! Bounds must be admissible: no completion of a node may be strictly better
//! than the node's bound, otherwise pruning would lose optimal solutions.
//!
//! Strategies
//! - `max_credits`: FO1, maximize credits.
//! - `min_gap`: FO2, minimize gap, then maximize credits.
//! - `combined`: FO3, maximize `credits - penalty * gap`.

pub mod combined;
pub mod max_credits;
pub mod min_gap;

use crate::{order::SearchOrder, state::SearchState};
use coursetable_core::num::EPSILON;
use coursetable_model::course::Course;
use std::cmp::Ordering;

/// The objective-specific part of the branch-and-bound engine.
pub trait ObjectiveStrategy {
    /// The objective value of a (partial) selection.
    type Value: Copy + PartialEq + std::fmt::Debug + std::fmt::Display;

    /// Returns the name of the strategy.
    fn name(&self) -> &str;

    /// The ordering key: courses are decided in ascending order of this
    /// comparison (stable, ties keep catalog order).
    fn compare_courses(&self, a: &Course, b: &Course) -> Ordering;

    /// The value of a selection with these totals.
    fn value(&self, credits: u32, gap: f64) -> Self::Value;

    /// An optimistic value no completion of `state` can strictly beat.
    fn bound(&self, state: &SearchState, order: &SearchOrder) -> Self::Value;

    /// Returns `true` if `candidate` is strictly better than `incumbent`.
    fn is_better(&self, candidate: &Self::Value, incumbent: &Self::Value) -> bool;
}

/// Returns an upper bound on how much of the current gap the open courses
/// could still fill.
///
/// An open course that is schedulable and conflict-free can only remove idle
/// time by landing inside one of the idle intervals between accepted
/// courses, and by at most its overlap with that interval. Summing those
/// overlaps over all open courses (capped at the current gap) therefore
/// bounds the achievable gap reduction. Courses placed before the first or
/// after the last accepted course never reduce the gap.
pub fn fillable_idle_time(state: &SearchState, order: &SearchOrder) -> f64 {
    let gap = state.gap();
    if gap <= EPSILON {
        return 0.0;
    }

    let mut fillable = 0.0;
    for position in state.next_position()..order.len() {
        if !order.is_schedulable(position) {
            continue;
        }
        let interval = order.interval(position);
        if state.conflicts(&interval) {
            continue;
        }
        fillable += state.idle_overlap(&interval);
        if fillable >= gap {
            return gap;
        }
    }
    fillable
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::trail::SearchTrail;
    use coursetable_core::math::interval::TimeInterval;
    use coursetable_model::{catalog::Catalog, schedule::Selection};

    fn course(id: &str, start: f64, end: f64) -> Course {
        Course::new(id, id, start, end, 1).unwrap()
    }

    #[test]
    fn test_fillable_idle_time_counts_open_courses_inside_gaps() {
        // Decided in catalog order: A and B are accepted, C and D stay open.
        let catalog = Catalog::new(vec![
            course("A", 8.0, 9.0),
            course("B", 14.0, 15.0),
            course("C", 10.0, 11.0),
            course("D", 8.5, 12.0),
        ])
        .unwrap();
        let order = SearchOrder::new(&catalog, &Selection::new(), |_, _| Ordering::Equal);
        let mut state = SearchState::new(order.len());
        let mut trail = SearchTrail::new();
        trail.push_frame();
        trail.apply_include(&mut state, 0, TimeInterval::new(8.0, 9.0), 1);
        trail.apply_include(&mut state, 1, TimeInterval::new(14.0, 15.0), 1);
        assert_eq!(state.gap(), 5.0);

        // C can fill 1h, D conflicts with A.
        assert_eq!(fillable_idle_time(&state, &order), 1.0);
    }

    #[test]
    fn test_strategies_behind_trait_objects() {
        let low = combined::CombinedStrategy::new(0.5);
        let high = combined::CombinedStrategy::new(2.0);
        let strategies: [&dyn ObjectiveStrategy<Value = f64>; 2] = [&low, &high];
        let values: Vec<f64> = strategies.iter().map(|s| s.value(6, 1.0)).collect();
        assert_eq!(values, vec![5.5, 4.0]);
        assert!(strategies.iter().all(|s| s.name() == "CombinedStrategy"));

        let credits: &dyn ObjectiveStrategy<Value = u32> = &max_credits::MaxCreditsStrategy::new();
        assert_eq!(credits.name(), "MaxCreditsStrategy");
        assert!(credits.is_better(&5, &4));
    }

    #[test]
    fn test_fillable_idle_time_is_zero_without_gap() {
        let catalog = Catalog::new(vec![course("A", 8.0, 9.0), course("B", 9.0, 10.0)]).unwrap();
        let order = SearchOrder::new(&catalog, &Selection::new(), |_, _| Ordering::Equal);
        let state = SearchState::new(order.len());
        assert_eq!(fillable_idle_time(&state, &order), 0.0);
    }
}
