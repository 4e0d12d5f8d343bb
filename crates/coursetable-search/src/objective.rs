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

//! Objective descriptors.
//!
//! `Objective` names what a solver optimizes without saying how. Solvers map
//! it onto their own machinery (a search strategy, a linear objective, a
//! sort key). The ranking defined here is the one every solver's result is
//! judged by:
//!
//! - `MaxCredits`: more credits is better.
//! - `MinGap`: smaller total gap is better, ties broken by more credits.
//! - `Combined`: larger `credits - penalty * gap` is better.
//!
//! Gap and score comparisons use `coursetable_core::num::EPSILON`.

use coursetable_core::num::{approx_eq, definitely_less};
use coursetable_model::schedule::Schedule;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// What a solver optimizes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Objective {
    /// Maximize the total credits.
    MaxCredits,
    /// Minimize the total gap; among equal gaps prefer more credits.
    MinGap,
    /// Maximize `credits - penalty * gap`.
    Combined { penalty: f64 },
}

impl Objective {
    /// Creates a combined objective.
    ///
    /// # Panics
    ///
    /// Panics if `penalty` is negative or not finite.
    #[inline]
    pub fn combined(penalty: f64) -> Self {
        assert!(
            penalty.is_finite() && penalty >= 0.0,
            "called `Objective::combined` with invalid penalty: {}",
            penalty
        );
        Objective::Combined { penalty }
    }

    /// Creates a combined objective, or `None` if `penalty` is negative or not
    /// finite.
    #[inline]
    pub fn try_combined(penalty: f64) -> Option<Self> {
        if penalty.is_finite() && penalty >= 0.0 {
            Some(Objective::Combined { penalty })
        } else {
            None
        }
    }

    /// Returns a short machine-friendly name.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Objective::MaxCredits => "max_credits",
            Objective::MinGap => "min_gap",
            Objective::Combined { .. } => "combined",
        }
    }

    /// Returns the gap penalty of a combined objective.
    #[inline]
    pub fn penalty(&self) -> Option<f64> {
        match self {
            Objective::Combined { penalty } => Some(*penalty),
            _ => None,
        }
    }

    /// Returns `false` for a combined objective whose penalty is negative or
    /// not finite. Deserialized objectives should be checked with this.
    #[inline]
    pub fn is_valid(&self) -> bool {
        match self {
            Objective::Combined { penalty } => penalty.is_finite() && *penalty >= 0.0,
            _ => true,
        }
    }

    /// Returns the headline number of a schedule under this objective:
    /// credits, gap or the combined value.
    pub fn score(&self, schedule: &Schedule) -> f64 {
        match self {
            Objective::MaxCredits => f64::from(schedule.total_credits()),
            Objective::MinGap => schedule.total_gap(),
            Objective::Combined { penalty } => {
                f64::from(schedule.total_credits()) - penalty * schedule.total_gap()
            }
        }
    }

    /// Ranks two schedules. `Ordering::Greater` means `a` is better than `b`.
    pub fn compare(&self, a: &Schedule, b: &Schedule) -> Ordering {
        match self {
            Objective::MaxCredits => a.total_credits().cmp(&b.total_credits()),
            Objective::MinGap => {
                if definitely_less(a.total_gap(), b.total_gap()) {
                    Ordering::Greater
                } else if definitely_less(b.total_gap(), a.total_gap()) {
                    Ordering::Less
                } else {
                    a.total_credits().cmp(&b.total_credits())
                }
            }
            Objective::Combined { .. } => {
                let (sa, sb) = (self.score(a), self.score(b));
                if approx_eq(sa, sb) {
                    Ordering::Equal
                } else if sa > sb {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
        }
    }

    /// Returns `true` if `candidate` is strictly better than `incumbent`.
    #[inline]
    pub fn is_better(&self, candidate: &Schedule, incumbent: &Schedule) -> bool {
        self.compare(candidate, incumbent) == Ordering::Greater
    }
}

impl std::fmt::Display for Objective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Objective::MaxCredits => write!(f, "Max Credits"),
            Objective::MinGap => write!(f, "Min Gap"),
            Objective::Combined { penalty } => write!(f, "Combined (penalty {})", penalty),
        }
    }
}
