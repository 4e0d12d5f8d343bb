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

/// The schedule a solver returns, tagged with what is known about it.
///
/// The empty schedule is always feasible, so there is no infeasible case.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverResult {
    /// The search completed and proved this schedule optimal.
    Optimal(Schedule),
    /// The best schedule found before the search was stopped.
    Feasible(Schedule),
}

impl SolverResult {
    /// Returns the schedule regardless of its status.
    #[inline]
    pub fn schedule(&self) -> &Schedule {
        match self {
            SolverResult::Optimal(schedule) | SolverResult::Feasible(schedule) => schedule,
        }
    }

    #[inline]
    pub fn into_schedule(self) -> Schedule {
        match self {
            SolverResult::Optimal(schedule) | SolverResult::Feasible(schedule) => schedule,
        }
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolverResult::Optimal(_))
    }

    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self, SolverResult::Feasible(_))
    }

    /// Returns the schedule of an optimal result.
    ///
    /// # Panics
    ///
    /// Panics if the result is not `Optimal`.
    #[inline]
    pub fn unwrap_optimal(self) -> Schedule {
        match self {
            SolverResult::Optimal(schedule) => schedule,
            SolverResult::Feasible(_) => {
                panic!("called `SolverResult::unwrap_optimal` on a `Feasible` value")
            }
        }
    }

    /// Returns the schedule of a feasible (not proven optimal) result.
    ///
    /// # Panics
    ///
    /// Panics if the result is `Optimal`.
    #[inline]
    pub fn unwrap_feasible(self) -> Schedule {
        match self {
            SolverResult::Feasible(schedule) => schedule,
            SolverResult::Optimal(_) => {
                panic!("called `SolverResult::unwrap_feasible` on an `Optimal` value")
            }
        }
    }
}

impl std::fmt::Display for SolverResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Optimal(schedule) => write!(f, "Optimal({})", schedule),
            SolverResult::Feasible(schedule) => write!(f, "Feasible({})", schedule),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// Every branch was decided or pruned.
    OptimalityProven,
    /// A search limit (time, nodes, solutions) stopped the search.
    /// The string names the limit.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}
