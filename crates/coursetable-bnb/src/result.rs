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

use crate::stats::BnbSolverStatistics;
use coursetable_model::schedule::Schedule;
use coursetable_search::result::{SolverResult, TerminationReason};

/// Result of the solver after termination.
///
/// `V` is the objective value type of the strategy that produced it.
#[derive(Debug, Clone)]
pub struct BnbSolverOutcome<V> {
    result: SolverResult,
    termination_reason: TerminationReason,
    objective_value: V,
    statistics: BnbSolverStatistics,
}

impl<V> BnbSolverOutcome<V> {
    /// The search finished and `schedule` is optimal.
    #[inline]
    pub fn optimal(schedule: Schedule, objective_value: V, statistics: BnbSolverStatistics) -> Self {
        Self {
            result: SolverResult::Optimal(schedule),
            termination_reason: TerminationReason::OptimalityProven,
            objective_value,
            statistics,
        }
    }

    /// The search was stopped; `schedule` is the best one found so far.
    #[inline]
    pub fn aborted<R>(
        schedule: Schedule,
        objective_value: V,
        reason: R,
        statistics: BnbSolverStatistics,
    ) -> Self
    where
        R: Into<String>,
    {
        Self {
            result: SolverResult::Feasible(schedule),
            termination_reason: TerminationReason::Aborted(reason.into()),
            objective_value,
            statistics,
        }
    }

    #[inline]
    pub fn result(&self) -> &SolverResult {
        &self.result
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the objective value of the returned schedule.
    #[inline]
    pub fn objective_value(&self) -> &V {
        &self.objective_value
    }

    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics {
        &self.statistics
    }

    #[inline]
    pub fn schedule(&self) -> &Schedule {
        self.result.schedule()
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        self.result.is_optimal()
    }

    #[inline]
    pub fn into_schedule(self) -> Schedule {
        self.result.into_schedule()
    }

    /// Converts the objective value, keeping everything else.
    #[inline]
    pub fn map_value<U, F>(self, f: F) -> BnbSolverOutcome<U>
    where
        F: FnOnce(V) -> U,
    {
        BnbSolverOutcome {
            result: self.result,
            termination_reason: self.termination_reason,
            objective_value: f(self.objective_value),
            statistics: self.statistics,
        }
    }
}

impl<V> std::fmt::Display for BnbSolverOutcome<V>
where
    V: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result:      {}", self.result)?;
        writeln!(f, "Termination: {}", self.termination_reason)?;
        writeln!(f, "Objective:   {}", self.objective_value)?;
        write!(f, "{}", self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimal_outcome() {
        let outcome = BnbSolverOutcome::optimal(Schedule::empty(), 0u32, BnbSolverStatistics::default());
        assert!(outcome.is_optimal());
        assert_eq!(outcome.termination_reason(), &TerminationReason::OptimalityProven);
        assert_eq!(outcome.objective_value(), &0);
    }

    #[test]
    fn test_aborted_outcome_is_feasible() {
        let outcome = BnbSolverOutcome::aborted(
            Schedule::empty(),
            1.5f64,
            "node limit",
            BnbSolverStatistics::default(),
        );
        assert!(outcome.result().is_feasible());
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::Aborted("node limit".into())
        );
        let mapped = outcome.map_value(|v| v * 2.0);
        assert_eq!(mapped.objective_value(), &3.0);
        assert_eq!(mapped.into_schedule(), Schedule::empty());
    }
}
