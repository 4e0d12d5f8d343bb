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

//! Solving the three objectives through a MILP backend.
//!
//! `MaxCredits` and `Combined` are single programs. `MinGap` is lexicographic
//! and needs two: the first minimizes the gap, the second maximizes credits
//! among selections whose gap stays within `GAP_TOLERANCE` of that minimum.
//! Every returned schedule is validated against the catalog, so a backend
//! that violates a constraint is reported instead of trusted.

use crate::{
    backend::MilpBackend,
    error::IlpError,
    formulation::Formulation,
    good_lp_backend::GoodLpBackend,
    program::{Relation, Sense},
};
use coursetable_model::{
    catalog::Catalog,
    schedule::{Schedule, Selection},
    timing::validate_selection,
};
use coursetable_search::objective::Objective;

/// Slack granted to the gap when maximizing credits in the second `MinGap`
/// stage. Large enough to absorb solver round-off, far below any real gap
/// difference on hour-based timetables.
pub const GAP_TOLERANCE: f64 = 1e-6;

/// Solves course selection as a MILP with a pluggable backend.
#[derive(Clone, Debug, Default)]
pub struct IlpSolver<B = GoodLpBackend> {
    backend: B,
}

impl IlpSolver<GoodLpBackend> {
    /// Creates a solver using the default `good_lp`/`microlp` backend.
    #[inline]
    pub fn with_default_backend() -> Self {
        Self::new(GoodLpBackend::new())
    }
}

impl<B> IlpSolver<B>
where
    B: MilpBackend,
{
    #[inline]
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Solves the catalog for `objective` with no completed courses.
    #[inline]
    pub fn solve(&mut self, catalog: &Catalog, objective: &Objective) -> Result<Schedule, IlpError> {
        self.solve_with_completed(catalog, &Selection::new(), objective)
    }

    /// Solves the catalog for `objective`. Prerequisites listed in
    /// `completed` count as satisfied without being scheduled.
    ///
    /// # Panics
    ///
    /// Panics if `objective` is a combined objective with an invalid penalty.
    pub fn solve_with_completed(
        &mut self,
        catalog: &Catalog,
        completed: &Selection,
        objective: &Objective,
    ) -> Result<Schedule, IlpError> {
        assert!(
            objective.is_valid(),
            "called `IlpSolver::solve_with_completed` with invalid objective {}",
            objective
        );

        let Some(formulation) = Formulation::new(catalog, completed) else {
            return Ok(Schedule::empty());
        };

        let credits = formulation.credits(catalog);
        let gap = formulation.gap(catalog);

        let assignment = match *objective {
            Objective::MaxCredits => {
                let mut program = formulation.program().clone();
                program.set_objective(Sense::Maximize, credits);
                self.backend.solve(&program)?
            }
            Objective::Combined { penalty } => {
                let mut score = credits;
                score.add_scaled(&gap, -penalty);
                let mut program = formulation.program().clone();
                program.set_objective(Sense::Maximize, score);
                self.backend.solve(&program)?
            }
            Objective::MinGap => {
                let mut program = formulation.program().clone();
                program.set_objective(Sense::Minimize, gap.clone());
                let first = self.backend.solve(&program)?;
                let best_gap = gap.evaluate(first.values());
                log::debug!("minimum gap stage finished at {:.4}h", best_gap);

                let mut program = formulation.program().clone();
                program.add_constraint(gap, Relation::LessOrEqual, best_gap + GAP_TOLERANCE);
                program.set_objective(Sense::Maximize, credits);
                self.backend.solve(&program)?
            }
        };

        let schedule = formulation.schedule(catalog, &assignment);
        validate_selection(catalog, schedule.selection(), completed)?;

        log::debug!(
            "ILP ({}, {}) found {}",
            self.backend.name(),
            objective,
            schedule
        );

        Ok(schedule)
    }
}

/// Solves `catalog` for `objective` with the default backend.
pub fn solve(catalog: &Catalog, objective: &Objective) -> Result<Schedule, IlpError> {
    IlpSolver::with_default_backend().solve(catalog, objective)
}
