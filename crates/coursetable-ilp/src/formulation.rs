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

//! The course selection model.
//!
//! One binary `x_i` per catalog course and two continuous span variables
//! `S` (first start) and `E` (last end) in `[lo, hi]`, the catalog span:
//!
//! - conflicts: `x_i + x_j <= 1` for every overlapping pair,
//! - prerequisites: `x_i <= x_p` for a catalog prerequisite `p` that is not
//!   completed, `x_i = 0` for an unknown prerequisite that is not completed,
//! - span: `E >= lo + (end_i - lo) x_i`, `S <= hi - (hi - start_i) x_i` and
//!   `S <= E`.
//!
//! With non-overlapping selected courses the gap is `E - S - sum(dur_i x_i)`,
//! exact whenever the objective pushes the span tight (any objective that
//! rewards a smaller gap).

use crate::{
    backend::Assignment,
    program::{LinearExpr, LinearProgram, Relation, VariableIndex},
};
use coursetable_model::{
    catalog::Catalog,
    index::CourseIndex,
    schedule::{Schedule, Selection},
};

/// The constraints of the course selection model, without an objective.
#[derive(Clone, Debug)]
pub struct Formulation {
    program: LinearProgram,
    courses: Vec<VariableIndex>,
    span_start: VariableIndex,
    span_end: VariableIndex,
}

impl Formulation {
    /// Builds the model for `catalog`, or `None` for an empty catalog.
    pub fn new(catalog: &Catalog, completed: &Selection) -> Option<Self> {
        let span = catalog.span()?;
        let (lo, hi) = (span.start(), span.end());

        let mut program = LinearProgram::new();
        let courses: Vec<VariableIndex> = (0..catalog.len()).map(|_| program.add_binary()).collect();
        let span_start = program.add_continuous(lo, hi);
        let span_end = program.add_continuous(lo, hi);

        for (index, course) in catalog.iter() {
            let x = courses[index.get()];

            for (other_index, other) in catalog.iter().skip(index.get() + 1) {
                if course.conflicts_with(other) {
                    program.add_constraint(
                        LinearExpr::new()
                            .with_term(x, 1.0)
                            .with_term(courses[other_index.get()], 1.0),
                        Relation::LessOrEqual,
                        1.0,
                    );
                }
            }

            for prerequisite in course.prerequisites() {
                if completed.contains(prerequisite) {
                    continue;
                }
                match catalog.index_of(prerequisite) {
                    Some(p) => program.add_constraint(
                        LinearExpr::new()
                            .with_term(x, 1.0)
                            .with_term(courses[p.get()], -1.0),
                        Relation::LessOrEqual,
                        0.0,
                    ),
                    None => program.add_constraint(
                        LinearExpr::new().with_term(x, 1.0),
                        Relation::Equal,
                        0.0,
                    ),
                }
            }

            program.add_constraint(
                LinearExpr::new()
                    .with_term(span_end, 1.0)
                    .with_term(x, lo - course.end_time()),
                Relation::GreaterOrEqual,
                lo,
            );
            program.add_constraint(
                LinearExpr::new()
                    .with_term(span_start, 1.0)
                    .with_term(x, hi - course.start_time()),
                Relation::LessOrEqual,
                hi,
            );
        }

        program.add_constraint(
            LinearExpr::new()
                .with_term(span_start, 1.0)
                .with_term(span_end, -1.0),
            Relation::LessOrEqual,
            0.0,
        );

        log::trace!(
            "formulated {} courses as {} variables and {} constraints",
            catalog.len(),
            program.num_variables(),
            program.num_constraints()
        );

        Some(Self {
            program,
            courses,
            span_start,
            span_end,
        })
    }

    /// The constraints (objective unset).
    #[inline]
    pub fn program(&self) -> &LinearProgram {
        &self.program
    }

    /// The binary variable of a course.
    #[inline]
    pub fn course_variable(&self, index: CourseIndex) -> VariableIndex {
        self.courses[index.get()]
    }

    /// `sum(credits_i x_i)`.
    pub fn credits(&self, catalog: &Catalog) -> LinearExpr {
        let mut expr = LinearExpr::new();
        for (index, course) in catalog.iter() {
            expr.add_term(self.courses[index.get()], f64::from(course.credits()));
        }
        expr
    }

    /// `E - S - sum(duration_i x_i)`.
    pub fn gap(&self, catalog: &Catalog) -> LinearExpr {
        let mut expr = LinearExpr::new()
            .with_term(self.span_end, 1.0)
            .with_term(self.span_start, -1.0);
        for (index, course) in catalog.iter() {
            expr.add_term(self.courses[index.get()], -course.duration());
        }
        expr
    }

    /// Reads the selected courses off an assignment. Totals are recomputed
    /// from the courses, not taken from the span variables.
    pub fn schedule(&self, catalog: &Catalog, assignment: &Assignment) -> Schedule {
        Schedule::from_courses(
            catalog
                .iter()
                .filter(|(index, _)| assignment.is_set(self.courses[index.get()]))
                .map(|(_, course)| course),
        )
    }
}
