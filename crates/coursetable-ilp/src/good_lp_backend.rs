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

//! The default MILP backend: `good_lp` with the pure-Rust `microlp` solver.

use crate::{
    backend::{Assignment, MilpBackend},
    error::IlpError,
    program::{LinearExpr, LinearProgram, Relation, Sense, VariableKind},
};
use good_lp::{
    Expression, ProblemVariables, Solution, SolverModel, Variable, constraint,
    solvers::microlp::microlp, variable,
};

/// Solves programs through `good_lp` using `microlp`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GoodLpBackend;

impl GoodLpBackend {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

fn to_expression(expr: &LinearExpr, handles: &[Variable]) -> Expression {
    let mut expression = Expression::from(expr.constant_term());
    for &(variable, coefficient) in expr.terms() {
        expression += coefficient * handles[variable.get()];
    }
    expression
}

impl MilpBackend for GoodLpBackend {
    fn name(&self) -> &str {
        "good_lp/microlp"
    }

    fn solve(&mut self, program: &LinearProgram) -> Result<Assignment, IlpError> {
        if program.num_variables() == 0 {
            return Ok(Assignment::new(Vec::new()));
        }

        let mut vars = ProblemVariables::new();
        let handles: Vec<Variable> = program
            .variables()
            .iter()
            .map(|kind| match *kind {
                VariableKind::Binary => vars.add(variable().binary()),
                VariableKind::Continuous { min, max } => vars.add(variable().min(min).max(max)),
            })
            .collect();

        let objective = to_expression(program.objective(), &handles);
        let unsolved = match program.sense() {
            Sense::Minimize => vars.minimise(objective),
            Sense::Maximize => vars.maximise(objective),
        };

        let mut problem = unsolved.using(microlp);
        for c in program.constraints() {
            let lhs = to_expression(&c.expr, &handles);
            let rhs = c.rhs;
            problem = problem.with(match c.relation {
                Relation::LessOrEqual => constraint!(lhs <= rhs),
                Relation::GreaterOrEqual => constraint!(lhs >= rhs),
                Relation::Equal => constraint!(lhs == rhs),
            });
        }

        let solution = problem
            .solve()
            .map_err(|e| IlpError::Backend(e.to_string()))?;

        Ok(Assignment::new(
            handles.iter().map(|&handle| solution.value(handle)).collect(),
        ))
    }
}
