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

//! Solver-neutral linear programs.
//!
//! A `LinearProgram` is a list of variables (binary or bounded continuous),
//! a linear objective with a sense and a list of linear constraints of the
//! form `expr (<=|>=|=) rhs`. Variables are addressed by `VariableIndex`.

use coursetable_core::utils::index::{TypedIndex, TypedIndexTag};

/// A tag type for variable indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct VariableIndexTag;

impl TypedIndexTag for VariableIndexTag {
    const NAME: &'static str = "VariableIndex";
}

/// A typed index of a variable inside a `LinearProgram`.
pub type VariableIndex = TypedIndex<VariableIndexTag>;

/// The domain of a variable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VariableKind {
    /// An integer variable in `{0, 1}`.
    Binary,
    /// A real variable in `[min, max]`.
    Continuous { min: f64, max: f64 },
}

impl std::fmt::Display for VariableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableKind::Binary => write!(f, "binary"),
            VariableKind::Continuous { min, max } => write!(f, "[{}, {}]", min, max),
        }
    }
}

/// `sum(coefficient * variable) + constant`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VariableIndex, f64)>,
    constant: f64,
}

impl LinearExpr {
    /// The zero expression.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// A constant expression.
    #[inline]
    pub fn constant(value: f64) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    /// Adds `coefficient * variable`.
    #[inline]
    pub fn add_term(&mut self, variable: VariableIndex, coefficient: f64) {
        self.terms.push((variable, coefficient));
    }

    /// Builder form of `add_term`.
    #[inline]
    pub fn with_term(mut self, variable: VariableIndex, coefficient: f64) -> Self {
        self.add_term(variable, coefficient);
        self
    }

    /// Adds every term and the constant of `other`, scaled by `factor`.
    pub fn add_scaled(&mut self, other: &LinearExpr, factor: f64) {
        self.terms.extend(
            other
                .terms
                .iter()
                .map(|&(variable, coefficient)| (variable, coefficient * factor)),
        );
        self.constant += other.constant * factor;
    }

    #[inline]
    pub fn terms(&self) -> &[(VariableIndex, f64)] {
        &self.terms
    }

    #[inline]
    pub fn constant_term(&self) -> f64 {
        self.constant
    }

    /// Evaluates the expression for the given variable values.
    ///
    /// # Panics
    ///
    /// Panics if a term refers to a variable outside `values`.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .fold(self.constant, |acc, &(variable, coefficient)| {
                acc + coefficient * values[variable.get()]
            })
    }
}

impl std::fmt::Display for LinearExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (variable, coefficient)) in self.terms.iter().enumerate() {
            if i == 0 {
                write!(f, "{} x{}", coefficient, variable.get())?;
            } else if *coefficient < 0.0 {
                write!(f, " - {} x{}", -coefficient, variable.get())?;
            } else {
                write!(f, " + {} x{}", coefficient, variable.get())?;
            }
        }
        if self.terms.is_empty() {
            write!(f, "{}", self.constant)
        } else if self.constant != 0.0 {
            write!(f, " + {}", self.constant)
        } else {
            Ok(())
        }
    }
}

/// The relation of a constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    LessOrEqual,
    GreaterOrEqual,
    Equal,
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::LessOrEqual => write!(f, "<="),
            Relation::GreaterOrEqual => write!(f, ">="),
            Relation::Equal => write!(f, "="),
        }
    }
}

/// `expr relation rhs`.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint {
    pub expr: LinearExpr,
    pub relation: Relation,
    pub rhs: f64,
}

impl Constraint {
    /// Returns `true` if the constraint holds for `values` up to `tolerance`.
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.relation {
            Relation::LessOrEqual => lhs <= self.rhs + tolerance,
            Relation::GreaterOrEqual => lhs >= self.rhs - tolerance,
            Relation::Equal => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.expr, self.relation, self.rhs)
    }
}

/// The direction of optimization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Sense {
    #[default]
    Minimize,
    Maximize,
}

impl std::fmt::Display for Sense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sense::Minimize => write!(f, "minimize"),
            Sense::Maximize => write!(f, "maximize"),
        }
    }
}

/// A mixed-integer linear program.
#[derive(Clone, Debug, Default)]
pub struct LinearProgram {
    variables: Vec<VariableKind>,
    objective: LinearExpr,
    sense: Sense,
    constraints: Vec<Constraint>,
}

impl LinearProgram {
    /// An empty program minimizing zero.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binary variable.
    #[inline]
    pub fn add_binary(&mut self) -> VariableIndex {
        self.add_variable(VariableKind::Binary)
    }

    /// Adds a continuous variable in `[min, max]`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max` or either bound is NaN.
    #[inline]
    pub fn add_continuous(&mut self, min: f64, max: f64) -> VariableIndex {
        assert!(
            min <= max,
            "called `LinearProgram::add_continuous` with empty domain [{}, {}]",
            min,
            max
        );
        self.add_variable(VariableKind::Continuous { min, max })
    }

    #[inline]
    fn add_variable(&mut self, kind: VariableKind) -> VariableIndex {
        let index = VariableIndex::new(self.variables.len());
        self.variables.push(kind);
        index
    }

    /// Replaces the objective.
    #[inline]
    pub fn set_objective(&mut self, sense: Sense, objective: LinearExpr) {
        self.sense = sense;
        self.objective = objective;
    }

    /// Adds the constraint `expr relation rhs`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `expr` refers to an unknown variable.
    #[inline]
    pub fn add_constraint(&mut self, expr: LinearExpr, relation: Relation, rhs: f64) {
        debug_assert!(
            expr.terms()
                .iter()
                .all(|(variable, _)| variable.get() < self.variables.len()),
            "called `LinearProgram::add_constraint` with an unknown variable in {}",
            expr
        );
        self.constraints.push(Constraint {
            expr,
            relation,
            rhs,
        });
    }

    #[inline]
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    #[inline]
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    #[inline]
    pub fn variables(&self) -> &[VariableKind] {
        &self.variables
    }

    #[inline]
    pub fn variable(&self, index: VariableIndex) -> VariableKind {
        self.variables[index.get()]
    }

    #[inline]
    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    #[inline]
    pub fn sense(&self) -> Sense {
        self.sense
    }

    #[inline]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
}

impl std::fmt::Display for LinearProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} {}", self.sense, self.objective)?;
        writeln!(f, "subject to")?;
        for constraint in &self.constraints {
            writeln!(f, "  {}", constraint)?;
        }
        write!(f, "with")?;
        for (i, kind) in self.variables.iter().enumerate() {
            write!(f, "\n  x{} {}", i, kind)?;
        }
        Ok(())
    }
}
