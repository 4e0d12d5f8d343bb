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

//! The MILP capability.
//!
//! Everything the ILP solver needs from a mixed-integer solver is one call:
//! solve a `LinearProgram` to optimality and report a value per variable.

use crate::{
    error::IlpError,
    program::{LinearProgram, VariableIndex},
};

/// Threshold above which a binary variable counts as set.
pub const BINARY_THRESHOLD: f64 = 0.5;

/// Optimal variable values of a program, indexed like its variables.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    values: Vec<f64>,
}

impl Assignment {
    /// Wraps the values of every variable, in variable order.
    #[inline]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Returns the value of `variable`.
    ///
    /// # Panics
    ///
    /// Panics if `variable` is out of bounds.
    #[inline]
    pub fn value(&self, variable: VariableIndex) -> f64 {
        self.values[variable.get()]
    }

    /// Returns `true` if the binary `variable` is set.
    #[inline]
    pub fn is_set(&self, variable: VariableIndex) -> bool {
        self.value(variable) > BINARY_THRESHOLD
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A mixed-integer linear programming solver.
pub trait MilpBackend {
    /// Returns the name of the backend.
    fn name(&self) -> &str;

    /// Solves `program` to optimality.
    fn solve(&mut self, program: &LinearProgram) -> Result<Assignment, IlpError>;
}

impl<B> MilpBackend for &mut B
where
    B: MilpBackend + ?Sized,
{
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn solve(&mut self, program: &LinearProgram) -> Result<Assignment, IlpError> {
        (**self).solve(program)
    }
}

impl std::fmt::Debug for dyn MilpBackend + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MilpBackend({})", self.name())
    }
}

impl std::fmt::Display for dyn MilpBackend + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MilpBackend({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_threshold() {
        let assignment = Assignment::new(vec![0.0, 1.0, 0.9999999, 1e-7]);
        assert!(!assignment.is_set(VariableIndex::new(0)));
        assert!(assignment.is_set(VariableIndex::new(1)));
        assert!(assignment.is_set(VariableIndex::new(2)));
        assert!(!assignment.is_set(VariableIndex::new(3)));
        assert_eq!(assignment.len(), 4);
    }
}
