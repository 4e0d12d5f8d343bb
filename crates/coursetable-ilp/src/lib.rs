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

//! Coursetable-ILP: course selection as a mixed-integer linear program
//!
//! The selection problem is written down once as a solver-neutral
//! `program::LinearProgram` and handed to a `backend::MilpBackend`. The
//! default backend translates the program for `good_lp` and solves it with
//! the pure-Rust `microlp` solver; any other MILP solver can be plugged in by
//! implementing the trait.
//!
//! Module map
//! - `program`: variables, linear expressions, constraints and objective.
//! - `backend`: the `MilpBackend` capability and its `Assignment` result.
//! - `good_lp_backend`: `GoodLpBackend`, the default backend.
//! - `formulation`: the course selection model (conflicts, prerequisites,
//!   span variables for the gap).
//! - `ilp`: `IlpSolver`, which solves the three objectives and turns the
//!   assignment back into a validated `Schedule`.
//! - `error`: `IlpError`.

pub mod backend;
pub mod error;
pub mod formulation;
pub mod good_lp_backend;
pub mod ilp;
pub mod program;
