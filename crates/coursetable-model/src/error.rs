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

//! Validation errors of the domain model.
//!
//! `CourseError` and `CatalogError` are raised at construction time and never
//! afterwards. `ScheduleViolation` is produced by
//! `timing::validate_selection` when a selection breaks a hard constraint.

use thiserror::Error;

/// A course could not be constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CourseError {
    #[error("course id must not be empty")]
    EmptyId,
    #[error("course `{id}` has non-finite time bounds ({start}, {end})")]
    NonFiniteTime { id: String, start: f64, end: f64 },
    #[error("course `{id}` must start before it ends (start {start}, end {end})")]
    InvalidInterval { id: String, start: f64, end: f64 },
    #[error("course `{id}` must carry at least one credit")]
    ZeroCredits { id: String },
    #[error("course `{id}` lists itself as a prerequisite")]
    SelfPrerequisite { id: String },
}

/// A catalog could not be constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("duplicate course id `{0}`")]
    DuplicateId(String),
    #[error("total catalog credits exceed {}", u32::MAX)]
    CreditOverflow,
    #[error(transparent)]
    Course(#[from] CourseError),
}

/// A selection breaks one of the hard scheduling constraints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleViolation {
    #[error("course `{0}` is not part of the catalog")]
    UnknownCourse(String),
    #[error("courses `{first}` and `{second}` overlap")]
    Conflict { first: String, second: String },
    #[error("course `{course}` requires `{prerequisite}`, which is neither selected nor completed")]
    MissingPrerequisite {
        course: String,
        prerequisite: String,
    },
}
