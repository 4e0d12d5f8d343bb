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

//! # Coursetable Model
//!
//! The domain model of the course selection problem. It is the data
//! interchange layer between the caller's course data and the solving crates
//! (`coursetable_bnb`, `coursetable_greedy`, `coursetable_ilp`).
//!
//! ## Architecture
//!
//! * **`index`**: `CourseIndex`, a typed position inside a `Catalog`.
//! * **`course`**: The immutable, validated `Course` and its serializable
//!   `CourseRecord` form.
//! * **`catalog`**: `Catalog`, the ordered and id-unique set of courses with
//!   an id lookup.
//! * **`schedule`**: `Selection` (a set of course ids) and `Schedule`, the
//!   `(selection, total credits, total gap)` triple every algorithm returns.
//! * **`timing`**: Pure interval, gap and prerequisite utilities, plus
//!   `validate_selection` to check any schedule against the hard constraints.
//! * **`error`**: Validation errors.
//!
//! Constructors validate eagerly, so the solvers never see a malformed course.

pub mod catalog;
pub mod course;
pub mod error;
pub mod index;
pub mod schedule;
pub mod timing;
