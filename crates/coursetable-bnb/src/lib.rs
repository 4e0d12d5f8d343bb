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

//! Coursetable-BnB: branch-and-bound for course selection
//!
//! Exact depth-first search over include/exclude decisions, one course at a
//! time, in an order fixed by the objective. The engine separates the
//! objective (ordering key, bound, value, comparison), monitoring and the
//! search mechanics so a new objective never touches the loop.
//!
//! Core flow
//! - Provide a `coursetable_model::catalog::Catalog`.
//! - Choose an `objective::ObjectiveStrategy` (`MaxCreditsStrategy`,
//!   `MinGapStrategy`, `CombinedStrategy`).
//! - Optionally pass the ids of completed courses and a monitor.
//! - Run `bnb::BnbSolver`, or call one of the convenience entry points
//!   (`bnb::max_credits`, `bnb::min_gap`, `bnb::combined`, `bnb::search`).
//!
//! Design highlights
//! - State is mutated in place and restored through a trail (undo log);
//!   pending decisions live in a frame-structured stack.
//! - Accepted courses are kept chronologically, so the gap delta of a new
//!   course only depends on its two neighbours.
//! - Prerequisites may be decided in any order: an accepted course whose
//!   prerequisite is still undecided leaves an obligation that forbids
//!   excluding that prerequisite later.
//! - Ties keep the earliest incumbent, which makes every run deterministic.
//!
//! Module map
//! - `bnb`: the solver engine, session orchestration and entry points.
//! - `objective`: objective strategies and their bounds.
//! - `order`: the fixed search order with prerequisite bookkeeping.
//! - `state`: the mutable search state.
//! - `monitor`: tree-search monitors (log, limits, composite).
//! - `result`: solver outcomes with termination reasons.
//! - `stats`: lightweight counters and timing.

pub mod bnb;
pub mod decision;
mod incumbent;
pub mod monitor;
pub mod objective;
pub mod order;
pub mod result;
mod stack;
pub mod state;
pub mod stats;
mod trail;
