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

//! # Tree Search Monitors
//!
//! Pluggable observers and controllers for the branch-and-bound loop.
//! Monitors can log progress, enforce budgets and stop the search without
//! touching the engine.
//!
//! ## Submodules
//!
//! - `tree_search_monitor`: Core trait (`TreeSearchMonitor`) and `PruneReason`.
//! - `composite`: Fan-out over several monitors.
//! - `log`: Periodic progress lines through the `log` facade.
//! - `no_op`: A monitor that does nothing.
//! - `node_limit`: Stops after a number of explored nodes.
//! - `solution`: Stops after a number of improving solutions.
//! - `time_limit`: Wall-clock budget with step-filtered clock checks.

pub mod composite;
pub mod log;
pub mod no_op;
pub mod node_limit;
pub mod solution;
pub mod time_limit;
pub mod tree_search_monitor;
