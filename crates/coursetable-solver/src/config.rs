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

//! Planner configuration.
//!
//! `PlannerConfig` derives `serde` with defaults for every field, so it can be
//! embedded in a larger configuration file and only the interesting fields
//! need to be spelled out.

use coursetable_search::objective::Objective;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// An algorithm the planner can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// The exact branch-and-bound engine.
    BranchAndBound,
    /// The greedy heuristic.
    Greedy,
    /// The MILP formulation with the default backend.
    Ilp,
}

impl Algorithm {
    /// Every algorithm, in report order.
    pub const ALL: [Algorithm; 3] = [Algorithm::BranchAndBound, Algorithm::Greedy, Algorithm::Ilp];

    /// Returns `true` if the algorithm proves optimality when it finishes.
    #[inline]
    pub fn is_exact(&self) -> bool {
        !matches!(self, Algorithm::Greedy)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::BranchAndBound => write!(f, "Branch-and-Bound"),
            Algorithm::Greedy => write!(f, "Greedy"),
            Algorithm::Ilp => write!(f, "ILP"),
        }
    }
}

/// What to compare and under which limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// The objective every algorithm optimizes.
    pub objective: Objective,
    /// The algorithms to run, in report order.
    pub algorithms: Vec<Algorithm>,
    /// Wall-clock budget of the branch-and-bound search.
    pub time_limit: Option<Duration>,
    /// Node budget of the branch-and-bound search.
    pub node_limit: Option<u64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            objective: Objective::MaxCredits,
            algorithms: Algorithm::ALL.to_vec(),
            time_limit: None,
            node_limit: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_runs_everything() {
        let config = PlannerConfig::default();
        assert_eq!(config.objective, Objective::MaxCredits);
        assert_eq!(config.algorithms, Algorithm::ALL.to_vec());
        assert_eq!(config.time_limit, None);
        assert_eq!(config.node_limit, None);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: PlannerConfig = serde_json::from_str(
            r#"{ "objective": { "kind": "combined", "penalty": 0.5 }, "algorithms": ["greedy"] }"#,
        )
        .unwrap();
        assert_eq!(config.objective, Objective::combined(0.5));
        assert_eq!(config.algorithms, vec![Algorithm::Greedy]);
        assert_eq!(config.node_limit, None);

        let config: PlannerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    fn test_round_trip() {
        let config = PlannerConfig {
            objective: Objective::MinGap,
            algorithms: vec![Algorithm::Ilp, Algorithm::BranchAndBound],
            time_limit: Some(Duration::from_millis(1500)),
            node_limit: Some(10_000),
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<PlannerConfig>(&json).unwrap(), config);
    }

    #[test]
    fn test_algorithm_display() {
        assert_eq!(Algorithm::BranchAndBound.to_string(), "Branch-and-Bound");
        assert_eq!(Algorithm::Ilp.to_string(), "ILP");
        assert!(!Algorithm::Greedy.is_exact());
    }
}
