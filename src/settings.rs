//! # Settings Module
//!
//! ## Purpose
//! Holds the process-level knobs of the balancing engine. Balancing itself is
//! a pure computation; these settings only bound it defensively and control
//! input scrubbing.
//!
//! ## Knobs
//! | Field | Meaning | Default |
//! |-------|---------|---------|
//! | `step_budget` | ceiling on solver row-operation steps before `Timeout` | 1 000 000 |
//! | `strip_phase_marks` | remove trailing `(g)`/`(l)`/`(s)`/`(c)`/`(aq)` from formulas | `true` |

use crate::Balancer::rational_nullspace::DEFAULT_STEP_BUDGET;

/// Configuration for a balancing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalancerSettings {
    /// Solver aborts with a timeout error once this many elementary row
    /// operations have been spent.
    pub step_budget: usize,
    /// Strip trailing phase annotations before parsing formulas.
    pub strip_phase_marks: bool,
}

impl Default for BalancerSettings {
    fn default() -> Self {
        Self {
            step_budget: DEFAULT_STEP_BUDGET,
            strip_phase_marks: true,
        }
    }
}

impl BalancerSettings {
    pub fn with_step_budget(step_budget: usize) -> Self {
        Self {
            step_budget,
            ..Self::default()
        }
    }
}
