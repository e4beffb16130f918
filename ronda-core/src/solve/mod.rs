//! Integer-program formulation and the MILP solver boundary.
//!
//! The formulation is pure data; only [`solve`] talks to the backend.
//! Keeping that seam narrow is what makes the solver technology swappable
//! without touching the formulator or the trail reconstruction.

mod program;
mod solver;

pub use program::RouteProgram;
pub use solver::{ArcFlows, SolveOutcome, SolveStatus, solve};
