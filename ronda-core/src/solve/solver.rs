//! CBC solver adapter.

use std::fmt;

use good_lp::{ResolutionError, Solution, SolverModel};
use log::{info, warn};

use super::program::RouteProgram;
use crate::Arc;

/// Verdict classes reported back from the MILP backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveStatus {
    /// Proven optimal within the time budget
    Optimal,
    /// Best incumbent found when the budget expired without a proof
    Feasible,
    Infeasible,
    Unbounded,
    /// Backend failure, including budget expiry with no usable incumbent
    Error(String),
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "optimal"),
            SolveStatus::Feasible => write!(f, "feasible, not proven optimal"),
            SolveStatus::Infeasible => write!(f, "infeasible"),
            SolveStatus::Unbounded => write!(f, "unbounded"),
            SolveStatus::Error(reason) => write!(f, "solver error: {reason}"),
        }
    }
}

/// Strictly positive arc multiplicities of a solution, in arc order.
pub type ArcFlows = Vec<(Arc, u32)>;

/// What one solver invocation produced. `flows` is present exactly on
/// `Optimal` and `Feasible`.
#[derive(Debug)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    pub flows: Option<ArcFlows>,
}

impl SolveOutcome {
    fn unsolved(status: SolveStatus) -> Self {
        Self {
            status,
            flows: None,
        }
    }
}

/// Slack tolerated when reading integer variables back from the backend.
const INTEGRALITY_EPS: f64 = 1e-4;

/// Hands the program to CBC under a soft wall-clock budget and reads the
/// arc multiplicities back.
///
/// Solver verdicts are data, not errors: an infeasible model or a backend
/// failure returns an outcome carrying the status, and the caller decides
/// what to do with it.
pub fn solve(program: RouteProgram, time_limit_secs: u32) -> SolveOutcome {
    let RouteProgram {
        vars,
        objective,
        constraints,
        arcs,
        arc_vars,
    } = program;

    let mut model = vars
        .minimise(objective)
        .using(good_lp::solvers::coin_cbc::coin_cbc);
    model.set_parameter("seconds", &time_limit_secs.to_string());
    model.set_parameter("log", "0");
    for constraint in constraints {
        model.add_constraint(constraint);
    }

    info!("starting CBC with a {time_limit_secs}s budget");
    let solution = match model.solve() {
        Ok(solution) => solution,
        Err(ResolutionError::Infeasible) => {
            return SolveOutcome::unsolved(SolveStatus::Infeasible);
        }
        Err(ResolutionError::Unbounded) => {
            return SolveOutcome::unsolved(SolveStatus::Unbounded);
        }
        Err(other) => {
            warn!("CBC returned no usable solution: {other}");
            return SolveOutcome::unsolved(SolveStatus::Error(other.to_string()));
        }
    };

    let status = if solution.model().is_proven_optimal() {
        SolveStatus::Optimal
    } else {
        // The time budget elapsed; CBC hands back its best incumbent.
        SolveStatus::Feasible
    };

    let mut flows: ArcFlows = Vec::new();
    for (&arc, &var) in arcs.iter().zip(&arc_vars) {
        let value = solution.value(var);
        let rounded = value.round();
        if (value - rounded).abs() > INTEGRALITY_EPS {
            warn!("arc variable came back non-integral ({value}), rounding to {rounded}");
        }
        if rounded > 0.0 {
            flows.push((arc, rounded as u32));
        }
    }

    info!("CBC finished: {status}, {} arcs in use", flows.len());
    SolveOutcome {
        status,
        flows: Some(flows),
    }
}
