//! Inspection route pipeline: costs, program, solve, trail, narrative.

mod narrative;
mod to_geojson;
mod trail;

pub use narrative::{Itinerary, RouteStep, StepAction, narrate};
pub use trail::{Trail, extract_trail};

use log::info;

use crate::model::StreetNetwork;
use crate::solve::{RouteProgram, SolveOutcome, SolveStatus, solve};
use crate::{Error, FuelCostModel, StreetNodeId};

/// Fallback MILP budget when the configuration leaves it unset.
pub const DEFAULT_SOLVER_TIME_LIMIT_SECS: u32 = 600;

/// Parameters of one inspection run.
#[derive(Debug, Clone)]
pub struct RouteParams {
    pub start_node: StreetNodeId,
    pub end_node: StreetNodeId,
    pub fuel_price_per_liter: f64,
    pub km_per_liter: f64,
    /// Soft wall-clock ceiling for the MILP solve
    pub solver_time_limit_secs: u32,
}

/// A solved inspection route with its narration.
#[derive(Debug, Clone)]
pub struct InspectionRoute {
    /// `Optimal`, or `Feasible` when the time budget cut the proof short
    pub status: SolveStatus,
    pub total_cost: f64,
    /// Total traversed distance in km, derived from the cost model
    pub total_distance_km: f64,
    pub trail: Trail,
    pub itinerary: Itinerary,
}

/// What one pipeline run produced.
#[derive(Debug)]
pub enum RouteOutcome {
    Solved(InspectionRoute),
    /// The solver ended without a usable solution; the status says why
    Unsolved(SolveStatus),
}

/// Runs the whole pipeline on a normalized network.
///
/// Configuration problems (unknown endpoints, non-positive fuel or time
/// parameters) fail before any solver work. Solver verdicts travel as
/// data in the outcome. Once a solution exists, failing to walk it is an
/// internal invariant violation and comes back as an error - a partial
/// route is never returned.
///
/// # Errors
///
/// `Error::InvalidConfig` / `Error::UnknownNode` for bad parameters,
/// `Error::Reconstruction` when the solution admits no Eulerian trail.
pub fn plan_route(network: &StreetNetwork, params: &RouteParams) -> Result<RouteOutcome, Error> {
    let costs = FuelCostModel::new(params.fuel_price_per_liter, params.km_per_liter)?;
    if params.solver_time_limit_secs == 0 {
        return Err(Error::InvalidConfig(
            "solver time limit must be positive".into(),
        ));
    }
    let start = network.node_index(params.start_node)?;
    let end = network.node_index(params.end_node)?;
    if start == end {
        info!("start and end coincide; formulating a closed inspection circuit");
    }

    let program = RouteProgram::build(network, &costs, start, end)?;
    let SolveOutcome { status, flows } = solve(program, params.solver_time_limit_secs);
    let Some(flows) = flows else {
        info!("no route: {status}");
        return Ok(RouteOutcome::Unsolved(status));
    };

    let mut total_cost = 0.0;
    for &((from, to), multiplicity) in &flows {
        if let Some(street) = network.street_between(from, to) {
            total_cost += costs.street_cost(street.length_m) * f64::from(multiplicity);
        }
    }
    let total_distance_km = total_cost / costs.cost_per_km();

    let trail = trail::extract_trail(network, &flows, start)?;
    if let Some(&(_, last)) = trail.last()
        && last != end
    {
        return Err(Error::Reconstruction(format!(
            "walk ended at '{}' instead of '{}'",
            network.node(last).description,
            network.node(end).description
        )));
    }

    let itinerary = narrative::narrate(network, &trail);
    info!(
        "route solved ({status}): cost {total_cost:.2}, {total_distance_km:.2} km, {} steps",
        itinerary.len()
    );

    Ok(RouteOutcome::Solved(InspectionRoute {
        status,
        total_cost,
        total_distance_km,
        trail,
        itinerary,
    }))
}
