//! Closed-area street inspection routing.
//!
//! Given a bounded street network and a start/end intersection pair, this
//! crate computes a minimum-cost walk covering every street at least once
//! (the open variant of the Route Inspection Problem) and renders it as a
//! turn-by-turn itinerary. The pipeline is a single batch computation:
//! normalize the raw graph, derive traversal costs, formulate the integer
//! program, solve it with CBC under a time budget, reconstruct the Eulerian
//! trail and narrate it.

use petgraph::graph::NodeIndex;

pub mod cost;
pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod route;
pub mod solve;

pub use cost::FuelCostModel;
pub use error::Error;
pub use loading::{RouteConfig, read_network};
pub use model::{RawEdge, RawNetwork, RawNode, Street, StreetNetwork, StreetNode};
pub use route::{
    DEFAULT_SOLVER_TIME_LIMIT_SECS, InspectionRoute, Itinerary, RouteOutcome, RouteParams,
    RouteStep, StepAction, Trail, extract_trail, narrate, plan_route,
};
pub use solve::{ArcFlows, RouteProgram, SolveOutcome, SolveStatus, solve};

/// External identifier of a street-network node (OSM-style id).
pub type StreetNodeId = i64;

/// One directed traversal orientation of a street, as indices into the
/// normalized network.
pub type Arc = (NodeIndex, NodeIndex);
