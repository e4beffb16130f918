//! Re-export of the types most callers need to load a network, plan an
//! inspection route and consume the result.

pub use crate::error::Error;

pub use crate::cost::FuelCostModel;
pub use crate::loading::{RouteConfig, read_network};
pub use crate::model::{RawNetwork, StreetNetwork};
pub use crate::route::{
    InspectionRoute, Itinerary, RouteOutcome, RouteParams, RouteStep, plan_route,
};
pub use crate::solve::SolveStatus;

pub use crate::Arc;
pub use crate::StreetNodeId;
