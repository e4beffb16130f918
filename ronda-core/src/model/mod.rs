//! Street network model
//!
//! Raw graph types as produced by the acquisition layer, and the
//! normalized undirected network the optimizer works on.

pub mod components;
mod naming;
pub mod network;
pub mod raw;

pub use components::{Street, StreetNode, UNNAMED_STREET};
pub use network::StreetNetwork;
pub use raw::{RawEdge, RawNetwork, RawNode};
