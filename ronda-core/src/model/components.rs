//! Street network components - intersections and street segments

use geo::Point;

use crate::StreetNodeId;

/// Placeholder narrated for streets that carry no name tag.
pub const UNNAMED_STREET: &str = "unnamed street";

/// Intersection or dead end of the normalized network.
#[derive(Debug, Clone)]
pub struct StreetNode {
    /// External (OSM-style) id of the node
    pub id: StreetNodeId,
    /// Node coordinates
    pub geometry: Point<f64>,
    /// Descriptive name derived from the incident street names
    pub description: String,
}

/// Undirected street segment between two distinct intersections.
///
/// Exactly one `Street` exists per physical block after normalization;
/// both traversal directions share its length and cost.
#[derive(Debug, Clone)]
pub struct Street {
    /// Length in meters
    pub length_m: f64,
    /// Street name, the first of the raw edge's tags when several exist
    pub name: Option<String>,
}

impl Street {
    /// Name used in narration; unnamed streets get the placeholder.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_STREET)
    }
}
