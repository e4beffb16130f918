//! Raw street graph as handed over by the acquisition layer.
//!
//! The raw graph is directed and may contain self-loops and parallel
//! edges between the same endpoints; normalization prunes both. Name tags
//! follow the OSM convention of being either a single string or a list.

use serde::Deserialize;

use crate::StreetNodeId;

#[derive(Debug, Clone, Deserialize)]
pub struct RawNetwork {
    pub nodes: Vec<RawNode>,
    pub edges: Vec<RawEdge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    pub id: StreetNodeId,
    /// Longitude (or projected x)
    pub x: f64,
    /// Latitude (or projected y)
    pub y: f64,
}

/// Directed edge of the raw graph.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEdge {
    pub from: StreetNodeId,
    pub to: StreetNodeId,
    /// Length in meters
    pub length: f64,
    #[serde(default, deserialize_with = "de::name_tag")]
    pub name: Vec<String>,
}

impl RawEdge {
    /// First tagged name - the deterministic pick when several are present.
    pub fn primary_name(&self) -> Option<&str> {
        self.name.first().map(String::as_str)
    }
}

mod de {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NameTag {
        One(String),
        Many(Vec<String>),
    }

    pub(super) fn name_tag<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<NameTag>::deserialize(deserializer)? {
            None => Vec::new(),
            Some(NameTag::One(name)) => vec![name],
            Some(NameTag::Many(names)) => names,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_tag_accepts_string_list_and_null() {
        let json = r#"{
            "nodes": [{"id": 1, "x": 0.0, "y": 0.0}, {"id": 2, "x": 1.0, "y": 0.0}],
            "edges": [
                {"from": 1, "to": 2, "length": 10.0, "name": "Rua Um"},
                {"from": 2, "to": 1, "length": 10.0, "name": ["Rua Um", "R. 1"]},
                {"from": 1, "to": 2, "length": 10.0, "name": null},
                {"from": 2, "to": 1, "length": 10.0}
            ]
        }"#;
        let raw: RawNetwork = serde_json::from_str(json).unwrap();
        assert_eq!(raw.edges[0].primary_name(), Some("Rua Um"));
        assert_eq!(raw.edges[1].name, vec!["Rua Um", "R. 1"]);
        assert_eq!(raw.edges[1].primary_name(), Some("Rua Um"));
        assert_eq!(raw.edges[2].primary_name(), None);
        assert!(raw.edges[3].name.is_empty());
    }
}
