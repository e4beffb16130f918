//! GeoJSON rendering of a solved route.

use geo::LineString;
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use crate::Error;
use crate::model::StreetNetwork;

use super::InspectionRoute;
use super::narrative::RouteStep;

impl InspectionRoute {
    /// Renders the route as a `GeoJSON` `FeatureCollection`: one
    /// `LineString` feature per step, in walking order, carrying the
    /// narration in its properties.
    ///
    /// # Errors
    ///
    /// `Error::GeoJsonError` when a feature cannot be assembled.
    pub fn to_geojson(&self, network: &StreetNetwork) -> Result<FeatureCollection, Error> {
        let features = self
            .itinerary
            .steps
            .iter()
            .zip(&self.trail)
            .map(|(step, &(from, to))| step_feature(network, step, from, to))
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    /// # Errors
    ///
    /// See [`InspectionRoute::to_geojson`].
    pub fn to_geojson_string(&self, network: &StreetNetwork) -> Result<String, Error> {
        Ok(serde_json::to_string(&self.to_geojson(network)?)?)
    }
}

fn step_feature(
    network: &StreetNetwork,
    step: &RouteStep,
    from: petgraph::graph::NodeIndex,
    to: petgraph::graph::NodeIndex,
) -> Result<Feature, Error> {
    let from_point = network.node(from).geometry;
    let to_point = network.node(to).geometry;
    let line = LineString::from(vec![
        (from_point.x(), from_point.y()),
        (to_point.x(), to_point.y()),
    ]);

    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new(GeoJsonValue::from(&line)),
        "properties": {
            "step": step.ordinal,
            "action": step.action.kind(),
            "street": step.street,
            "destination": step.destination,
        }
    });

    serde_json::from_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawEdge, RawNetwork, RawNode};
    use crate::route::{narrate, Trail};
    use crate::solve::SolveStatus;

    #[test]
    fn one_feature_per_step_with_narration_properties() {
        let raw = RawNetwork {
            nodes: vec![
                RawNode { id: 1, x: 0.0, y: 0.0 },
                RawNode { id: 2, x: 1.0, y: 0.0 },
            ],
            edges: vec![RawEdge {
                from: 1,
                to: 2,
                length: 100.0,
                name: vec!["Main Street".to_owned()],
            }],
        };
        let network = StreetNetwork::from_raw(&raw).unwrap();
        let trail: Trail = vec![(
            network.node_index(1).unwrap(),
            network.node_index(2).unwrap(),
        )];
        let itinerary = narrate(&network, &trail);
        let route = InspectionRoute {
            status: SolveStatus::Optimal,
            total_cost: 0.1,
            total_distance_km: 0.1,
            trail,
            itinerary,
        };

        let collection = route.to_geojson(&network).unwrap();
        assert_eq!(collection.features.len(), 1);

        let properties = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(properties["step"], 1);
        assert_eq!(properties["action"], "start");
        assert_eq!(properties["street"], "Main Street");
        assert_eq!(properties["destination"], "End of Main Street");
    }
}
