//! Normalized undirected street network.

use geo::Point;
use hashbrown::HashMap;
use log::{debug, info};
use petgraph::graph::{NodeIndex, UnGraph};

use super::components::{Street, StreetNode};
use super::naming;
use super::raw::RawNetwork;
use crate::{Error, StreetNodeId};

/// The simplified network the optimizer works on.
///
/// Nodes and streets live in petgraph's dense arenas and are referenced by
/// index everywhere downstream; external ids resolve through an id map.
/// After normalization there is exactly one street per endpoint pair and
/// no self-loops. Built once per run, then read-only.
#[derive(Debug, Clone)]
pub struct StreetNetwork {
    pub graph: UnGraph<StreetNode, Street>,
    node_ids: HashMap<StreetNodeId, NodeIndex>,
}

impl StreetNetwork {
    /// Builds the solver network from the raw directed multigraph.
    ///
    /// Self-loops are discarded (they carry no coverage requirement and
    /// would corrupt flow balance) and parallel edges collapse into the
    /// first one seen. Intersection names are derived from the raw graph
    /// before any pruning, so a removed parallel edge still contributes
    /// its street name.
    ///
    /// # Errors
    ///
    /// Fails on duplicate node ids or edges referencing undeclared nodes.
    pub fn from_raw(raw: &RawNetwork) -> Result<Self, Error> {
        // Street names incident to each node, from the unpruned raw graph.
        let mut incident_names: HashMap<StreetNodeId, Vec<&str>> = HashMap::new();
        for edge in &raw.edges {
            if let Some(name) = edge.primary_name() {
                incident_names.entry(edge.from).or_default().push(name);
                incident_names.entry(edge.to).or_default().push(name);
            }
        }

        let mut graph = UnGraph::with_capacity(raw.nodes.len(), raw.edges.len());
        let mut node_ids = HashMap::with_capacity(raw.nodes.len());
        for raw_node in &raw.nodes {
            let mut names = incident_names.remove(&raw_node.id).unwrap_or_default();
            names.sort_unstable();
            names.dedup();

            let index = graph.add_node(StreetNode {
                id: raw_node.id,
                geometry: Point::new(raw_node.x, raw_node.y),
                description: naming::intersection_name(raw_node.id, &names),
            });
            if node_ids.insert(raw_node.id, index).is_some() {
                return Err(Error::InvalidData(format!(
                    "duplicate node id {}",
                    raw_node.id
                )));
            }
        }

        let mut self_loops = 0usize;
        let mut collapsed = 0usize;
        for edge in &raw.edges {
            if edge.from == edge.to {
                self_loops += 1;
                continue;
            }
            let from = *node_ids
                .get(&edge.from)
                .ok_or(Error::UnknownNode(edge.from))?;
            let to = *node_ids.get(&edge.to).ok_or(Error::UnknownNode(edge.to))?;
            if graph.find_edge(from, to).is_some() {
                // Parallel or reverse duplicate of a street already kept.
                collapsed += 1;
                continue;
            }
            graph.add_edge(
                from,
                to,
                Street {
                    length_m: edge.length,
                    name: edge.primary_name().map(str::to_owned),
                },
            );
        }

        if self_loops > 0 || collapsed > 0 {
            debug!("normalization dropped {self_loops} self-loops and {collapsed} parallel edges");
        }
        info!(
            "street network ready: {} nodes, {} streets",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Self { graph, node_ids })
    }

    /// Resolves an external node id to its arena index.
    ///
    /// # Errors
    ///
    /// `Error::UnknownNode` when the id is not part of the network.
    pub fn node_index(&self, id: StreetNodeId) -> Result<NodeIndex, Error> {
        self.node_ids
            .get(&id)
            .copied()
            .ok_or(Error::UnknownNode(id))
    }

    pub fn node(&self, index: NodeIndex) -> &StreetNode {
        &self.graph[index]
    }

    /// Street between two endpoints, in either orientation.
    pub fn street_between(&self, a: NodeIndex, b: NodeIndex) -> Option<&Street> {
        self.graph.find_edge(a, b).map(|edge| &self.graph[edge])
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn street_count(&self) -> usize {
        self.graph.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::raw::{RawEdge, RawNode};

    fn raw_edge(from: StreetNodeId, to: StreetNodeId, length: f64, name: Option<&str>) -> RawEdge {
        RawEdge {
            from,
            to,
            length,
            name: name.map(|n| vec![n.to_owned()]).unwrap_or_default(),
        }
    }

    fn raw_nodes(ids: &[StreetNodeId]) -> Vec<RawNode> {
        ids.iter()
            .map(|&id| RawNode {
                id,
                x: id as f64,
                y: 0.0,
            })
            .collect()
    }

    #[test]
    fn self_loops_are_dropped() {
        let raw = RawNetwork {
            nodes: raw_nodes(&[1, 2]),
            edges: vec![
                raw_edge(1, 1, 30.0, Some("Loop")),
                raw_edge(1, 2, 100.0, Some("Main Street")),
            ],
        };
        let network = StreetNetwork::from_raw(&raw).unwrap();
        assert_eq!(network.street_count(), 1);
    }

    #[test]
    fn parallel_edges_collapse_keeping_the_first_length() {
        let raw = RawNetwork {
            nodes: raw_nodes(&[1, 2]),
            edges: vec![
                raw_edge(1, 2, 100.0, Some("Main Street")),
                raw_edge(2, 1, 120.0, Some("Main Street")),
                raw_edge(1, 2, 95.0, None),
            ],
        };
        let network = StreetNetwork::from_raw(&raw).unwrap();
        assert_eq!(network.street_count(), 1);

        let a = network.node_index(1).unwrap();
        let b = network.node_index(2).unwrap();
        let street = network.street_between(a, b).unwrap();
        assert_eq!(street.length_m, 100.0);
        assert_eq!(street.name.as_deref(), Some("Main Street"));
    }

    #[test]
    fn direction_is_discarded() {
        let raw = RawNetwork {
            nodes: raw_nodes(&[1, 2]),
            edges: vec![raw_edge(1, 2, 100.0, None)],
        };
        let network = StreetNetwork::from_raw(&raw).unwrap();
        let a = network.node_index(1).unwrap();
        let b = network.node_index(2).unwrap();
        assert!(network.street_between(a, b).is_some());
        assert!(network.street_between(b, a).is_some());
    }

    #[test]
    fn descriptions_come_from_the_raw_graph_sorted() {
        let raw = RawNetwork {
            nodes: raw_nodes(&[1, 2, 3, 4]),
            edges: vec![
                raw_edge(2, 1, 50.0, Some("Oak Avenue")),
                raw_edge(1, 3, 60.0, Some("Main Street")),
                raw_edge(1, 4, 70.0, Some("Elm Street")),
                // Parallel edge: pruned from the network, still named
                raw_edge(1, 2, 50.0, Some("Oak Avenue")),
            ],
        };
        let network = StreetNetwork::from_raw(&raw).unwrap();
        let center = network.node_index(1).unwrap();
        assert_eq!(
            network.node(center).description,
            "Junction of Elm Street, Main Street and Oak Avenue"
        );
        let end = network.node_index(2).unwrap();
        assert_eq!(network.node(end).description, "End of Oak Avenue");
    }

    #[test]
    fn nodes_without_named_streets_are_points() {
        let raw = RawNetwork {
            nodes: raw_nodes(&[7, 8]),
            edges: vec![raw_edge(7, 8, 10.0, None)],
        };
        let network = StreetNetwork::from_raw(&raw).unwrap();
        let node = network.node_index(7).unwrap();
        assert_eq!(network.node(node).description, "Point 7");
    }

    #[test]
    fn unknown_edge_endpoint_is_rejected() {
        let raw = RawNetwork {
            nodes: raw_nodes(&[1]),
            edges: vec![raw_edge(1, 9, 10.0, None)],
        };
        assert!(matches!(
            StreetNetwork::from_raw(&raw),
            Err(Error::UnknownNode(9))
        ));
    }

    #[test]
    fn unknown_node_lookup_is_rejected() {
        let raw = RawNetwork {
            nodes: raw_nodes(&[1]),
            edges: vec![],
        };
        let network = StreetNetwork::from_raw(&raw).unwrap();
        assert!(matches!(network.node_index(5), Err(Error::UnknownNode(5))));
    }
}
