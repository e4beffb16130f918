//! Eulerian trail reconstruction from an arc-multiplicity solution.

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use log::debug;
use petgraph::graph::NodeIndex;

use crate::model::StreetNetwork;
use crate::solve::ArcFlows;
use crate::{Arc, Error};

/// Ordered arc sequence of the inspection walk.
pub type Trail = Vec<Arc>;

/// Rebuilds the directed Eulerian multigraph described by `flows` and
/// extracts the trail leaving from `start`.
///
/// The solution is verified before walking it: every node the flows touch
/// must be reachable from `start` ignoring direction, and in/out degrees
/// must balance except for a surplus departure at `start` and a surplus
/// arrival at one other node (or balance everywhere, for a closed
/// circuit). A violation cannot come from a well-posed solve and is
/// reported as a reconstruction failure - never as an empty or partial
/// route.
///
/// Several unused copies at a node are consumed in arc order, so the same
/// solution always reconstructs the same trail.
///
/// # Errors
///
/// `Error::Reconstruction` when the flows do not admit an Eulerian trail
/// from `start`.
pub fn extract_trail(
    network: &StreetNetwork,
    flows: &ArcFlows,
    start: NodeIndex,
) -> Result<Trail, Error> {
    let total_copies: usize = flows.iter().map(|&(_, m)| m as usize).sum();
    if total_copies == 0 {
        return Err(Error::Reconstruction(
            "solution contains no traversals".into(),
        ));
    }

    // One out-entry per traversal copy, in arc order.
    let mut out: HashMap<NodeIndex, Vec<NodeIndex>> = HashMap::new();
    let mut balance: HashMap<NodeIndex, i64> = HashMap::new();
    for &((from, to), multiplicity) in flows {
        for _ in 0..multiplicity {
            out.entry(from).or_default().push(to);
        }
        *balance.entry(from).or_default() += i64::from(multiplicity);
        *balance.entry(to).or_default() -= i64::from(multiplicity);
    }

    verify_balance(network, &balance, start)?;
    verify_connectivity(network, flows, start)?;

    // Hierholzer with an explicit stack: follow unused copies until stuck,
    // sub-circuits splice in as the stack unwinds.
    let mut cursor: HashMap<NodeIndex, usize> = HashMap::with_capacity(out.len());
    let mut stack = vec![start];
    let mut walk_rev: Vec<NodeIndex> = Vec::with_capacity(total_copies + 1);
    while let Some(&node) = stack.last() {
        let next_unused = cursor.entry(node).or_insert(0);
        match out.get(&node).and_then(|targets| targets.get(*next_unused)) {
            Some(&target) => {
                *next_unused += 1;
                stack.push(target);
            }
            None => {
                walk_rev.push(node);
                stack.pop();
            }
        }
    }

    // Guarded by the checks above; kept as a hard invariant.
    if walk_rev.len() != total_copies + 1 {
        return Err(Error::Reconstruction(format!(
            "walk consumed {} of {} traversals",
            walk_rev.len().saturating_sub(1),
            total_copies
        )));
    }

    walk_rev.reverse();
    let trail: Trail = walk_rev.windows(2).map(|pair| (pair[0], pair[1])).collect();
    debug!("reconstructed a trail of {} arcs", trail.len());
    Ok(trail)
}

/// In/out-degree balance must be confined to a +1 at `start` and a -1 at
/// the walk's end, or be zero everywhere for a closed circuit.
fn verify_balance(
    network: &StreetNetwork,
    balance: &HashMap<NodeIndex, i64>,
    start: NodeIndex,
) -> Result<(), Error> {
    let mut surplus = None;
    let mut deficit = None;
    for (&node, &net) in balance {
        match net {
            0 => {}
            1 => {
                if surplus.replace(node).is_some() {
                    return Err(Error::Reconstruction(
                        "more than one node with surplus outflow".into(),
                    ));
                }
            }
            -1 => {
                if deficit.replace(node).is_some() {
                    return Err(Error::Reconstruction(
                        "more than one node with surplus inflow".into(),
                    ));
                }
            }
            other => {
                return Err(Error::Reconstruction(format!(
                    "flow through node {} is out of balance by {other}",
                    network.node(node).id
                )));
            }
        }
    }

    match (surplus, deficit) {
        // Closed circuit: the walk returns to its start.
        (None, None) => Ok(()),
        (Some(from), Some(_)) if from == start => Ok(()),
        (Some(from), Some(_)) => Err(Error::Reconstruction(format!(
            "walk must leave from node {}, but the surplus departure sits at node {}",
            network.node(start).id,
            network.node(from).id
        ))),
        _ => Err(Error::Reconstruction(
            "unpaired in/out flow imbalance".into(),
        )),
    }
}

/// Every node with an incident traversal must be reachable from `start`
/// over the undirected view of the multigraph.
fn verify_connectivity(
    network: &StreetNetwork,
    flows: &ArcFlows,
    start: NodeIndex,
) -> Result<(), Error> {
    let mut adjacency: HashMap<NodeIndex, Vec<NodeIndex>> = HashMap::new();
    for &((from, to), _) in flows {
        adjacency.entry(from).or_default().push(to);
        adjacency.entry(to).or_default().push(from);
    }

    let mut reached = FixedBitSet::with_capacity(network.node_count());
    reached.insert(start.index());
    let mut queue = VecDeque::from([start]);
    while let Some(node) = queue.pop_front() {
        for &next in adjacency.get(&node).into_iter().flatten() {
            if !reached.contains(next.index()) {
                reached.insert(next.index());
                queue.push_back(next);
            }
        }
    }

    for &node in adjacency.keys() {
        if !reached.contains(node.index()) {
            return Err(Error::Reconstruction(format!(
                "traversals around '{}' are unreachable from the walk's start",
                network.node(node).description
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StreetNodeId;
    use crate::model::{RawNetwork, RawNode};

    /// Nodes 1..=n, no streets; trail tests drive the multigraph directly.
    fn bare_network(n: StreetNodeId) -> StreetNetwork {
        let raw = RawNetwork {
            nodes: (1..=n)
                .map(|id| RawNode {
                    id,
                    x: id as f64,
                    y: 0.0,
                })
                .collect(),
            edges: vec![],
        };
        StreetNetwork::from_raw(&raw).unwrap()
    }

    fn idx(network: &StreetNetwork, id: StreetNodeId) -> NodeIndex {
        network.node_index(id).unwrap()
    }

    #[test]
    fn simple_path_reconstructs_in_order() {
        let network = bare_network(3);
        let (a, b, c) = (idx(&network, 1), idx(&network, 2), idx(&network, 3));
        let flows: ArcFlows = vec![((a, b), 1), ((b, c), 1)];

        let trail = extract_trail(&network, &flows, a).unwrap();
        assert_eq!(trail, vec![(a, b), (b, c)]);
    }

    #[test]
    fn detour_is_spliced_deterministically() {
        let network = bare_network(3);
        let (a, b, c) = (idx(&network, 1), idx(&network, 2), idx(&network, 3));
        // Two copies leave `a`; arc order says the `b` round trip comes first.
        let flows: ArcFlows = vec![((a, b), 1), ((b, a), 1), ((a, c), 1)];

        let trail = extract_trail(&network, &flows, a).unwrap();
        assert_eq!(trail, vec![(a, b), (b, a), (a, c)]);
    }

    #[test]
    fn multiplicities_expand_into_parallel_copies() {
        let network = bare_network(2);
        let (a, b) = (idx(&network, 1), idx(&network, 2));
        let flows: ArcFlows = vec![((a, b), 2), ((b, a), 1)];

        let trail = extract_trail(&network, &flows, a).unwrap();
        assert_eq!(trail, vec![(a, b), (b, a), (a, b)]);
    }

    #[test]
    fn closed_circuit_returns_to_start() {
        let network = bare_network(3);
        let (a, b, c) = (idx(&network, 1), idx(&network, 2), idx(&network, 3));
        let flows: ArcFlows = vec![((a, b), 1), ((b, c), 1), ((c, a), 1)];

        let trail = extract_trail(&network, &flows, a).unwrap();
        assert_eq!(trail, vec![(a, b), (b, c), (c, a)]);
    }

    #[test]
    fn trail_counts_reproduce_the_solution() {
        let network = bare_network(4);
        let (a, b, c, d) = (
            idx(&network, 1),
            idx(&network, 2),
            idx(&network, 3),
            idx(&network, 4),
        );
        let flows: ArcFlows = vec![((a, b), 2), ((b, a), 1), ((b, c), 1), ((c, d), 1)];

        let trail = extract_trail(&network, &flows, a).unwrap();

        let mut counts: HashMap<Arc, u32> = HashMap::new();
        for &arc in &trail {
            *counts.entry(arc).or_default() += 1;
        }
        for &(arc, multiplicity) in &flows {
            assert_eq!(counts.remove(&arc), Some(multiplicity));
        }
        assert!(counts.is_empty());
    }

    #[test]
    fn repeated_extraction_is_identical() {
        let network = bare_network(4);
        let (a, b, c, d) = (
            idx(&network, 1),
            idx(&network, 2),
            idx(&network, 3),
            idx(&network, 4),
        );
        let flows: ArcFlows = vec![
            ((a, b), 1),
            ((b, c), 1),
            ((c, a), 1),
            ((a, d), 1),
            ((d, a), 1),
        ];

        let first = extract_trail(&network, &flows, a).unwrap();
        let second = extract_trail(&network, &flows, a).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unbalanced_flow_is_a_reconstruction_error() {
        let network = bare_network(2);
        let (a, b) = (idx(&network, 1), idx(&network, 2));
        let flows: ArcFlows = vec![((a, b), 2)];

        assert!(matches!(
            extract_trail(&network, &flows, a),
            Err(Error::Reconstruction(_))
        ));
    }

    #[test]
    fn surplus_away_from_start_is_a_reconstruction_error() {
        let network = bare_network(2);
        let (a, b) = (idx(&network, 1), idx(&network, 2));
        let flows: ArcFlows = vec![((a, b), 1)];

        assert!(matches!(
            extract_trail(&network, &flows, b),
            Err(Error::Reconstruction(_))
        ));
    }

    #[test]
    fn disconnected_support_is_a_reconstruction_error() {
        let network = bare_network(4);
        let (a, b, c, d) = (
            idx(&network, 1),
            idx(&network, 2),
            idx(&network, 3),
            idx(&network, 4),
        );
        // Balanced circuit over {c, d}, start far away with its own arc.
        let flows: ArcFlows = vec![((a, b), 1), ((c, d), 1), ((d, c), 1)];

        assert!(matches!(
            extract_trail(&network, &flows, a),
            Err(Error::Reconstruction(_))
        ));
    }

    #[test]
    fn empty_solution_is_rejected() {
        let network = bare_network(2);
        let a = idx(&network, 1);
        assert!(matches!(
            extract_trail(&network, &vec![], a),
            Err(Error::Reconstruction(_))
        ));
    }
}
