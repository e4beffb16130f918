use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hashbrown::HashSet;
use log::info;

use crate::Error;
use crate::model::RawNetwork;

/// Reads the raw street graph from its JSON file.
///
/// # Errors
///
/// IO and JSON failures, edges referencing undeclared nodes, and
/// non-positive street lengths.
pub fn read_network(path: &Path) -> Result<RawNetwork, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("failed to open network '{}': {}", path.display(), e),
        )
    })?;
    let raw: RawNetwork = serde_json::from_reader(BufReader::new(file))?;
    validate(&raw)?;
    info!(
        "loaded raw network: {} nodes, {} edges",
        raw.nodes.len(),
        raw.edges.len()
    );
    Ok(raw)
}

fn validate(raw: &RawNetwork) -> Result<(), Error> {
    let ids: HashSet<_> = raw.nodes.iter().map(|node| node.id).collect();
    for edge in &raw.edges {
        for id in [edge.from, edge.to] {
            if !ids.contains(&id) {
                return Err(Error::InvalidData(format!(
                    "edge {} -> {} references undeclared node {id}",
                    edge.from, edge.to
                )));
            }
        }
        if !(edge.length > 0.0) {
            return Err(Error::InvalidData(format!(
                "edge {} -> {} has non-positive length {}",
                edge.from, edge.to, edge.length
            )));
        }
    }
    Ok(())
}
