use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::route::{DEFAULT_SOLVER_TIME_LIMIT_SECS, RouteParams};
use crate::{Error, StreetNodeId};

/// Run configuration, read from a JSON file.
///
/// Value validation (positive fuel parameters, endpoints present in the
/// network) happens at the start of the pipeline, not here; this type
/// only carries what the file says.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfig {
    /// Path to the raw network JSON file
    pub network: PathBuf,
    pub start_node: StreetNodeId,
    pub end_node: StreetNodeId,
    pub fuel_price_per_liter: f64,
    pub km_per_liter: f64,
    #[serde(default = "default_time_limit")]
    pub solver_time_limit_secs: u32,
}

fn default_time_limit() -> u32 {
    DEFAULT_SOLVER_TIME_LIMIT_SECS
}

impl RouteConfig {
    /// # Errors
    ///
    /// Fails when the file cannot be read or does not hold valid JSON for
    /// this shape.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let file = File::open(path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to open config '{}': {}", path.display(), e),
            )
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// The routing parameters carried by this configuration.
    pub fn params(&self) -> RouteParams {
        RouteParams {
            start_node: self.start_node,
            end_node: self.end_node,
            fuel_price_per_liter: self.fuel_price_per_liter,
            km_per_liter: self.km_per_liter,
            solver_time_limit_secs: self.solver_time_limit_secs,
        }
    }
}
