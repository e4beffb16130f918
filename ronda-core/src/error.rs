use thiserror::Error;

use crate::StreetNodeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Node {0} is not part of the street network")]
    UnknownNode(StreetNodeId),
    #[error("Route reconstruction failed: {0}")]
    Reconstruction(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
