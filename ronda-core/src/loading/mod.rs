//! Run configuration and network-file loading.

mod config;
mod network_file;

pub use config::RouteConfig;
pub use network_file::read_network;
