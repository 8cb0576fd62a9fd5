//! Endpoint components, one per resource type.

mod data_quality_warnings;
mod virtual_connections;

pub use virtual_connections::VirtualConnections;
