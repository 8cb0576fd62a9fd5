//! Typed in-memory representations of server entities.

mod connection;
mod data_quality_warning;
mod deferred;
mod pagination;
mod virtual_connection;

pub use connection::ConnectionItem;
pub use data_quality_warning::DataQualityWarningItem;
pub use deferred::{Deferred, FetchFn};
pub use pagination::PaginationItem;
pub use virtual_connection::VirtualConnectionItem;
