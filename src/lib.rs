//! # Chartwell API Rust SDK
//!
//! A Rust SDK for the Chartwell Server REST API: a typed, synchronous client
//! for the server's resource-oriented XML wire format.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Typed resource items parsed from XML responses ([`VirtualConnectionItem`],
//!   [`ConnectionItem`], [`DataQualityWarningItem`], [`PaginationItem`])
//! - Lazily populated sub-resources: connections and data-quality warnings
//!   are fetched on demand, never as part of the listing payload
//! - Versioned endpoints that gate every call on the session's negotiated
//!   API version before touching the network ([`VirtualConnections`])
//! - An explicit session context ([`Session`]) instead of global state
//! - A blocking HTTP transport ([`HttpTransport`]) behind the [`Transport`]
//!   trait, so tests can substitute an in-memory implementation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use chartwell_api::{ApiVersion, HttpTransport, Session, VirtualConnections};
//!
//! // Sessions are explicit; sign in and attach the token.
//! let session = Arc::new(
//!     Session::new("https://server.example.com", "site-id", ApiVersion::new(3, 18))
//!         .with_auth_token("auth-token"),
//! );
//! let transport = Arc::new(HttpTransport::new(Arc::clone(&session))?);
//! let endpoint = VirtualConnections::new(session, transport);
//!
//! // List the site's virtual connections.
//! let (items, pagination) = endpoint.list(None)?;
//! println!("{} virtual connections", pagination.total_available());
//!
//! // Sub-resources are populated explicitly, then fetched on first read.
//! let mut item = items.into_iter().next().unwrap();
//! endpoint.populate_connections(&mut item)?;
//! for connection in item.connections()? {
//!     println!("{:?}", connection.server_address);
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: the session context is passed explicitly
//! - **Synchronous, blocking I/O**: every call completes or fails before it
//!   returns; retries and timeouts belong to layers above and below this one
//! - **Populate-on-demand**: expensive sub-resources are absent until asked
//!   for, and reading them before populating is a typed error, not a `None`
//! - **Explicit parsing rules**: the wire format's boolean and timestamp
//!   conventions are named functions, not hidden coercions

pub mod endpoints;
pub mod error;
pub mod models;
pub mod session;
pub mod transport;
pub mod version;
pub mod xml;

mod requests;

// Re-export public types at crate root for convenience
pub use endpoints::VirtualConnections;
pub use error::ApiError;
pub use models::{
    ConnectionItem, DataQualityWarningItem, Deferred, FetchFn, PaginationItem,
    VirtualConnectionItem,
};
pub use session::{Session, DEFAULT_NAMESPACE};
pub use transport::{HttpTransport, RequestOptions, Transport, AUTH_TOKEN_HEADER, SDK_VERSION};
pub use version::ApiVersion;
