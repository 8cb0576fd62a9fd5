//! Error types for the Chartwell API SDK.
//!
//! All fallible operations in the SDK return [`ApiError`]. The variants
//! separate caller mistakes (reading an unpopulated property, operating on an
//! item that was never retrieved from the server) from session-state problems
//! (not signed in, version too old) and from transport or parse failures.
//!
//! # Example
//!
//! ```rust
//! use chartwell_api::{ApiError, VirtualConnectionItem};
//!
//! let item = VirtualConnectionItem::new("demo");
//! let result = item.connections();
//! assert!(matches!(result, Err(ApiError::UnpopulatedProperty { .. })));
//! ```

use thiserror::Error;

use crate::version::ApiVersion;

/// Errors that can occur when talking to a Chartwell server.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A lazy sub-resource accessor was read before the matching populate
    /// call. This is always a programming error on the caller's part.
    #[error("item must be populated with {property} first")]
    UnpopulatedProperty {
        /// The accessor that was read (e.g., "connections").
        property: &'static str,
    },

    /// An operation required a server-assigned field that the item does not
    /// have. The item must be retrieved from the server first.
    #[error("item is missing required field '{field}'; it must be retrieved from the server first")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A boolean-valued field was set to null.
    #[error("'{field}' must be a non-null boolean")]
    InvalidBooleanValue {
        /// The field that was being set.
        field: &'static str,
    },

    /// The session's negotiated API version is below the operation's minimum.
    /// Raised before any network call is made.
    #[error("this operation requires API version {required} or later; the session negotiated {actual}")]
    VersionMismatch {
        /// The minimum version the operation requires.
        required: ApiVersion,
        /// The version the session negotiated.
        actual: ApiVersion,
    },

    /// No authenticated session is active. Raised before any network call.
    #[error("not signed in. Sign in to the server before making API calls.")]
    NotSignedIn,

    /// An API version string could not be parsed.
    #[error("invalid API version '{value}'. Expected format: 'major.minor' (e.g., '3.18').")]
    InvalidVersion {
        /// The version string that was provided.
        value: String,
    },

    /// The server returned a non-2xx status. Surfaced unchanged; the SDK does
    /// not retry.
    #[error("server returned {code}: {body}")]
    Server {
        /// The HTTP status code.
        code: u16,
        /// The raw response body.
        body: String,
    },

    /// A network-level failure from the HTTP client.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not well-formed XML.
    #[error("malformed XML in response: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An XML attribute in the response could not be read.
    #[error("malformed XML attribute in response: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    /// A request body could not be serialized to XML.
    #[error("failed to serialize request body: {0}")]
    XmlSerialize(#[from] quick_xml::DeError),

    /// A timestamp attribute in the response could not be parsed.
    #[error("invalid timestamp in response: {0}")]
    Timestamp(#[from] chrono::ParseError),

    /// The response was well-formed XML but did not have the expected shape.
    #[error("malformed response: {reason}")]
    MalformedResponse {
        /// What was wrong with the response.
        reason: String,
    },

    /// A connection update response did not include the updated connection.
    #[error("server response did not contain connection {id}")]
    ConnectionNotFound {
        /// The connection id that was expected in the response.
        id: String,
    },
}
