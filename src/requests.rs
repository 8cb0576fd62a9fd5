//! XML request-body builders.
//!
//! Mirrors the shape the server expects: an `apiRequest` root carrying one
//! element whose attributes are the fields being written. Only mutable
//! fields are serialized; server-assigned fields never appear in a body.

use serde::Serialize;

use crate::error::ApiError;
use crate::models::{ConnectionItem, DataQualityWarningItem};
use crate::session::DEFAULT_NAMESPACE;

#[derive(Serialize)]
#[serde(rename = "apiRequest")]
struct ConnectionUpdateRequest<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    connection: ConnectionUpdate<'a>,
}

#[derive(Serialize)]
struct ConnectionUpdate<'a> {
    #[serde(rename = "@serverAddress", skip_serializing_if = "Option::is_none")]
    server_address: Option<&'a str>,
    #[serde(rename = "@serverPort", skip_serializing_if = "Option::is_none")]
    server_port: Option<&'a str>,
    #[serde(rename = "@userName", skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
}

/// Builds the body for a connection update. `connection_type` is immutable
/// and deliberately absent.
pub(crate) fn connection_update_body(connection: &ConnectionItem) -> Result<String, ApiError> {
    let request = ConnectionUpdateRequest {
        xmlns: DEFAULT_NAMESPACE,
        connection: ConnectionUpdate {
            server_address: connection.server_address.as_deref(),
            server_port: connection.server_port.as_deref(),
            username: connection.username.as_deref(),
        },
    };
    Ok(quick_xml::se::to_string(&request)?)
}

#[derive(Serialize)]
#[serde(rename = "apiRequest")]
struct DataQualityWarningRequest<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "dataQualityWarning")]
    warning: DataQualityWarning<'a>,
}

#[derive(Serialize)]
struct DataQualityWarning<'a> {
    #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
    warning_type: Option<&'a str>,
    #[serde(rename = "@message", skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(rename = "@isActive")]
    is_active: bool,
    #[serde(rename = "@isSevere")]
    is_severe: bool,
}

/// Builds the body for adding or updating a data-quality warning.
pub(crate) fn data_quality_warning_body(
    warning: &DataQualityWarningItem,
) -> Result<String, ApiError> {
    let request = DataQualityWarningRequest {
        xmlns: DEFAULT_NAMESPACE,
        warning: DataQualityWarning {
            warning_type: warning.warning_type.as_deref(),
            message: warning.message.as_deref(),
            is_active: warning.active,
            is_severe: warning.severe,
        },
    };
    Ok(quick_xml::se::to_string(&request)?)
}
