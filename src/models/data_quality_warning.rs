//! Data-quality warning records attached to server content.

use chrono::{DateTime, Utc};

use crate::error::ApiError;
use crate::xml::{collect_elements, parse_server_boolean, parse_server_datetime, AttributeMap};

/// A data-quality warning attached to a piece of content (here, a virtual
/// connection).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataQualityWarningItem {
    id: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    /// The warning category (e.g. `WARNING`, `DEPRECATED`, `STALE`).
    pub warning_type: Option<String>,
    /// Free-form text shown to users of the content.
    pub message: Option<String>,
    /// Whether the warning is currently shown.
    pub active: bool,
    /// Whether the warning is rendered with high-visibility styling.
    pub severe: bool,
}

impl DataQualityWarningItem {
    /// Creates a warning to be added to a piece of content. New warnings
    /// start active and not severe.
    pub fn new(warning_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            warning_type: Some(warning_type.into()),
            message: Some(message.into()),
            active: true,
            ..Self::default()
        }
    }

    /// The server-assigned warning identifier.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// When the warning was created on the server.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// When the warning was last modified on the server.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Parses every `dataQualityWarning` element out of a response document.
    pub fn from_response(resp: &[u8], namespace: &str) -> Result<Vec<Self>, ApiError> {
        collect_elements(resp, namespace, "dataQualityWarning")?
            .iter()
            .map(Self::from_element)
            .collect()
    }

    fn from_element(attributes: &AttributeMap) -> Result<Self, ApiError> {
        Ok(Self {
            id: attributes.get("id").cloned(),
            warning_type: attributes.get("type").cloned(),
            message: attributes.get("message").cloned(),
            active: parse_server_boolean(attributes.get("isActive").map(String::as_str)),
            severe: parse_server_boolean(attributes.get("isSevere").map(String::as_str)),
            created_at: parse_server_datetime(attributes.get("createdAt").map(String::as_str))?,
            updated_at: parse_server_datetime(attributes.get("updatedAt").map(String::as_str))?,
        })
    }
}
