//! The virtual connection resource item.

use chrono::{DateTime, Utc};

use crate::error::ApiError;
use crate::models::connection::ConnectionItem;
use crate::models::data_quality_warning::DataQualityWarningItem;
use crate::models::deferred::{Deferred, FetchFn};
use crate::xml::{collect_elements, parse_server_boolean, parse_server_datetime, AttributeMap};

/// One virtual connection on the server.
///
/// Items come from two places: callers construct them with only a name (for
/// content that has not yet been matched to a server entity), or the SDK
/// reconstructs them by parsing a list response, in which case every
/// server-assigned field is filled in.
///
/// The `connections` and `data_quality_warnings` sub-resources are not part
/// of the listing payload. They stay unavailable until the matching populate
/// operation on [`VirtualConnections`](crate::VirtualConnections) attaches a
/// deferred fetch; reading them before that fails with
/// [`ApiError::UnpopulatedProperty`]. Once populated, every read performs a
/// fresh fetch against the server.
///
/// # Example
///
/// ```rust
/// use chartwell_api::VirtualConnectionItem;
///
/// let item = VirtualConnectionItem::new("Sales VC");
/// assert_eq!(item.name(), Some("Sales VC"));
/// assert!(item.id().is_none());
/// assert!(item.connections().is_err()); // never populated
/// ```
#[derive(Debug, Default)]
pub struct VirtualConnectionItem {
    id: Option<String>,
    name: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    webpage_url: Option<String>,
    has_extracts: Option<bool>,
    certified: Option<bool>,
    connections: Deferred<ConnectionItem>,
    data_quality_warnings: Deferred<DataQualityWarningItem>,
}

impl VirtualConnectionItem {
    /// Creates an item with only a name; every server-assigned field is
    /// absent until the item is retrieved from the server.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// The server-assigned identifier. Absent for caller-constructed items.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Renames the item.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// When the item was created on the server.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// When the item was last modified on the server.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// The item's page in the server's web UI.
    #[must_use]
    pub fn webpage_url(&self) -> Option<&str> {
        self.webpage_url.as_deref()
    }

    /// Whether the virtual connection has extracts.
    #[must_use]
    pub const fn has_extracts(&self) -> Option<bool> {
        self.has_extracts
    }

    /// Whether the virtual connection is certified.
    #[must_use]
    pub const fn certified(&self) -> Option<bool> {
        self.certified
    }

    /// Sets the certified flag.
    ///
    /// The flag must be a genuine boolean: passing `None` fails with
    /// [`ApiError::InvalidBooleanValue`] rather than clearing the field.
    pub fn set_certified(&mut self, value: Option<bool>) -> Result<(), ApiError> {
        match value {
            Some(certified) => {
                self.certified = Some(certified);
                Ok(())
            }
            None => Err(ApiError::InvalidBooleanValue { field: "certified" }),
        }
    }

    /// The item's connections, fetched from the server.
    ///
    /// Fails with [`ApiError::UnpopulatedProperty`] until
    /// [`VirtualConnections::populate_connections`](crate::VirtualConnections::populate_connections)
    /// has been called on this item. Each successful read performs a fresh
    /// fetch; results are not cached.
    pub fn connections(&self) -> Result<Vec<ConnectionItem>, ApiError> {
        self.connections.resolve("connections")
    }

    /// The item's data-quality warnings, fetched from the server.
    ///
    /// Fails with [`ApiError::UnpopulatedProperty`] until
    /// [`VirtualConnections::populate_dqw`](crate::VirtualConnections::populate_dqw)
    /// has been called on this item.
    pub fn data_quality_warnings(&self) -> Result<Vec<DataQualityWarningItem>, ApiError> {
        self.data_quality_warnings.resolve("data quality warnings")
    }

    pub(crate) fn set_connections(&mut self, fetch: FetchFn<ConnectionItem>) {
        self.connections.set(fetch);
    }

    pub(crate) fn set_data_quality_warnings(&mut self, fetch: FetchFn<DataQualityWarningItem>) {
        self.data_quality_warnings.set(fetch);
    }

    /// Parses every `virtualConnection` element out of a response document.
    ///
    /// Zero matching elements yields an empty vec, not an error.
    pub fn from_response(resp: &[u8], namespace: &str) -> Result<Vec<Self>, ApiError> {
        collect_elements(resp, namespace, "virtualConnection")?
            .iter()
            .map(Self::from_element)
            .collect()
    }

    fn from_element(attributes: &AttributeMap) -> Result<Self, ApiError> {
        Ok(Self {
            id: attributes.get("id").cloned(),
            name: attributes.get("name").cloned(),
            created_at: parse_server_datetime(attributes.get("createdAt").map(String::as_str))?,
            updated_at: parse_server_datetime(attributes.get("updatedAt").map(String::as_str))?,
            webpage_url: attributes.get("webpageUrl").cloned(),
            has_extracts: Some(parse_server_boolean(
                attributes.get("hasExtracts").map(String::as_str),
            )),
            certified: Some(parse_server_boolean(
                attributes.get("isCertified").map(String::as_str),
            )),
            connections: Deferred::Unresolved,
            data_quality_warnings: Deferred::Unresolved,
        })
    }
}

// Deferred fetches are Send + Sync, so items can be moved across threads.
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<VirtualConnectionItem>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::format_server_datetime;

    const NS: &str = "http://chartwell.dev/api";

    fn list_xml() -> String {
        format!(
            r#"<apiResponse xmlns="{NS}">
                 <pagination pageNumber="1" pageSize="100" totalAvailable="2"/>
                 <virtualConnections>
                   <virtualConnection id="e76a1461-3b1d-4588-bf1b-17551a879ad9"
                                      name="SampleVC"
                                      createdAt="2016-08-11T21:22:40Z"
                                      updatedAt="2016-08-11T21:34:17Z"
                                      webpageUrl="https://web.com"
                                      hasExtracts="true" isCertified="true"/>
                   <virtualConnection id="9dbd2263-16b5-46e1-9c43-a76bb8ab65fb"
                                      name="Sample virtualconnection"
                                      createdAt="2016-08-04T21:31:55Z"
                                      updatedAt="2016-08-04T21:31:55Z"
                                      webpageUrl="https://page.com"
                                      hasExtracts="true" isCertified="false"/>
                 </virtualConnections>
               </apiResponse>"#
        )
    }

    #[test]
    fn test_caller_constructed_item_has_only_a_name() {
        let item = VirtualConnectionItem::new("test");
        assert_eq!(item.name(), Some("test"));
        assert!(item.id().is_none());
        assert!(item.created_at().is_none());
        assert!(item.updated_at().is_none());
        assert!(item.webpage_url().is_none());
        assert!(item.has_extracts().is_none());
        assert!(item.certified().is_none());
    }

    #[test]
    fn test_unpopulated_accessors_always_fail() {
        let item = VirtualConnectionItem::new("test");
        assert!(matches!(
            item.connections(),
            Err(ApiError::UnpopulatedProperty {
                property: "connections"
            })
        ));
        assert!(matches!(
            item.data_quality_warnings(),
            Err(ApiError::UnpopulatedProperty { .. })
        ));
    }

    #[test]
    fn test_parses_list_response() {
        let items = VirtualConnectionItem::from_response(list_xml().as_bytes(), NS).unwrap();
        assert_eq!(items.len(), 2);

        let first = &items[0];
        assert_eq!(first.id(), Some("e76a1461-3b1d-4588-bf1b-17551a879ad9"));
        assert_eq!(first.name(), Some("SampleVC"));
        assert_eq!(
            format_server_datetime(first.created_at().unwrap()),
            "2016-08-11T21:22:40Z"
        );
        assert_eq!(
            format_server_datetime(first.updated_at().unwrap()),
            "2016-08-11T21:34:17Z"
        );
        assert_eq!(first.webpage_url(), Some("https://web.com"));
        assert_eq!(first.has_extracts(), Some(true));
        assert_eq!(first.certified(), Some(true));

        let second = &items[1];
        assert_eq!(second.id(), Some("9dbd2263-16b5-46e1-9c43-a76bb8ab65fb"));
        assert_eq!(second.name(), Some("Sample virtualconnection"));
        assert_eq!(second.certified(), Some(false));
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let xml = list_xml();
        let first = VirtualConnectionItem::from_response(xml.as_bytes(), NS).unwrap();
        let second = VirtualConnectionItem::from_response(xml.as_bytes(), NS).unwrap();
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.id(), b.id());
            assert_eq!(a.name(), b.name());
            assert_eq!(a.created_at(), b.created_at());
            assert_eq!(a.updated_at(), b.updated_at());
            assert_eq!(a.webpage_url(), b.webpage_url());
            assert_eq!(a.has_extracts(), b.has_extracts());
            assert_eq!(a.certified(), b.certified());
        }
    }

    #[test]
    fn test_boolean_attributes_follow_the_true_literal_rule() {
        let xml = format!(
            r#"<apiResponse xmlns="{NS}">
                 <virtualConnections>
                   <virtualConnection id="a" hasExtracts="TRUE" isCertified="True"/>
                   <virtualConnection id="b" hasExtracts="yes" isCertified="1"/>
                   <virtualConnection id="c"/>
                 </virtualConnections>
               </apiResponse>"#
        );
        let items = VirtualConnectionItem::from_response(xml.as_bytes(), NS).unwrap();
        assert_eq!(items[0].has_extracts(), Some(true));
        assert_eq!(items[0].certified(), Some(true));
        assert_eq!(items[1].has_extracts(), Some(false));
        assert_eq!(items[1].certified(), Some(false));
        assert_eq!(items[2].has_extracts(), Some(false));
        assert_eq!(items[2].certified(), Some(false));
    }

    #[test]
    fn test_missing_timestamp_parses_as_none() {
        let xml = format!(
            r#"<apiResponse xmlns="{NS}">
                 <virtualConnection id="a" name="no timestamps"/>
               </apiResponse>"#
        );
        let items = VirtualConnectionItem::from_response(xml.as_bytes(), NS).unwrap();
        assert!(items[0].created_at().is_none());
        assert!(items[0].updated_at().is_none());
    }

    #[test]
    fn test_malformed_timestamp_is_an_error() {
        let xml = format!(
            r#"<apiResponse xmlns="{NS}">
                 <virtualConnection id="a" createdAt="not-a-date"/>
               </apiResponse>"#
        );
        assert!(VirtualConnectionItem::from_response(xml.as_bytes(), NS).is_err());
    }

    #[test]
    fn test_set_certified_rejects_null() {
        let mut item = VirtualConnectionItem::new("test");
        assert!(matches!(
            item.set_certified(None),
            Err(ApiError::InvalidBooleanValue { field: "certified" })
        ));
        assert!(item.certified().is_none());

        item.set_certified(Some(true)).unwrap();
        assert_eq!(item.certified(), Some(true));
        item.set_certified(Some(false)).unwrap();
        assert_eq!(item.certified(), Some(false));
    }

    #[test]
    fn test_set_name() {
        let mut item = VirtualConnectionItem::new("before");
        item.set_name("after");
        assert_eq!(item.name(), Some("after"));
    }
}
