//! The connection sub-resource of a virtual connection.

use crate::error::ApiError;
use crate::xml::{collect_elements, parse_server_boolean, AttributeMap};

/// One underlying database connection of a virtual connection.
///
/// `id` and `connection_type` are server-assigned and immutable. The
/// remaining fields may be changed by the caller and sent back with
/// [`VirtualConnections::update_connection`](crate::VirtualConnections::update_connection).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectionItem {
    id: Option<String>,
    connection_type: Option<String>,
    query_tagging: Option<bool>,
    /// The database host the connection points at.
    pub server_address: Option<String>,
    /// The database port, as the server reports it (a string on the wire).
    pub server_port: Option<String>,
    /// The database account the connection signs in with.
    pub username: Option<String>,
}

impl ConnectionItem {
    /// The server-assigned connection identifier.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The connection's driver type (e.g. `sqlserver`, `snowflake`).
    /// Immutable; never sent in update requests.
    #[must_use]
    pub fn connection_type(&self) -> Option<&str> {
        self.connection_type.as_deref()
    }

    /// Whether query tagging is enabled for this connection.
    #[must_use]
    pub const fn query_tagging(&self) -> Option<bool> {
        self.query_tagging
    }

    /// Parses every `connection` element out of a response document.
    pub fn from_response(resp: &[u8], namespace: &str) -> Result<Vec<Self>, ApiError> {
        Ok(collect_elements(resp, namespace, "connection")?
            .iter()
            .map(Self::from_element)
            .collect())
    }

    fn from_element(attributes: &AttributeMap) -> Self {
        Self {
            id: attributes.get("id").cloned(),
            connection_type: attributes.get("type").cloned(),
            query_tagging: attributes
                .get("queryTagging")
                .map(|raw| parse_server_boolean(Some(raw))),
            server_address: attributes.get("serverAddress").cloned(),
            server_port: attributes.get("serverPort").cloned(),
            username: attributes.get("userName").cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "http://chartwell.dev/api";

    fn connections_xml() -> String {
        format!(
            r#"<apiResponse xmlns="{NS}">
                 <connections>
                   <connection id="be786ae0-d2bf-4a4b-9b34-e2de8d2d4488" type="sqlserver"
                               serverAddress="forty-two.net" serverPort="1433"
                               userName="duo" queryTagging="true"/>
                   <connection id="970e24bc-e200-4841-a3e9-66e7d122d77e" type="snowflake"
                               serverAddress="database.com" serverPort="443"
                               userName="heero"/>
                 </connections>
               </apiResponse>"#
        )
    }

    #[test]
    fn test_parses_connection_collection() {
        let connections = ConnectionItem::from_response(connections_xml().as_bytes(), NS).unwrap();
        assert_eq!(connections.len(), 2);

        let first = &connections[0];
        assert_eq!(first.id(), Some("be786ae0-d2bf-4a4b-9b34-e2de8d2d4488"));
        assert_eq!(first.connection_type(), Some("sqlserver"));
        assert_eq!(first.server_address.as_deref(), Some("forty-two.net"));
        assert_eq!(first.server_port.as_deref(), Some("1433"));
        assert_eq!(first.username.as_deref(), Some("duo"));
        assert_eq!(first.query_tagging(), Some(true));

        let second = &connections[1];
        assert_eq!(second.id(), Some("970e24bc-e200-4841-a3e9-66e7d122d77e"));
        assert_eq!(second.connection_type(), Some("snowflake"));
        assert_eq!(second.query_tagging(), None);
    }

    #[test]
    fn test_no_matching_elements_is_empty_vec() {
        let xml = format!(r#"<apiResponse xmlns="{NS}"/>"#);
        let connections = ConnectionItem::from_response(xml.as_bytes(), NS).unwrap();
        assert!(connections.is_empty());
    }

    #[test]
    fn test_mutable_fields_can_be_changed() {
        let mut connection = ConnectionItem::from_response(connections_xml().as_bytes(), NS)
            .unwrap()
            .remove(0);
        connection.server_address = Some("bar".to_string());
        connection.server_port = Some("9876".to_string());
        connection.username = Some("foo".to_string());

        // Server-assigned fields are untouched.
        assert_eq!(connection.id(), Some("be786ae0-d2bf-4a4b-9b34-e2de8d2d4488"));
        assert_eq!(connection.connection_type(), Some("sqlserver"));
    }
}
