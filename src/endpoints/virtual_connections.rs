//! The virtual connections endpoint.

use std::sync::Arc;

use crate::endpoints::data_quality_warnings::DataQualityWarningEndpoint;
use crate::error::ApiError;
use crate::models::{ConnectionItem, DataQualityWarningItem, PaginationItem, VirtualConnectionItem};
use crate::requests;
use crate::session::Session;
use crate::transport::{RequestOptions, Transport};
use crate::version::ApiVersion;

/// Listing and connection management require server API 3.18.
const MIN_API_VERSION: ApiVersion = ApiVersion::new(3, 18);

/// Data-quality warnings shipped earlier, in 3.5.
const MIN_DQW_API_VERSION: ApiVersion = ApiVersion::new(3, 5);

/// Issues versioned requests for the virtual connections resource and
/// translates responses into [`VirtualConnectionItem`]s.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use chartwell_api::{ApiVersion, HttpTransport, Session, VirtualConnections};
///
/// let session = Arc::new(
///     Session::new("https://server.example.com", "site-id", ApiVersion::new(3, 18))
///         .with_auth_token("auth-token"),
/// );
/// let transport = Arc::new(HttpTransport::new(Arc::clone(&session))?);
/// let endpoint = VirtualConnections::new(session, transport);
///
/// let (items, pagination) = endpoint.list(None)?;
/// println!("{} of {} virtual connections", items.len(), pagination.total_available());
///
/// let mut item = items.into_iter().next().unwrap();
/// endpoint.populate_connections(&mut item)?;
/// for connection in item.connections()? {
///     println!("{:?} -> {:?}", connection.id(), connection.server_address);
/// }
/// ```
pub struct VirtualConnections {
    session: Arc<Session>,
    transport: Arc<dyn Transport>,
    data_quality_warnings: DataQualityWarningEndpoint,
}

impl VirtualConnections {
    /// Creates the endpoint for the given session and transport.
    #[must_use]
    pub fn new(session: Arc<Session>, transport: Arc<dyn Transport>) -> Self {
        let data_quality_warnings = DataQualityWarningEndpoint::new(
            Arc::clone(&session),
            Arc::clone(&transport),
            "virtualconnection",
        );
        Self {
            session,
            transport,
            data_quality_warnings,
        }
    }

    /// The resource root, `{api}/sites/{site_id}/virtualconnections`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!(
            "{}/sites/{}/virtualconnections",
            self.session.base_url(),
            self.session.site_id()
        )
    }

    /// Lists the site's virtual connections.
    ///
    /// Items and pagination metadata are parsed from the same payload and
    /// returned together. A site with no virtual connections yields an empty
    /// vec and a pagination item with `total_available() == 0`.
    ///
    /// Requires API 3.18.
    pub fn list(
        &self,
        options: Option<&RequestOptions>,
    ) -> Result<(Vec<VirtualConnectionItem>, PaginationItem), ApiError> {
        self.session.ensure_version_at_least(MIN_API_VERSION)?;
        tracing::info!("querying all virtual connections on site");

        let bytes = self.transport.get(&self.base_url(), options)?;
        let pagination = PaginationItem::from_response(&bytes, self.session.namespace())?;
        let items = VirtualConnectionItem::from_response(&bytes, self.session.namespace())?;
        Ok((items, pagination))
    }

    /// Makes `item.connections()` available.
    ///
    /// Attaches a deferred fetch of `{base}/{id}/connections` to the item; no
    /// network call happens here. The first accessor read performs the GET,
    /// and every subsequent read re-fetches (the server-side list may have
    /// changed).
    ///
    /// Fails with [`ApiError::MissingRequiredField`] if the item has no
    /// server-assigned id — a caller-constructed item must be retrieved from
    /// the server before its sub-resources can be populated.
    ///
    /// Requires API 3.18.
    pub fn populate_connections(&self, item: &mut VirtualConnectionItem) -> Result<(), ApiError> {
        self.session.ensure_version_at_least(MIN_API_VERSION)?;
        let id = item
            .id()
            .ok_or(ApiError::MissingRequiredField { field: "id" })?
            .to_string();

        let url = format!("{}/{}/connections", self.base_url(), id);
        let transport = Arc::clone(&self.transport);
        let namespace = self.session.namespace().to_string();
        item.set_connections(Box::new(move || {
            fetch_connections(transport.as_ref(), &url, &namespace, None)
        }));

        tracing::info!(%id, "populated connections for virtual connection");
        Ok(())
    }

    /// Pushes a connection's mutated fields to the server.
    ///
    /// PUTs `{base}/{item_id}/connections/{connection_id}` with a body built
    /// from the connection's mutable fields. Returns `Ok(None)` when the
    /// server responds with no connection entries. A response with several
    /// entries is logged and resolved by matching on the connection id; a
    /// response that contains entries but not the updated connection fails
    /// with [`ApiError::ConnectionNotFound`].
    ///
    /// Requires API 3.18.
    pub fn update_connection(
        &self,
        item: &VirtualConnectionItem,
        connection: &ConnectionItem,
    ) -> Result<Option<ConnectionItem>, ApiError> {
        self.session.ensure_version_at_least(MIN_API_VERSION)?;
        let item_id = item
            .id()
            .ok_or(ApiError::MissingRequiredField { field: "id" })?;
        let connection_id = connection
            .id()
            .ok_or(ApiError::MissingRequiredField {
                field: "connection id",
            })?;

        let url = format!("{}/{}/connections/{}", self.base_url(), item_id, connection_id);
        let body = requests::connection_update_body(connection)?;
        let bytes = self.transport.put(&url, &body)?;

        let connections = ConnectionItem::from_response(&bytes, self.session.namespace())?;
        if connections.is_empty() {
            return Ok(None);
        }
        if connections.len() > 1 {
            tracing::debug!(count = connections.len(), "multiple connections returned");
        }

        let updated = connections
            .into_iter()
            .find(|candidate| candidate.id() == Some(connection_id))
            .ok_or_else(|| ApiError::ConnectionNotFound {
                id: connection_id.to_string(),
            })?;

        tracing::info!(%item_id, %connection_id, "updated virtual connection connection");
        Ok(Some(updated))
    }

    /// Makes `item.data_quality_warnings()` available. Requires API 3.5.
    pub fn populate_dqw(&self, item: &mut VirtualConnectionItem) -> Result<(), ApiError> {
        self.session.ensure_version_at_least(MIN_DQW_API_VERSION)?;
        self.data_quality_warnings.populate(item)
    }

    /// Adds a data-quality warning to the item. Requires API 3.5.
    pub fn add_dqw(
        &self,
        item: &VirtualConnectionItem,
        warning: &DataQualityWarningItem,
    ) -> Result<Vec<DataQualityWarningItem>, ApiError> {
        self.session.ensure_version_at_least(MIN_DQW_API_VERSION)?;
        self.data_quality_warnings.add(item, warning)
    }

    /// Updates the item's data-quality warning. Requires API 3.5.
    pub fn update_dqw(
        &self,
        item: &VirtualConnectionItem,
        warning: &DataQualityWarningItem,
    ) -> Result<Vec<DataQualityWarningItem>, ApiError> {
        self.session.ensure_version_at_least(MIN_DQW_API_VERSION)?;
        self.data_quality_warnings.update(item, warning)
    }

    /// Removes every data-quality warning from the item. Requires API 3.5.
    pub fn delete_dqw(&self, item: &VirtualConnectionItem) -> Result<(), ApiError> {
        self.session.ensure_version_at_least(MIN_DQW_API_VERSION)?;
        self.data_quality_warnings.clear(item)
    }
}

fn fetch_connections(
    transport: &dyn Transport,
    url: &str,
    namespace: &str,
    options: Option<&RequestOptions>,
) -> Result<Vec<ConnectionItem>, ApiError> {
    let bytes = transport.get(url, options)?;
    ConnectionItem::from_response(&bytes, namespace)
}
