//! Shared sub-endpoint for data-quality warning management.
//!
//! Warnings live under their own URL tree, keyed by the owning resource's
//! type segment; resource endpoints delegate their warning operations here.

use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{DataQualityWarningItem, VirtualConnectionItem};
use crate::requests;
use crate::session::Session;
use crate::transport::Transport;

pub(crate) struct DataQualityWarningEndpoint {
    session: Arc<Session>,
    transport: Arc<dyn Transport>,
    resource_type: &'static str,
}

impl DataQualityWarningEndpoint {
    pub(crate) fn new(
        session: Arc<Session>,
        transport: Arc<dyn Transport>,
        resource_type: &'static str,
    ) -> Self {
        Self {
            session,
            transport,
            resource_type,
        }
    }

    fn base_url(&self) -> String {
        format!(
            "{}/sites/{}/dataQualityWarnings/{}",
            self.session.base_url(),
            self.session.site_id(),
            self.resource_type
        )
    }

    fn item_url(&self, item: &VirtualConnectionItem) -> Result<String, ApiError> {
        let id = item
            .id()
            .ok_or(ApiError::MissingRequiredField { field: "id" })?;
        Ok(format!("{}/{}", self.base_url(), id))
    }

    /// Attaches a deferred warning fetch to the item. No network call is made
    /// until the item's accessor is first read.
    pub(crate) fn populate(&self, item: &mut VirtualConnectionItem) -> Result<(), ApiError> {
        let url = self.item_url(item)?;
        let transport = Arc::clone(&self.transport);
        let namespace = self.session.namespace().to_string();

        item.set_data_quality_warnings(Box::new(move || {
            let bytes = transport.get(&url, None)?;
            DataQualityWarningItem::from_response(&bytes, &namespace)
        }));
        tracing::info!(
            resource_type = self.resource_type,
            id = item.id(),
            "populated data quality warnings"
        );
        Ok(())
    }

    pub(crate) fn add(
        &self,
        item: &VirtualConnectionItem,
        warning: &DataQualityWarningItem,
    ) -> Result<Vec<DataQualityWarningItem>, ApiError> {
        let url = self.item_url(item)?;
        let body = requests::data_quality_warning_body(warning)?;
        let bytes = self.transport.post(&url, &body)?;
        tracing::info!(
            resource_type = self.resource_type,
            id = item.id(),
            "added data quality warning"
        );
        DataQualityWarningItem::from_response(&bytes, self.session.namespace())
    }

    pub(crate) fn update(
        &self,
        item: &VirtualConnectionItem,
        warning: &DataQualityWarningItem,
    ) -> Result<Vec<DataQualityWarningItem>, ApiError> {
        let url = self.item_url(item)?;
        let body = requests::data_quality_warning_body(warning)?;
        let bytes = self.transport.put(&url, &body)?;
        tracing::info!(
            resource_type = self.resource_type,
            id = item.id(),
            "updated data quality warning"
        );
        DataQualityWarningItem::from_response(&bytes, self.session.namespace())
    }

    /// Removes every warning from the item.
    pub(crate) fn clear(&self, item: &VirtualConnectionItem) -> Result<(), ApiError> {
        let url = self.item_url(item)?;
        self.transport.delete(&url)?;
        tracing::info!(
            resource_type = self.resource_type,
            id = item.id(),
            "cleared data quality warnings"
        );
        Ok(())
    }
}
