//! Pagination metadata parsed from list responses.

use crate::error::ApiError;
use crate::xml::{collect_elements, AttributeMap};

/// The pagination envelope a list response carries alongside its items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaginationItem {
    page_number: u32,
    page_size: u32,
    total_available: u32,
}

impl PaginationItem {
    /// The page this response covers, starting at 1.
    #[must_use]
    pub const fn page_number(self) -> u32 {
        self.page_number
    }

    /// The requested page size.
    #[must_use]
    pub const fn page_size(self) -> u32 {
        self.page_size
    }

    /// The total number of matching items on the server.
    #[must_use]
    pub const fn total_available(self) -> u32 {
        self.total_available
    }

    /// Parses the `pagination` element out of a list response.
    ///
    /// A response without a pagination envelope yields the default
    /// (all-zero) item.
    pub fn from_response(resp: &[u8], namespace: &str) -> Result<Self, ApiError> {
        let Some(attributes) = collect_elements(resp, namespace, "pagination")?
            .into_iter()
            .next()
        else {
            return Ok(Self::default());
        };

        Ok(Self {
            page_number: parse_count(&attributes, "pageNumber")?,
            page_size: parse_count(&attributes, "pageSize")?,
            total_available: parse_count(&attributes, "totalAvailable")?,
        })
    }
}

fn parse_count(attributes: &AttributeMap, key: &str) -> Result<u32, ApiError> {
    attributes.get(key).map_or(Ok(0), |raw| {
        raw.parse().map_err(|_| ApiError::MalformedResponse {
            reason: format!("pagination attribute '{key}' is not a number: '{raw}'"),
        })
    })
}
