//! Chartwell API version definitions.
//!
//! This module provides the [`ApiVersion`] type for the server's
//! `major.minor` REST API versioning scheme. Versions order numerically, so
//! `3.5` sorts before `3.18`.
//!
//! Every network-performing operation in the SDK declares a minimum API
//! version. The session compares its negotiated version against that minimum
//! before any request is sent; see
//! [`Session::ensure_version_at_least`](crate::Session::ensure_version_at_least).
//!
//! # Example
//!
//! ```rust
//! use chartwell_api::ApiVersion;
//!
//! let version: ApiVersion = "3.18".parse().unwrap();
//! assert_eq!(version, ApiVersion::new(3, 18));
//! assert!(ApiVersion::new(3, 5) < version);
//! assert_eq!(version.to_string(), "3.18");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// A `major.minor` REST API version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiVersion {
    major: u16,
    minor: u16,
}

impl ApiVersion {
    /// Creates a version from its major and minor components.
    #[must_use]
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    /// Returns the major component.
    #[must_use]
    pub const fn major(self) -> u16 {
        self.major
    }

    /// Returns the minor component.
    #[must_use]
    pub const fn minor(self) -> u16 {
        self.minor
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for ApiVersion {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ApiError::InvalidVersion {
            value: s.to_string(),
        };

        let (major, minor) = s.trim().split_once('.').ok_or_else(invalid)?;
        let major = major.parse().map_err(|_| invalid())?;
        let minor = minor.parse().map_err(|_| invalid())?;
        Ok(Self::new(major, minor))
    }
}

impl TryFrom<String> for ApiVersion {
    type Error = ApiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ApiVersion> for String {
    fn from(version: ApiVersion) -> Self {
        version.to_string()
    }
}
