//! Session context for Chartwell API calls.
//!
//! A [`Session`] carries everything the SDK needs to address a server: the
//! server URL, the site the caller is scoped to, the negotiated API version,
//! and the auth token obtained at sign-in. It is passed explicitly to
//! endpoints and the transport rather than held in global state.
//!
//! # Example
//!
//! ```rust
//! use chartwell_api::{ApiVersion, Session};
//!
//! let session = Session::new("https://server.example.com", "site-id", ApiVersion::new(3, 18))
//!     .with_auth_token("auth-token");
//!
//! assert!(session.is_signed_in());
//! assert_eq!(
//!     session.base_url(),
//!     "https://server.example.com/api/3.18"
//! );
//!
//! // Sessions can be serialized for storage.
//! let json = serde_json::to_string(&session).unwrap();
//! # let _ = json;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::version::ApiVersion;

/// The XML namespace the server uses for request and response documents.
pub const DEFAULT_NAMESPACE: &str = "http://chartwell.dev/api";

/// An authenticated (or not-yet-authenticated) connection to one site on a
/// Chartwell server.
///
/// # Thread Safety
///
/// `Session` is `Send + Sync`; endpoints share it behind an `Arc`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    server_url: String,
    site_id: String,
    version: ApiVersion,
    auth_token: Option<String>,
    namespace: String,
}

impl Session {
    /// Creates a session for the given server and site.
    ///
    /// The session starts signed out; obtain a token and attach it with
    /// [`with_auth_token`](Self::with_auth_token) or
    /// [`set_auth_token`](Self::set_auth_token) before making API calls.
    pub fn new(
        server_url: impl Into<String>,
        site_id: impl Into<String>,
        version: ApiVersion,
    ) -> Self {
        let server_url = server_url.into().trim_end_matches('/').to_string();
        Self {
            server_url,
            site_id: site_id.into(),
            version,
            auth_token: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }

    /// Attaches an auth token, consuming and returning the session.
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Replaces the auth token. `None` signs the session out.
    pub fn set_auth_token(&mut self, token: Option<String>) {
        self.auth_token = token;
    }

    /// Returns the server URL without a trailing slash.
    #[must_use]
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Returns the site identifier this session is scoped to.
    #[must_use]
    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    /// Returns the negotiated API version.
    #[must_use]
    pub const fn version(&self) -> ApiVersion {
        self.version
    }

    /// Returns the auth token, if signed in.
    #[must_use]
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Returns the XML namespace used to parse server responses.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Composes the versioned API root, e.g.
    /// `https://server.example.com/api/3.18`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}/api/{}", self.server_url, self.version)
    }

    /// Returns `true` if a non-empty auth token is attached.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.auth_token.as_ref().is_some_and(|token| !token.is_empty())
    }

    /// Fails with [`ApiError::NotSignedIn`] unless an auth token is attached.
    pub fn ensure_signed_in(&self) -> Result<(), ApiError> {
        if self.is_signed_in() {
            Ok(())
        } else {
            Err(ApiError::NotSignedIn)
        }
    }

    /// Fails with [`ApiError::VersionMismatch`] if the negotiated version is
    /// below `required`. Called by every endpoint operation before it touches
    /// the network.
    pub fn ensure_version_at_least(&self, required: ApiVersion) -> Result<(), ApiError> {
        if self.version >= required {
            Ok(())
        } else {
            Err(ApiError::VersionMismatch {
                required,
                actual: self.version,
            })
        }
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session() -> Session {
        Session::new("http://test", "dad65087-b08b-4603-af4e-2887b8aafc67", ApiVersion::new(3, 18))
    }

    #[test]
    fn test_base_url_includes_version() {
        let session = test_session();
        assert_eq!(session.base_url(), "http://test/api/3.18");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let session = Session::new("http://test/", "site", ApiVersion::new(3, 18));
        assert_eq!(session.server_url(), "http://test");
        assert_eq!(session.base_url(), "http://test/api/3.18");
    }

    #[test]
    fn test_signed_in_requires_non_empty_token() {
        let mut session = test_session();
        assert!(!session.is_signed_in());
        assert!(matches!(
            session.ensure_signed_in(),
            Err(ApiError::NotSignedIn)
        ));

        session.set_auth_token(Some(String::new()));
        assert!(!session.is_signed_in());

        session.set_auth_token(Some("j80k54ll2lfMZ0tv97mlPvvSCRyD0DOM".to_string()));
        assert!(session.is_signed_in());
        assert!(session.ensure_signed_in().is_ok());
    }

    #[test]
    fn test_version_gate() {
        let session = test_session();
        assert!(session.ensure_version_at_least(ApiVersion::new(3, 18)).is_ok());
        assert!(session.ensure_version_at_least(ApiVersion::new(3, 5)).is_ok());

        let result = session.ensure_version_at_least(ApiVersion::new(3, 19));
        match result {
            Err(ApiError::VersionMismatch { required, actual }) => {
                assert_eq!(required, ApiVersion::new(3, 19));
                assert_eq!(actual, ApiVersion::new(3, 18));
            }
            other => panic!("expected version mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_session_serde_round_trip() {
        let session = test_session().with_auth_token("token");
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back.server_url(), session.server_url());
        assert_eq!(back.site_id(), session.site_id());
        assert_eq!(back.version(), session.version());
        assert_eq!(back.auth_token(), session.auth_token());
    }
}
