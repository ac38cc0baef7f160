//! API version extraction from request paths.

use std::fmt;

/// API version parsed from a `/api/v{N}/...` path.
///
/// Immutable once computed; stamped onto every response header, including
/// error responses, so clients always know which API version answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiVersion(String);

impl ApiVersion {
    /// Extracts the version segment from a request path.
    ///
    /// The path must have the exact shape `/api/v<digits>/...` (a trailing
    /// slash after the version segment is required, matching `/api/(v\d+)/.*`).
    /// Paths without a version segment are not an error at this layer;
    /// they simply carry no version.
    ///
    /// ```
    /// use conference_gateway::domain::ApiVersion;
    ///
    /// assert_eq!(ApiVersion::from_path("/api/v1/events").unwrap().as_str(), "v1");
    /// assert!(ApiVersion::from_path("/api/events").is_none());
    /// ```
    pub fn from_path(path: &str) -> Option<Self> {
        let rest = path.strip_prefix("/api/")?;
        let (segment, _) = rest.split_once('/')?;
        let digits = segment.strip_prefix('v')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self(segment.to_string()))
    }

    /// Returns the version token, e.g. `"v1"`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
