//! Path-prefix routing table for backend dispatch.
//!
//! The table is built once at startup and read-only afterwards. Every
//! recognized prefix maps to exactly one backend; unknown prefixes are a
//! reportable routing failure, never a silent fallback.

use std::fmt;

use super::errors::RoutingError;

/// The backend services the gateway fronts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendService {
    EventManagement,
    SpeakerCoordination,
    PartnerCoordination,
    AttendeeExperience,
    CompanyManagement,
}

impl BackendService {
    /// Returns the canonical service name used in logs and error payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendService::EventManagement => "event-management-service",
            BackendService::SpeakerCoordination => "speaker-coordination-service",
            BackendService::PartnerCoordination => "partner-coordination-service",
            BackendService::AttendeeExperience => "attendee-experience-service",
            BackendService::CompanyManagement => "company-management-service",
        }
    }
}

impl fmt::Display for BackendService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One routing entry: a path prefix and the backend it maps to.
#[derive(Debug, Clone)]
struct Route {
    prefix: String,
    service: BackendService,
    base_url: String,
}

/// Static prefix-to-backend routing table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Creates an empty table. Use [`RouteTable::with_route`] to populate it.
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Adds a route. The base URL is stored without a trailing slash so that
    /// target URLs concatenate cleanly.
    pub fn with_route(
        mut self,
        prefix: impl Into<String>,
        service: BackendService,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        self.routes.push(Route {
            prefix: prefix.into(),
            service,
            base_url: base_url.trim_end_matches('/').to_string(),
        });
        self
    }

    /// Resolves a request path to its backend service.
    ///
    /// Query strings are ignored for routing. When several prefixes match,
    /// the longest one wins. An unmatched path is an error, never a default.
    pub fn resolve(&self, path: &str) -> Result<BackendService, RoutingError> {
        if path.trim().is_empty() {
            return Err(RoutingError::UnknownRoute {
                path: path.to_string(),
            });
        }

        let clean_path = path.split('?').next().unwrap_or(path);

        self.routes
            .iter()
            .filter(|route| clean_path.starts_with(route.prefix.as_str()))
            .max_by_key(|route| route.prefix.len())
            .map(|route| route.service)
            .ok_or_else(|| RoutingError::UnknownRoute {
                path: clean_path.to_string(),
            })
    }

    /// Returns the base URL configured for a service.
    pub fn base_url(&self, service: BackendService) -> Result<&str, RoutingError> {
        self.routes
            .iter()
            .find(|route| route.service == service)
            .map(|route| route.base_url.as_str())
            .ok_or(RoutingError::UnconfiguredService { service })
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}
