//! Backend service addresses.

use serde::Deserialize;

use crate::domain::{BackendService, RouteTable};

use super::error::ValidationError;

/// Base URLs for the five backend services the gateway fronts.
///
/// Defaults match the local docker-compose port layout.
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    #[serde(default = "default_event_management_url")]
    pub event_management_url: String,

    #[serde(default = "default_speaker_coordination_url")]
    pub speaker_coordination_url: String,

    #[serde(default = "default_partner_coordination_url")]
    pub partner_coordination_url: String,

    #[serde(default = "default_attendee_experience_url")]
    pub attendee_experience_url: String,

    #[serde(default = "default_company_management_url")]
    pub company_management_url: String,
}

impl ServicesConfig {
    /// Builds the static routing table from the configured base URLs.
    ///
    /// The table is constructed once at startup and read-only afterwards.
    pub fn route_table(&self) -> RouteTable {
        RouteTable::new()
            .with_route(
                "/api/v1/events",
                BackendService::EventManagement,
                &self.event_management_url,
            )
            .with_route(
                "/api/v1/speakers",
                BackendService::SpeakerCoordination,
                &self.speaker_coordination_url,
            )
            .with_route(
                "/api/v1/partners",
                BackendService::PartnerCoordination,
                &self.partner_coordination_url,
            )
            .with_route(
                "/api/v1/content",
                BackendService::AttendeeExperience,
                &self.attendee_experience_url,
            )
            .with_route(
                "/api/v1/companies",
                BackendService::CompanyManagement,
                &self.company_management_url,
            )
    }

    /// Validate service URL formats
    pub fn validate(&self) -> Result<(), ValidationError> {
        let urls: [(&'static str, &String); 5] = [
            ("event-management", &self.event_management_url),
            ("speaker-coordination", &self.speaker_coordination_url),
            ("partner-coordination", &self.partner_coordination_url),
            ("attendee-experience", &self.attendee_experience_url),
            ("company-management", &self.company_management_url),
        ];
        for (name, url) in urls {
            if url::Url::parse(url).is_err() {
                return Err(ValidationError::InvalidServiceUrl(name));
            }
        }
        Ok(())
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            event_management_url: default_event_management_url(),
            speaker_coordination_url: default_speaker_coordination_url(),
            partner_coordination_url: default_partner_coordination_url(),
            attendee_experience_url: default_attendee_experience_url(),
            company_management_url: default_company_management_url(),
        }
    }
}

fn default_event_management_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_speaker_coordination_url() -> String {
    "http://localhost:8082".to_string()
}

fn default_partner_coordination_url() -> String {
    "http://localhost:8083".to_string()
}

fn default_attendee_experience_url() -> String {
    "http://localhost:8084".to_string()
}

fn default_company_management_url() -> String {
    "http://localhost:8085".to_string()
}
