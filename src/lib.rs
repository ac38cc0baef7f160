//! Conference Gateway - API gateway for the conference platform
//!
//! Fronts the platform's backend services with correlation tracking,
//! API-version tagging, header-enriching reverse proxying, and a
//! rate-limited, enumeration-safe password-reset flow.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
