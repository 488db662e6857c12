#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the noise nab server.
//!
//! The report submission body keeps the `snake_case` field names the form
//! has always sent. Response types are shared between the server and the
//! client transport.

use noise_nab_noise_models::{NoiseCategory, NoiseReference};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/noise/report` as sent by the form.
///
/// The server validates the raw JSON against its report schema instead of
/// deserializing into this type, so older or looser clients (for example
/// ones sending the level as a string) are still accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiNoiseReportSubmission {
    /// City, or `"Unknown"` when the reporter relied on geolocation.
    pub city: String,
    /// Place within the city, or `"Unknown"`.
    pub place: String,
    /// Reading in decibels.
    pub noise_level: f64,
    /// Noise source category.
    pub category: NoiseCategory,
    /// Reporter latitude (WGS84).
    pub latitude: f64,
    /// Reporter longitude (WGS84).
    pub longitude: f64,
    /// When the reading was taken (RFC 3339, client clock).
    pub date_time: String,
}

/// Acknowledgement returned on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    /// Human-readable confirmation.
    pub message: String,
}

/// Error body returned on failure. Never carries internal details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Generic error description.
    pub error: String,
}

/// A decibel reference entry as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiNoiseReference {
    /// Decibel level.
    pub level: u8,
    /// Everyday sounds at this level.
    pub description: String,
    /// Display color (CSS hex).
    pub color: String,
}

impl From<&NoiseReference> for ApiNoiseReference {
    fn from(entry: &NoiseReference) -> Self {
        Self {
            level: entry.level,
            description: entry.description.to_string(),
            color: entry.color.to_string(),
        }
    }
}

/// A selectable noise source category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiNoiseCategory {
    /// Machine-readable code (also the stored label).
    pub code: NoiseCategory,
    /// Display label.
    pub label: String,
}

impl From<NoiseCategory> for ApiNoiseCategory {
    fn from(category: NoiseCategory) -> Self {
        Self {
            code: category,
            label: category.to_string(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_uses_form_field_names() {
        let submission = ApiNoiseReportSubmission {
            city: "Springfield".to_string(),
            place: "Main St".to_string(),
            noise_level: 72.0,
            category: NoiseCategory::Commercial,
            latitude: 39.8,
            longitude: -89.6,
            date_time: "2026-10-17T09:30:00+00:00".to_string(),
        };

        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(value["city"], "Springfield");
        assert_eq!(value["place"], "Main St");
        assert_eq!(value["noise_level"], 72.0);
        assert_eq!(value["category"], "Commercial");
        assert_eq!(value["date_time"], "2026-10-17T09:30:00+00:00");
    }
}
