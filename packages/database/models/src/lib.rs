#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Noise report record types.
//!
//! These types represent the shape of a noise report as stored in the
//! `noise_reports` table. They are distinct from the request bodies the
//! server accepts and the response types in `noise_nab_server_models`.

use serde::{Deserialize, Serialize};

/// A validated noise report ready to be inserted.
///
/// Text fields are already trimmed and non-empty. `category` is free text:
/// the form only offers the closed category set, but the store accepts any
/// label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNoiseReport {
    /// City the reading was taken in.
    pub city: String,
    /// Specific place within the city.
    pub place: String,
    /// Reading in decibels.
    pub noise_level_db: f64,
    /// Noise source category label.
    pub category: String,
}

/// A noise report row as retrieved from the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseReportRow {
    /// Primary key (UUID v4).
    pub id: String,
    /// City the reading was taken in.
    pub city: String,
    /// Specific place within the city.
    pub place: String,
    /// Reading in decibels.
    pub noise_level_db: f64,
    /// Noise source category label.
    pub category: String,
    /// When the server stored the report (RFC 3339).
    pub created_at: String,
}
