//! Noise report form controller.
//!
//! [`ReportForm`] holds the single mutable draft of a report plus an
//! explicit [`FormStatus`]. Validation happens before the transport is
//! touched; a valid draft produces exactly one transport call.

use chrono::{DateTime, SecondsFormat, Utc};
use noise_nab_noise_models::{
    DEFAULT_NOISE_LEVEL, MAX_NOISE_LEVEL, MIN_NOISE_LEVEL, NoiseCategory, NoiseReference,
    nearest_reference,
};
use noise_nab_server_models::ApiNoiseReportSubmission;

use crate::transport::{ReportTransport, TransportError};

/// City/place value sent when the reporter relied on geolocation.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Coordinates used until geolocation answers (central London).
pub const DEFAULT_COORDINATES: Coordinates = Coordinates {
    latitude: 51.505,
    longitude: -0.09,
};

/// Shown after a successful submission.
pub const SUCCESS_MESSAGE: &str = "Thank you for your contribution!";

/// Shown after any transport or server failure.
pub const FAILURE_MESSAGE: &str = "Submission failed.";

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// Why the device position could not be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    /// The position lookup failed or was denied.
    #[error("Could not get your location. Please enter it manually.")]
    Unavailable,

    /// The device offers no position lookup at all.
    #[error("Geolocation is not supported by this device.")]
    Unsupported,
}

/// Client-side validation failures. The display text is shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// Manual location mode with a blank city.
    #[error("Please enter the city.")]
    MissingCity,

    /// Manual location mode with a blank place.
    #[error("Please enter the specific place within the city.")]
    MissingPlace,

    /// No noise source category selected.
    #[error("Please select a Noise Source.")]
    MissingCategory,
}

/// Errors from [`ReportForm::submit`].
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The draft failed validation; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] FormError),

    /// The report was sent but not acknowledged.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Where the form is in its submit cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    /// Nothing to report.
    Idle,
    /// A submission is in flight.
    Submitting,
    /// The last submission was acknowledged.
    Success(String),
    /// Validation, geolocation or submission failed.
    Error(String),
}

impl FormStatus {
    /// The user-facing message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(message) | Self::Error(message) => Some(message),
            Self::Idle | Self::Submitting => None,
        }
    }
}

/// The draft noise report and its submission status.
#[derive(Debug, Clone)]
pub struct ReportForm {
    noise_level: u8,
    manual_location: bool,
    city: String,
    place: String,
    category: Option<NoiseCategory>,
    coordinates: Coordinates,
    status: FormStatus,
}

impl Default for ReportForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportForm {
    /// Creates an empty form at the default level and coordinates.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            noise_level: DEFAULT_NOISE_LEVEL,
            manual_location: false,
            city: String::new(),
            place: String::new(),
            category: None,
            coordinates: DEFAULT_COORDINATES,
            status: FormStatus::Idle,
        }
    }

    /// Current decibel value.
    #[must_use]
    pub const fn noise_level(&self) -> u8 {
        self.noise_level
    }

    /// Sets the decibel value, clamped to the selectable range.
    pub fn set_noise_level(&mut self, level: u8) {
        self.noise_level = level.clamp(MIN_NOISE_LEVEL, MAX_NOISE_LEVEL);
    }

    /// Reference entry describing the current level.
    #[must_use]
    pub fn noise_info(&self) -> &'static NoiseReference {
        nearest_reference(f64::from(self.noise_level))
    }

    /// Whether the reporter types city/place instead of using geolocation.
    #[must_use]
    pub const fn is_manual_location(&self) -> bool {
        self.manual_location
    }

    /// Switches manual location mode on or off.
    pub const fn set_manual_location(&mut self, manual: bool) {
        self.manual_location = manual;
    }

    /// Sets the city text.
    pub fn set_city(&mut self, city: impl Into<String>) {
        self.city = city.into();
    }

    /// Sets the place text.
    pub fn set_place(&mut self, place: impl Into<String>) {
        self.place = place.into();
    }

    /// Selected noise source, if any.
    #[must_use]
    pub const fn category(&self) -> Option<NoiseCategory> {
        self.category
    }

    /// Selects a noise source.
    pub const fn select_category(&mut self, category: NoiseCategory) {
        self.category = Some(category);
    }

    /// Current coordinates.
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Records the outcome of the device position lookup.
    ///
    /// A failed lookup keeps the default coordinates, forces manual
    /// location mode and shows why.
    pub fn apply_geolocation(&mut self, result: Result<Coordinates, GeolocationError>) {
        match result {
            Ok(coordinates) => {
                log::debug!(
                    "Using device location {:.6}, {:.6}",
                    coordinates.latitude,
                    coordinates.longitude
                );
                self.coordinates = coordinates;
            }
            Err(e) => {
                log::warn!("Geolocation failed: {e:?}");
                self.manual_location = true;
                self.status = FormStatus::Error(e.to_string());
            }
        }
    }

    /// Clears the status message.
    pub fn dismiss_status(&mut self) {
        self.status = FormStatus::Idle;
    }

    /// Checks the draft.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`FormError`]: blank city, then blank
    /// place (manual mode only), then missing category.
    pub fn validate(&self) -> Result<NoiseCategory, FormError> {
        if self.manual_location {
            if self.city.trim().is_empty() {
                return Err(FormError::MissingCity);
            }
            if self.place.trim().is_empty() {
                return Err(FormError::MissingPlace);
            }
        }

        self.category.ok_or(FormError::MissingCategory)
    }

    /// Builds the request body for a submission at `now`.
    ///
    /// City and place fall back to [`UNKNOWN_LOCATION`] when blank.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] if the draft is invalid.
    pub fn prepare(&self, now: DateTime<Utc>) -> Result<ApiNoiseReportSubmission, FormError> {
        let category = self.validate()?;

        Ok(ApiNoiseReportSubmission {
            city: or_unknown(&self.city),
            place: or_unknown(&self.place),
            noise_level: f64::from(self.noise_level),
            category,
            latitude: self.coordinates.latitude,
            longitude: self.coordinates.longitude,
            date_time: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }

    /// Validates the draft and, if valid, sends it through `transport`
    /// exactly once.
    ///
    /// The status ends as `Success` or `Error`. Failures are not retried.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Invalid`] without calling the transport when
    /// validation fails, or [`SubmitError::Transport`] when sending fails.
    pub async fn submit(&mut self, transport: &dyn ReportTransport) -> Result<(), SubmitError> {
        let submission = match self.prepare(Utc::now()) {
            Ok(submission) => submission,
            Err(e) => {
                self.status = FormStatus::Error(e.to_string());
                return Err(e.into());
            }
        };

        self.status = FormStatus::Submitting;

        match transport.send(&submission).await {
            Ok(ack) => {
                log::info!("Report accepted: {}", ack.message);
                self.status = FormStatus::Success(SUCCESS_MESSAGE.to_string());
                Ok(())
            }
            Err(e) => {
                log::error!("Error submitting data: {e}");
                self.status = FormStatus::Error(FAILURE_MESSAGE.to_string());
                Err(e.into())
            }
        }
    }
}

fn or_unknown(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        UNKNOWN_LOCATION.to_string()
    } else {
        trimmed.to_string()
    }
}
