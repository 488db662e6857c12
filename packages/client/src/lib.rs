#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Noise report form controller and submission transport.
//!
//! [`ReportForm`] gathers a reading, a location and a noise source,
//! validates them, and hands one submission to a [`ReportTransport`].
//! [`HttpReportTransport`] posts it to a running noise nab server.

pub mod form;
pub mod transport;

pub use form::{
    Coordinates, DEFAULT_COORDINATES, FormError, FormStatus, GeolocationError, ReportForm,
    SubmitError, UNKNOWN_LOCATION,
};
pub use transport::{HttpReportTransport, ReportTransport, TransportError};
