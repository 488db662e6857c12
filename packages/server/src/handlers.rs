//! HTTP handler functions for the noise nab API.

use actix_web::{HttpRequest, HttpResponse, error, web};
use noise_nab_noise_models::{NOISE_REFERENCE_SCALE, NoiseCategory};
use noise_nab_server_models::{
    ApiError, ApiHealth, ApiMessage, ApiNoiseCategory, ApiNoiseReference,
};

use crate::AppState;
use crate::schema::NOISE_REPORT_SCHEMA;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/noise/categories`
pub async fn categories() -> HttpResponse {
    let categories: Vec<ApiNoiseCategory> = NoiseCategory::all()
        .iter()
        .copied()
        .map(ApiNoiseCategory::from)
        .collect();

    HttpResponse::Ok().json(categories)
}

/// `GET /api/noise/reference`
///
/// Returns the decibel reference scale in ascending order.
pub async fn reference_levels() -> HttpResponse {
    let scale: Vec<ApiNoiseReference> = NOISE_REFERENCE_SCALE
        .iter()
        .map(ApiNoiseReference::from)
        .collect();

    HttpResponse::Ok().json(scale)
}

/// `POST /api/noise/report`
///
/// Validates the body against [`NOISE_REPORT_SCHEMA`] and appends one
/// record. Validation and storage failures are logged in full but answered
/// with the same generic 500 body.
pub async fn submit_report(
    state: web::Data<AppState>,
    body: web::Json<serde_json::Value>,
) -> HttpResponse {
    let report = match NOISE_REPORT_SCHEMA.validate(&body) {
        Ok(report) => report,
        Err(e) => {
            log::error!("Error saving noise data: {e}");
            return internal_error();
        }
    };

    match state.store.insert_report(&report).await {
        Ok(id) => {
            log::info!(
                "Stored noise report {id}: {} dB ({}) at {}, {}",
                report.noise_level_db,
                report.category,
                report.place,
                report.city
            );
            HttpResponse::Created().json(ApiMessage {
                message: "Noise data saved successfully!".to_string(),
            })
        }
        Err(e) => {
            log::error!("Error saving noise data: {e}");
            internal_error()
        }
    }
}

/// JSON extractor settings: unreadable bodies get a 400 with an
/// [`ApiError`] body instead of actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        log::warn!("Rejected malformed request body: {err}");
        let response = HttpResponse::BadRequest().json(ApiError {
            error: "Malformed request body".to_string(),
        });
        error::InternalError::from_response(err, response).into()
    })
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiError {
        error: "Internal Server Error".to_string(),
    })
}
