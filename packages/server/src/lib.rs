#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web ingestion server for noise reports.
//!
//! Accepts report submissions on `POST /api/noise/report`, validates them
//! against an explicit schema and appends them to the report store. Also
//! serves the category list, the decibel reference scale and, when built,
//! the static front-end.

pub mod config;
mod handlers;
pub mod schema;

use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use noise_nab_database::{DatabaseReportStore, ReportStore, db};

pub use config::ServerConfig;

/// Shared application state.
pub struct AppState {
    /// Append-only report storage.
    pub store: Arc<dyn ReportStore>,
}

/// Registers the `/api` routes.
///
/// Split out from [`run_server`] so tests can mount the same routes on a
/// test service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(handlers::json_config()).service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/noise/categories", web::get().to(handlers::categories))
            .route("/noise/reference", web::get().to(handlers::reference_levels))
            .route("/noise/report", web::post().to(handlers::submit_report)),
    );
}

/// Starts the noise nab API server.
///
/// Loads `.env` if present, reads [`ServerConfig`] from the environment,
/// opens the report store and starts the Actix-Web HTTP server. The caller
/// provides the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the configuration is invalid, the
/// store cannot be opened, or the HTTP server fails to bind.
pub async fn run_server() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;

    log::info!("Opening report store...");
    let db_conn = db::connect(&config.database_url)
        .await
        .map_err(std::io::Error::other)?;

    let state = web::Data::new(AppState {
        store: Arc::new(DatabaseReportStore::new(db_conn)),
    });

    let static_dir = config.static_dir.clone();
    if static_dir.is_dir() {
        log::info!("Serving front-end from {}", static_dir.display());
    } else {
        log::warn!(
            "Front-end directory {} not found, serving API only",
            static_dir.display()
        );
    }

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        let app = App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure);

        if static_dir.is_dir() {
            app.service(Files::new("/", static_dir.clone()).index_file("index.html"))
        } else {
            app
        }
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use actix_web::http::StatusCode;
    use actix_web::http::header::ContentType;
    use actix_web::test;
    use async_trait::async_trait;
    use noise_nab_database::DbError;
    use noise_nab_database_models::{NewNoiseReport, NoiseReportRow};
    use noise_nab_server_models::{ApiError, ApiMessage};
    use serde_json::{Value, json};

    use super::*;

    #[derive(Default)]
    struct MemoryStore {
        reports: Mutex<Vec<NewNoiseReport>>,
    }

    impl MemoryStore {
        fn stored(&self) -> Vec<NewNoiseReport> {
            self.reports.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReportStore for MemoryStore {
        async fn insert_report(&self, report: &NewNoiseReport) -> Result<String, DbError> {
            let mut reports = self.reports.lock().unwrap();
            reports.push(report.clone());
            Ok(format!("report-{}", reports.len()))
        }

        async fn list_reports(
            &self,
            limit: u32,
            offset: u32,
        ) -> Result<Vec<NoiseReportRow>, DbError> {
            Ok(self
                .stored()
                .into_iter()
                .enumerate()
                .skip(offset as usize)
                .take(limit as usize)
                .map(|(i, r)| NoiseReportRow {
                    id: format!("report-{}", i + 1),
                    city: r.city,
                    place: r.place,
                    noise_level_db: r.noise_level_db,
                    category: r.category,
                    created_at: String::new(),
                })
                .collect())
        }

        async fn count_reports(&self) -> Result<u64, DbError> {
            Ok(self.stored().len() as u64)
        }
    }

    struct FailingStore;

    #[async_trait]
    impl ReportStore for FailingStore {
        async fn insert_report(&self, _report: &NewNoiseReport) -> Result<String, DbError> {
            Err(DbError::Connection("connection reset by peer".to_string()))
        }

        async fn list_reports(
            &self,
            _limit: u32,
            _offset: u32,
        ) -> Result<Vec<NoiseReportRow>, DbError> {
            Err(DbError::Connection("connection reset by peer".to_string()))
        }

        async fn count_reports(&self) -> Result<u64, DbError> {
            Err(DbError::Connection("connection reset by peer".to_string()))
        }
    }

    fn springfield() -> Value {
        json!({
            "city": "Springfield",
            "place": "Main St",
            "noise_level": 72,
            "category": "Commercial",
            "latitude": 39.78,
            "longitude": -89.65,
            "date_time": "2026-10-17T09:30:00.000Z"
        })
    }

    fn post_report(body: &Value) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/noise/report")
            .set_json(body)
    }

    fn state_with(store: Arc<dyn ReportStore>) -> web::Data<AppState> {
        web::Data::new(AppState { store })
    }

    #[actix_web::test]
    async fn valid_report_is_stored() {
        let store = Arc::new(MemoryStore::default());
        let app = test::init_service(
            App::new()
                .app_data(state_with(store.clone()))
                .configure(configure),
        )
        .await;

        let resp = test::call_service(&app, post_report(&springfield()).to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: ApiMessage = test::read_body_json(resp).await;
        assert_eq!(body.message, "Noise data saved successfully!");

        assert_eq!(
            store.stored(),
            vec![NewNoiseReport {
                city: "Springfield".to_string(),
                place: "Main St".to_string(),
                noise_level_db: 72.0,
                category: "Commercial".to_string(),
            }]
        );
    }

    #[actix_web::test]
    async fn identical_submissions_create_two_records() {
        let store = Arc::new(MemoryStore::default());
        let app = test::init_service(
            App::new()
                .app_data(state_with(store.clone()))
                .configure(configure),
        )
        .await;

        for _ in 0..2 {
            let resp = test::call_service(&app, post_report(&springfield()).to_request()).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        assert_eq!(store.count_reports().await.unwrap(), 2);
        let stored = store.stored();
        assert_eq!(stored[0], stored[1]);
    }

    #[actix_web::test]
    async fn persistence_failure_returns_generic_error() {
        let app = test::init_service(
            App::new()
                .app_data(state_with(Arc::new(FailingStore)))
                .configure(configure),
        )
        .await;

        let resp = test::call_service(&app, post_report(&springfield()).to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: ApiError = test::read_body_json(resp).await;
        assert_eq!(body.error, "Internal Server Error");
    }

    #[actix_web::test]
    async fn schema_failure_returns_generic_error_without_storing() {
        let store = Arc::new(MemoryStore::default());
        let app = test::init_service(
            App::new()
                .app_data(state_with(store.clone()))
                .configure(configure),
        )
        .await;

        let mut body = springfield();
        body["city"] = json!("   ");
        let resp = test::call_service(&app, post_report(&body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: ApiError = test::read_body_json(resp).await;
        assert_eq!(body.error, "Internal Server Error");

        let resp = test::call_service(&app, post_report(&json!({ "city": "Springfield" })).to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        assert!(store.stored().is_empty());
    }

    #[actix_web::test]
    async fn malformed_json_is_a_bad_request() {
        let store = Arc::new(MemoryStore::default());
        let app = test::init_service(
            App::new()
                .app_data(state_with(store.clone()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/noise/report")
            .insert_header(ContentType::json())
            .set_payload("{\"city\": \"Springfield\",")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ApiError = test::read_body_json(resp).await;
        assert_eq!(body.error, "Malformed request body");
        assert!(store.stored().is_empty());
    }

    #[actix_web::test]
    async fn lists_categories_and_reference_scale() {
        let app = test::init_service(
            App::new()
                .app_data(state_with(Arc::new(MemoryStore::default())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/noise/categories")
            .to_request();
        let categories: Value = test::call_and_read_body_json(&app, req).await;
        let codes: Vec<&str> = categories
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["code"].as_str().unwrap())
            .collect();
        assert_eq!(
            codes,
            vec!["Industrial", "Commercial", "Residential", "Silence"]
        );

        let req = test::TestRequest::get()
            .uri("/api/noise/reference")
            .to_request();
        let scale: Value = test::call_and_read_body_json(&app, req).await;
        let scale = scale.as_array().unwrap();
        assert_eq!(scale.len(), 10);
        assert_eq!(scale[0]["level"], 10);
        assert_eq!(scale[9]["description"], "Jackhammer, Loud Concert");
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let app = test::init_service(
            App::new()
                .app_data(state_with(Arc::new(MemoryStore::default())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let health: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(health["healthy"], true);
        assert_eq!(health["version"], env!("CARGO_PKG_VERSION"));
    }
}
