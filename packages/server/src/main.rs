#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Noise nab API server binary.
//!
//! Configured through `DATABASE_URL`, `BIND_ADDR`, `PORT` and `STATIC_DIR`
//! (a `.env` file in the working directory is honoured).

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    noise_nab_server::run_server().await
}
