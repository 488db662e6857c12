#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal front-end for submitting noise reports.
//!
//! ```text
//! noise_nab submit --level 72 --category Commercial --city Springfield --place "Main St"
//! noise_nab submit --level 40 --category Residential --lat 51.5 --lng -0.12
//! noise_nab reference
//! ```
//!
//! Running `noise_nab` with no subcommand enters interactive mode.

mod interactive;

use clap::{Parser, Subcommand};
use noise_nab_client::{
    Coordinates, GeolocationError, HttpReportTransport, ReportForm, SubmitError,
};
use noise_nab_noise_models::{
    DEFAULT_NOISE_LEVEL, MAX_NOISE_LEVEL, NOISE_REFERENCE_SCALE, NoiseCategory,
};

/// Server used when `--server` is not given.
const DEFAULT_SERVER: &str = "http://localhost:5000";

#[derive(Parser)]
#[command(name = "noise_nab", about = "Report ambient noise levels")]
struct Cli {
    /// Base URL of the noise nab server
    #[arg(long, global = true, default_value = DEFAULT_SERVER)]
    server: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit one noise report
    Submit(SubmitArgs),
    /// Print the decibel reference scale
    Reference,
}

#[derive(clap::Args)]
struct SubmitArgs {
    /// Noise level in dB (0-100)
    #[arg(
        long,
        default_value_t = DEFAULT_NOISE_LEVEL,
        value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_NOISE_LEVEL))
    )]
    level: u8,
    /// Noise source: Industrial, Commercial, Residential or Silence
    #[arg(long, value_parser = parse_category)]
    category: Option<NoiseCategory>,
    /// City (switches to manual location)
    #[arg(long)]
    city: Option<String>,
    /// Place within the city (switches to manual location)
    #[arg(long)]
    place: Option<String>,
    /// Device latitude
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    lat: Option<f64>,
    /// Device longitude
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lng: Option<f64>,
}

fn parse_category(value: &str) -> Result<NoiseCategory, String> {
    value.parse().map_err(|_| {
        let names: Vec<String> = NoiseCategory::all().iter().map(ToString::to_string).collect();
        format!("expected one of: {}", names.join(", "))
    })
}

/// Turns optional `--lat/--lng` flags into a geolocation result. Without
/// them the terminal has no way to locate the device.
const fn geolocation_from(
    lat: Option<f64>,
    lng: Option<f64>,
) -> Result<Coordinates, GeolocationError> {
    match (lat, lng) {
        (Some(latitude), Some(longitude)) => Ok(Coordinates {
            latitude,
            longitude,
        }),
        _ => Err(GeolocationError::Unsupported),
    }
}

fn form_from_args(args: SubmitArgs) -> ReportForm {
    let mut form = ReportForm::new();
    form.apply_geolocation(geolocation_from(args.lat, args.lng));
    if let Some(status) = form.status().message() {
        println!("{status}");
    }
    form.dismiss_status();

    if args.city.is_some() || args.place.is_some() {
        form.set_manual_location(true);
    }
    form.set_city(args.city.unwrap_or_default());
    form.set_place(args.place.unwrap_or_default());
    form.set_noise_level(args.level);
    if let Some(category) = args.category {
        form.select_category(category);
    }

    form
}

fn print_reference_scale() {
    for entry in NOISE_REFERENCE_SCALE {
        println!("{:>4} dB  {}", entry.level, entry.description);
    }
}

/// Submits `form` and prints the resulting status message.
///
/// # Errors
///
/// Returns the [`SubmitError`] if validation or sending failed.
async fn submit_and_report(
    form: &mut ReportForm,
    transport: &HttpReportTransport,
) -> Result<(), SubmitError> {
    let result = form.submit(transport).await;
    if let Some(message) = form.status().message() {
        println!("{message}");
    }
    result
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let transport = HttpReportTransport::new(&cli.server);

    let Some(command) = cli.command else {
        return interactive::run(&transport).await;
    };

    match command {
        Commands::Submit(args) => {
            let mut form = form_from_args(args);
            println!(
                "{} dB: {}",
                form.noise_level(),
                form.noise_info().description
            );
            submit_and_report(&mut form, &transport).await?;
        }
        Commands::Reference => print_reference_scale(),
    }

    Ok(())
}
