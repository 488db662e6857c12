//! Interactive report entry.
//!
//! Walks the reporter through the same fields as the web form: level,
//! location, noise source, then a single submission.

use dialoguer::{Confirm, Input, Select};
use noise_nab_client::{DEFAULT_COORDINATES, GeolocationError, HttpReportTransport, ReportForm};
use noise_nab_noise_models::{DEFAULT_NOISE_LEVEL, MAX_NOISE_LEVEL, NoiseCategory};

/// Runs the interactive form and submits the result once.
///
/// # Errors
///
/// Returns an error if a prompt fails or the submission is rejected.
pub async fn run(transport: &HttpReportTransport) -> Result<(), Box<dyn std::error::Error>> {
    println!("Noise Nab");
    println!("Help create quieter, healthier cities");
    println!();

    let mut form = ReportForm::new();

    // A terminal cannot locate the device, so the reporter types the
    // location unless they opt out.
    form.apply_geolocation(Err(GeolocationError::Unsupported));
    if let Some(message) = form.status().message() {
        println!("{message}");
    }
    form.dismiss_status();

    let level: u8 = Input::new()
        .with_prompt(format!("Noise level in dB (0-{MAX_NOISE_LEVEL})"))
        .default(DEFAULT_NOISE_LEVEL)
        .validate_with(|v: &u8| {
            if *v <= MAX_NOISE_LEVEL {
                Ok(())
            } else {
                Err(format!("must be at most {MAX_NOISE_LEVEL}"))
            }
        })
        .interact_text()?;
    form.set_noise_level(level);
    println!("  {level} dB: {}", form.noise_info().description);

    let manual = Confirm::new()
        .with_prompt("Enter location manually?")
        .default(form.is_manual_location())
        .interact()?;
    form.set_manual_location(manual);
    if let Some(note) = placeholder_location_note(&form) {
        println!("  {note}");
    }

    if manual {
        let city: String = Input::new()
            .with_prompt("City")
            .allow_empty(true)
            .interact_text()?;
        form.set_city(city);

        let place: String = Input::new()
            .with_prompt("Specific place")
            .allow_empty(true)
            .interact_text()?;
        form.set_place(place);
    }

    let labels: Vec<String> = NoiseCategory::all()
        .iter()
        .map(ToString::to_string)
        .collect();
    let idx = Select::new()
        .with_prompt("Noise source")
        .items(&labels)
        .default(0)
        .interact()?;
    form.select_category(NoiseCategory::all()[idx]);

    if !Confirm::new()
        .with_prompt("Submit noise report?")
        .default(true)
        .interact()?
    {
        println!("Cancelled.");
        return Ok(());
    }

    crate::submit_and_report(&mut form, transport).await?;

    Ok(())
}

/// Warns when a geolocated report would only carry the fallback
/// coordinates.
fn placeholder_location_note(form: &ReportForm) -> Option<String> {
    let coordinates = form.coordinates();
    if form.is_manual_location() || coordinates != DEFAULT_COORDINATES {
        return None;
    }
    Some(format!(
        "No device location available, the report will carry placeholder coordinates ({}, {}).",
        coordinates.latitude, coordinates.longitude
    ))
}
