//! Request body schema for noise report submissions.
//!
//! The schema is an explicit list of required fields and their kinds. It
//! is checked once, at the HTTP boundary, before anything touches the
//! store.

use std::fmt;

use noise_nab_database_models::NewNoiseReport;
use serde_json::{Map, Value};

/// Kind of value a schema field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Text, non-empty after trimming. Numbers are accepted and kept in
    /// their textual form.
    Text,
    /// A finite number, either a JSON number or numeric text.
    Number,
}

/// One required field of a [`ReportSchema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// JSON key in the request body.
    pub name: &'static str,
    /// Accepted kind of value.
    pub kind: FieldKind,
}

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Absent or `null`.
    Missing,
    /// Text that is empty after trimming.
    Blank,
    /// Not representable as text.
    NotText,
    /// Not a finite number.
    NotNumber,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Missing => "is required",
            Self::Blank => "must not be blank",
            Self::NotText => "must be text",
            Self::NotNumber => "must be a number",
        })
    }
}

/// A single rejected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldFailure {
    /// Name of the field.
    pub field: &'static str,
    /// What was wrong with it.
    pub reason: FailureReason,
}

impl fmt::Display for FieldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

/// Errors from validating a submission body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The body is valid JSON but not an object.
    #[error("Request body must be a JSON object")]
    NotAnObject,

    /// One or more fields failed their rule.
    #[error("Invalid noise report: {}", join_failures(.0))]
    Fields(Vec<FieldFailure>),
}

fn join_failures(failures: &[FieldFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Explicit schema for a request body.
#[derive(Debug, Clone, Copy)]
pub struct ReportSchema {
    fields: &'static [FieldRule],
}

const CITY: FieldRule = FieldRule {
    name: "city",
    kind: FieldKind::Text,
};
const PLACE: FieldRule = FieldRule {
    name: "place",
    kind: FieldKind::Text,
};
const NOISE_LEVEL: FieldRule = FieldRule {
    name: "noise_level",
    kind: FieldKind::Number,
};
const CATEGORY: FieldRule = FieldRule {
    name: "category",
    kind: FieldKind::Text,
};

/// Schema of `POST /api/noise/report`.
pub const NOISE_REPORT_SCHEMA: ReportSchema = ReportSchema {
    fields: &[CITY, PLACE, NOISE_LEVEL, CATEGORY],
};

impl ReportSchema {
    /// Returns the required fields, in check order.
    #[must_use]
    pub const fn fields(&self) -> &'static [FieldRule] {
        self.fields
    }

    /// Checks `body` against the schema and maps it onto the stored record
    /// shape.
    ///
    /// Every rule is checked so the error lists all failing fields. Keys
    /// not named by the schema (coordinates, timestamp, ...) are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the body is not an object or any
    /// required field fails its rule.
    pub fn validate(&self, body: &Value) -> Result<NewNoiseReport, ValidationError> {
        let Value::Object(object) = body else {
            return Err(ValidationError::NotAnObject);
        };

        let mut failures = Vec::new();
        let city = check(object, CITY, text_value, &mut failures);
        let place = check(object, PLACE, text_value, &mut failures);
        let noise_level_db = check(object, NOISE_LEVEL, number_value, &mut failures);
        let category = check(object, CATEGORY, text_value, &mut failures);

        match (city, place, noise_level_db, category) {
            (Some(city), Some(place), Some(noise_level_db), Some(category)) => {
                for key in object.keys() {
                    if !self.fields.iter().any(|rule| rule.name == key) {
                        log::debug!("Dropping unmapped field '{key}' from noise report");
                    }
                }

                Ok(NewNoiseReport {
                    city,
                    place,
                    noise_level_db,
                    category,
                })
            }
            _ => Err(ValidationError::Fields(failures)),
        }
    }
}

/// Runs `parse` on the value under `rule.name`, recording a failure when
/// the value is absent or rejected.
fn check<T>(
    object: &Map<String, Value>,
    rule: FieldRule,
    parse: fn(&Value) -> Result<T, FailureReason>,
    failures: &mut Vec<FieldFailure>,
) -> Option<T> {
    let result = match object.get(rule.name) {
        None | Some(Value::Null) => Err(FailureReason::Missing),
        Some(value) => parse(value),
    };

    match result {
        Ok(value) => Some(value),
        Err(reason) => {
            failures.push(FieldFailure {
                field: rule.name,
                reason,
            });
            None
        }
    }
}

fn text_value(value: &Value) -> Result<String, FailureReason> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return Err(FailureReason::NotText),
    };
    if text.is_empty() {
        return Err(FailureReason::Blank);
    }
    Ok(text)
}

fn number_value(value: &Value) -> Result<f64, FailureReason> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => return Err(FailureReason::Missing),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number
        .filter(|n| n.is_finite())
        .ok_or(FailureReason::NotNumber)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn failures(body: &Value) -> Vec<FieldFailure> {
        match NOISE_REPORT_SCHEMA.validate(body) {
            Err(ValidationError::Fields(failures)) => failures,
            other => panic!("expected field failures, got {other:?}"),
        }
    }

    #[test]
    fn maps_full_form_body() {
        let report = NOISE_REPORT_SCHEMA
            .validate(&json!({
                "city": "Springfield",
                "place": "Main St",
                "noise_level": 72,
                "category": "Commercial",
                "latitude": 39.78,
                "longitude": -89.65,
                "date_time": "2026-10-17T09:30:00Z"
            }))
            .unwrap();

        assert_eq!(
            report,
            NewNoiseReport {
                city: "Springfield".to_string(),
                place: "Main St".to_string(),
                noise_level_db: 72.0,
                category: "Commercial".to_string(),
            }
        );
    }

    #[test]
    fn trims_text_fields() {
        let report = NOISE_REPORT_SCHEMA
            .validate(&json!({
                "city": "  Springfield ",
                "place": "Main St\n",
                "noise_level": 40.5,
                "category": " Residential"
            }))
            .unwrap();

        assert_eq!(report.city, "Springfield");
        assert_eq!(report.place, "Main St");
        assert_eq!(report.category, "Residential");
    }

    #[test]
    fn accepts_numeric_text_level() {
        let report = NOISE_REPORT_SCHEMA
            .validate(&json!({
                "city": "Springfield",
                "place": "Main St",
                "noise_level": "65",
                "category": "Industrial"
            }))
            .unwrap();

        assert!((report.noise_level_db - 65.0).abs() < f64::EPSILON);
    }

    #[test]
    fn does_not_enforce_level_range_or_category_set() {
        let report = NOISE_REPORT_SCHEMA
            .validate(&json!({
                "city": "Springfield",
                "place": "Main St",
                "noise_level": 180,
                "category": "Fireworks"
            }))
            .unwrap();

        assert!((report.noise_level_db - 180.0).abs() < f64::EPSILON);
        assert_eq!(report.category, "Fireworks");
    }

    #[test]
    fn reports_every_failing_field() {
        let failures = failures(&json!({
            "city": "   ",
            "noise_level": "loud",
            "category": null
        }));

        assert_eq!(
            failures,
            vec![
                FieldFailure {
                    field: "city",
                    reason: FailureReason::Blank,
                },
                FieldFailure {
                    field: "place",
                    reason: FailureReason::Missing,
                },
                FieldFailure {
                    field: "noise_level",
                    reason: FailureReason::NotNumber,
                },
                FieldFailure {
                    field: "category",
                    reason: FailureReason::Missing,
                },
            ]
        );
    }

    #[test]
    fn rejects_non_text_values() {
        let failures = failures(&json!({
            "city": ["Springfield"],
            "place": true,
            "noise_level": 50,
            "category": "Silence"
        }));

        assert_eq!(failures.len(), 2);
        assert!(failures.iter().all(|f| f.reason == FailureReason::NotText));
    }

    #[test]
    fn valid_fields_do_not_mask_failing_ones() {
        let failures = failures(&json!({
            "city": "Springfield",
            "place": "Main St",
            "noise_level": 72,
            "category": "   "
        }));

        assert_eq!(
            failures,
            vec![FieldFailure {
                field: "category",
                reason: FailureReason::Blank,
            }]
        );
    }

    #[test]
    fn schema_lists_rules_in_check_order() {
        let rules: Vec<(&str, FieldKind)> = NOISE_REPORT_SCHEMA
            .fields()
            .iter()
            .map(|rule| (rule.name, rule.kind))
            .collect();

        assert_eq!(
            rules,
            vec![
                ("city", FieldKind::Text),
                ("place", FieldKind::Text),
                ("noise_level", FieldKind::Number),
                ("category", FieldKind::Text),
            ]
        );
    }

    #[test]
    fn rejects_non_object_body() {
        assert_eq!(
            NOISE_REPORT_SCHEMA.validate(&json!([1, 2, 3])),
            Err(ValidationError::NotAnObject)
        );
    }

    #[test]
    fn error_message_names_fields() {
        let err = NOISE_REPORT_SCHEMA.validate(&json!({})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid noise report: city is required, place is required, \
             noise_level is required, category is required"
        );
    }
}
