//! Boundary validation for incoming JSON payloads.
//!
//! Each payload kind has a rule table in [`rules`]. [`validate`] walks the
//! table, collects every field-level failure instead of stopping at the first
//! one, and returns a normalized object (known keys only, defaults filled in,
//! timestamps in UTC) that deserializes into the typed request struct.

pub mod extract;
pub mod rules;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::{CreateEvent, EventChanges, LoginRequest, UpdateDates};
use rules::{Check, FieldRule, Invariant, Presence, SchemaRules, TextFormat};

pub use extract::ValidatedJson;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Request types that are checked against a rule table before deserializing.
pub trait Validate: DeserializeOwned {
    const RULES: SchemaRules;
}

impl Validate for LoginRequest {
    const RULES: SchemaRules = rules::LOGIN;
}

impl Validate for CreateEvent {
    const RULES: SchemaRules = rules::CREATE_EVENT;
}

impl Validate for EventChanges {
    const RULES: SchemaRules = rules::UPDATE_EVENT;
}

impl Validate for UpdateDates {
    const RULES: SchemaRules = rules::UPDATE_DATES;
}

/// Validates and converts a raw payload into `T`.
pub fn parse<T: Validate>(payload: &Value) -> Result<T, Vec<FieldError>> {
    let normalized = validate(&T::RULES, payload)?;
    serde_json::from_value(Value::Object(normalized))
        .map_err(|e| vec![FieldError::new("body", e.to_string())])
}

pub fn validate(schema: &SchemaRules, payload: &Value) -> Result<Map<String, Value>, Vec<FieldError>> {
    let Some(input) = payload.as_object() else {
        return Err(vec![FieldError::new(
            "body",
            format!("Expected object, received {}", type_name(payload)),
        )]);
    };

    let mut errors = Vec::new();
    let mut normalized = Map::new();
    let mut timestamps: HashMap<&'static str, DateTime<Utc>> = HashMap::new();

    for rule in schema.fields {
        let presence = effective_presence(rule.presence, schema.partial);

        match input.get(rule.field) {
            None => match presence {
                Presence::Required => {
                    errors.push(FieldError::new(rule.field, format!("{} is required", rule.label)))
                }
                Presence::DefaultFlag(default) => {
                    normalized.insert(rule.field.to_string(), Value::Bool(default));
                }
                Presence::Optional | Presence::Nullable => {}
            },
            Some(Value::Null) if presence == Presence::Nullable => {
                normalized.insert(rule.field.to_string(), Value::Null);
            }
            Some(value) => match check_value(rule, value) {
                Ok(Checked::Value(v)) => {
                    normalized.insert(rule.field.to_string(), v);
                }
                Ok(Checked::Timestamp(ts)) => {
                    timestamps.insert(rule.field, ts);
                    normalized.insert(rule.field.to_string(), Value::String(ts.to_rfc3339()));
                }
                Err(message) => errors.push(FieldError::new(rule.field, message)),
            },
        }
    }

    for invariant in schema.invariants {
        match invariant {
            Invariant::NotBefore {
                field,
                reference,
                message,
            } => {
                if let (Some(value), Some(bound)) = (timestamps.get(field), timestamps.get(reference)) {
                    if value < bound {
                        errors.push(FieldError::new(*field, *message));
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(normalized)
    } else {
        Err(errors)
    }
}

fn effective_presence(presence: Presence, partial: bool) -> Presence {
    match presence {
        Presence::Required | Presence::DefaultFlag(_) if partial => Presence::Optional,
        other => other,
    }
}

enum Checked {
    Value(Value),
    Timestamp(DateTime<Utc>),
}

fn check_value(rule: &FieldRule, value: &Value) -> Result<Checked, String> {
    match rule.check {
        Check::Text { min, max, format } => {
            let text = value
                .as_str()
                .ok_or_else(|| format!("Expected string, received {}", type_name(value)))?;
            check_text(rule.label, text, min, max, format)?;
            Ok(Checked::Value(value.clone()))
        }
        Check::Timestamp { message } => {
            let text = value
                .as_str()
                .ok_or_else(|| format!("Expected string, received {}", type_name(value)))?;
            parse_utc_timestamp(text)
                .map(Checked::Timestamp)
                .ok_or_else(|| message.to_string())
        }
        Check::OneOf(allowed) => match value.as_str() {
            Some(text) if allowed.contains(&text) => Ok(Checked::Value(value.clone())),
            _ => Err(format!(
                "{} must be one of: {}",
                rule.label,
                allowed.join(", ")
            )),
        },
        Check::Flag => value
            .as_bool()
            .map(|_| Checked::Value(value.clone()))
            .ok_or_else(|| format!("Expected boolean, received {}", type_name(value))),
    }
}

/// Accepts only `YYYY-MM-DDTHH:MM:SS[.fff]Z`: uppercase `T`, UTC `Z`, no offsets.
fn parse_utc_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if text.as_bytes().get(10) != Some(&b'T') || !text.ends_with('Z') {
        return None;
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

fn check_text(
    label: &str,
    text: &str,
    min: usize,
    max: Option<usize>,
    format: TextFormat,
) -> Result<(), String> {
    let length = text.chars().count();
    if length < min {
        // An empty string reads as missing, same wording as an absent key.
        return Err(if min == 1 {
            format!("{} is required", label)
        } else {
            format!("{} must be at least {} characters", label, min)
        });
    }
    if let Some(max) = max {
        if length > max {
            return Err(format!("{} must be at most {} characters", label, max));
        }
    }

    match format {
        TextFormat::Any => Ok(()),
        TextFormat::Slug => {
            let valid = text
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
            if valid {
                Ok(())
            } else {
                Err(rules::SLUG_MESSAGE.to_string())
            }
        }
        TextFormat::Url => url::Url::parse(text)
            .map(|_| ())
            .map_err(|_| rules::URL_MESSAGE.to_string()),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_payload() -> Value {
        json!({
            "title": "Summer Launch",
            "slug": "launch-2024",
            "description": "Our biggest launch yet",
            "startDate": "2024-06-01T18:00:00Z",
            "endDate": "2024-06-01T21:00:00Z",
            "status": "upcoming",
            "location": "Berlin",
            "ctaUrl": "https://example.com/rsvp"
        })
    }

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_valid_create_defaults_featured_flag() {
        let event: CreateEvent = parse(&create_payload()).unwrap();
        assert!(!event.is_featured);
        assert_eq!(event.slug, "launch-2024");
        assert_eq!(event.cta_text, None);
    }

    #[test]
    fn test_create_reports_every_missing_field() {
        let errors = parse::<CreateEvent>(&json!({})).unwrap_err();
        assert_eq!(
            fields(&errors),
            vec!["title", "slug", "description", "startDate", "endDate", "status"]
        );
        assert_eq!(errors[0].message, "Title is required");
    }

    #[test]
    fn test_create_rejects_end_before_start() {
        let mut payload = create_payload();
        payload["endDate"] = json!("2024-06-01T17:59:59Z");

        let errors = parse::<CreateEvent>(&payload).unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new(
                "endDate",
                "End date must be after or equal to start date"
            )]
        );
    }

    #[test]
    fn test_equal_dates_are_accepted() {
        let mut payload = create_payload();
        payload["endDate"] = payload["startDate"].clone();

        assert!(parse::<CreateEvent>(&payload).is_ok());
    }

    #[test]
    fn test_timestamps_must_be_utc_with_t_separator() {
        for bad in [
            "2024-06-01T12:00:00+02:00",
            "2024-06-01T12:00:00+00:00",
            "2024-06-01 12:00:00Z",
            "2024-06-01t12:00:00z",
            "2024-06-01T12:00Z",
            "2024-06-01",
        ] {
            let errors = parse::<UpdateDates>(&json!({
                "startDate": bad,
                "endDate": bad
            }))
            .unwrap_err();

            assert_eq!(
                errors,
                vec![
                    FieldError::new("startDate", "Invalid start date format"),
                    FieldError::new("endDate", "Invalid end date format"),
                ],
                "{bad}"
            );
        }
    }

    #[test]
    fn test_fractional_seconds_are_accepted() {
        let dates: UpdateDates = parse(&json!({
            "startDate": "2024-06-01T12:00:00.250Z",
            "endDate": "2024-06-01T12:00:00.5Z"
        }))
        .unwrap();

        assert!(dates.end_date > dates.start_date);
    }

    #[test]
    fn test_slug_format() {
        for bad in ["Launch", "launch_2024", "launch 2024", "läunch"] {
            let mut payload = create_payload();
            payload["slug"] = json!(bad);

            let errors = parse::<CreateEvent>(&payload).unwrap_err();
            assert_eq!(errors, vec![FieldError::new("slug", rules::SLUG_MESSAGE)], "{bad}");
        }
    }

    #[test]
    fn test_length_bounds() {
        let mut payload = create_payload();
        payload["title"] = json!("x".repeat(256));
        payload["ctaText"] = json!("y".repeat(101));

        let errors = parse::<CreateEvent>(&payload).unwrap_err();
        assert_eq!(fields(&errors), vec!["title", "ctaText"]);
        assert_eq!(errors[0].message, "Title must be at most 255 characters");
    }

    #[test]
    fn test_cta_url_must_be_a_url() {
        let mut payload = create_payload();
        payload["ctaUrl"] = json!("not a url");

        let errors = parse::<CreateEvent>(&payload).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("ctaUrl", rules::URL_MESSAGE)]);
    }

    #[test]
    fn test_nullable_fields_accept_null() {
        let mut payload = create_payload();
        payload["location"] = Value::Null;
        payload["ctaUrl"] = Value::Null;

        let event: CreateEvent = parse(&payload).unwrap();
        assert_eq!(event.location, None);
    }

    #[test]
    fn test_required_fields_reject_null() {
        let mut payload = create_payload();
        payload["title"] = Value::Null;

        let errors = parse::<CreateEvent>(&payload).unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new("title", "Expected string, received null")]
        );
    }

    #[test]
    fn test_unknown_status() {
        let mut payload = create_payload();
        payload["status"] = json!("archived");

        let errors = parse::<CreateEvent>(&payload).unwrap_err();
        assert_eq!(
            errors[0].message,
            "Status must be one of: draft, upcoming, past, cancelled"
        );
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let mut payload = create_payload();
        payload["id"] = json!("00000000-0000-0000-0000-000000000000");

        let normalized = validate(&rules::CREATE_EVENT, &payload).unwrap();
        assert!(!normalized.contains_key("id"));
    }

    #[test]
    fn test_partial_update_accepts_single_date() {
        // The stored end date is not consulted here.
        let changes: EventChanges =
            parse(&json!({ "startDate": "2030-01-01T00:00:00Z" })).unwrap();

        assert!(changes.start_date.is_some());
        assert!(changes.end_date.is_none());
    }

    #[test]
    fn test_partial_update_checks_order_when_both_dates_given() {
        let errors = parse::<EventChanges>(&json!({
            "startDate": "2024-06-02T00:00:00Z",
            "endDate": "2024-06-01T00:00:00Z"
        }))
        .unwrap_err();

        assert_eq!(fields(&errors), vec!["endDate"]);
    }

    #[test]
    fn test_partial_update_does_not_default_featured_flag() {
        let changes: EventChanges = parse(&json!({ "title": "Renamed" })).unwrap();
        assert_eq!(changes.is_featured, None);
    }

    #[test]
    fn test_partial_update_still_checks_formats() {
        let errors = parse::<EventChanges>(&json!({ "slug": "Bad Slug", "isFeatured": "yes" }))
            .unwrap_err();

        assert_eq!(fields(&errors), vec!["slug", "isFeatured"]);
        assert_eq!(errors[1].message, "Expected boolean, received string");
    }

    #[test]
    fn test_update_dates_requires_both() {
        let errors =
            parse::<UpdateDates>(&json!({ "startDate": "2024-06-02T00:00:00Z" })).unwrap_err();

        assert_eq!(errors, vec![FieldError::new("endDate", "End date is required")]);
    }

    #[test]
    fn test_update_dates_rejects_bad_format() {
        let errors = parse::<UpdateDates>(&json!({
            "startDate": "June 2nd",
            "endDate": "2024-06-01T00:00:00Z"
        }))
        .unwrap_err();

        assert_eq!(
            errors,
            vec![FieldError::new("startDate", "Invalid start date format")]
        );
    }

    #[test]
    fn test_login_requires_non_empty_fields() {
        let errors = parse::<LoginRequest>(&json!({ "username": "", "password": "" })).unwrap_err();
        assert_eq!(
            errors,
            vec![
                FieldError::new("username", "Username is required"),
                FieldError::new("password", "Password is required"),
            ]
        );

        let login: LoginRequest =
            parse(&json!({ "username": "admin", "password": "secret" })).unwrap();
        assert_eq!(login.username, "admin");
    }

    #[test]
    fn test_non_object_body() {
        let errors = parse::<LoginRequest>(&json!(["admin"])).unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new("body", "Expected object, received array")]
        );
    }
}
