//! Value normalization for the dynamic field widgets.
//!
//! Browser inputs hand back strings; these functions turn them into the value
//! shapes stored in a stage's form values, and turn stored values back into
//! what a widget displays.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::model::field::{FieldConfiguration, FieldType};
use crate::model::value::FieldValue;

/// Value emitted by the placeholder table editor.
pub const TABLE_PLACEHOLDER: &str = "table-data-placeholder";

/// Shown by `autonumber` fields before a number is assigned.
pub const AUTONUMBER_PENDING: &str = "AUTO-GENERATED";

pub const MAX_RATING: u8 = 5;

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Numeric input as stored by `numeric` and `currency` fields: the longest
/// leading number in `input`, or `0` when there is none.
pub fn normalize_numeric(input: &str) -> f64 {
    let trimmed = input.trim_start();
    let candidate_len = trimmed
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    let candidate = &trimmed[..candidate_len];

    (1..=candidate.len())
        .rev()
        .find_map(|end| candidate[..end].parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

fn to_iso(datetime: NaiveDateTime) -> String {
    datetime.format(ISO_FORMAT).to_string()
}

fn parse_iso(value: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc).naive_utc())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok())
        .or_else(|| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Value of a `<input type="date">` (`YYYY-MM-DD`) as an ISO-8601 UTC string
/// at midnight. `None` when the input is empty or malformed.
pub fn normalize_date(input: &str) -> Option<String> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(to_iso)
}

/// Value of a `<input type="datetime-local">` as an ISO-8601 UTC string.
/// Local wall time is taken as UTC.
pub fn normalize_datetime(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    parse_iso(input).map(to_iso)
}

/// Stored ISO string back into the `YYYY-MM-DD` a date input expects.
pub fn date_input_value(value: Option<&FieldValue>) -> String {
    value
        .and_then(FieldValue::as_str)
        .and_then(parse_iso)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Stored ISO string back into the `YYYY-MM-DDTHH:MM` a datetime input expects.
pub fn datetime_input_value(value: Option<&FieldValue>) -> String {
    value
        .and_then(FieldValue::as_str)
        .and_then(parse_iso)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M").to_string())
        .unwrap_or_default()
}

/// Human date such as `Jun 15, 2025`.
pub fn format_date(iso: &str) -> Option<String> {
    parse_iso(iso).map(|dt| dt.format("%b %-d, %Y").to_string())
}

/// Human date and time such as `Jun 15, 2025 14:30`.
pub fn format_datetime(iso: &str) -> Option<String> {
    parse_iso(iso).map(|dt| dt.format("%b %-d, %Y %H:%M").to_string())
}

/// Stored value for clicking star `star` of a rating widget.
pub fn rating_value(star: u8) -> FieldValue {
    FieldValue::Number(f64::from(star.clamp(1, MAX_RATING)))
}

/// Current rating, if one was given.
pub fn rating_of(value: Option<&FieldValue>) -> Option<u8> {
    value
        .filter(|v| v.is_filled())
        .and_then(FieldValue::as_number)
        .map(|n| n.round().clamp(0.0, f64::from(MAX_RATING)) as u8)
        .filter(|&n| n > 0)
}

/// Caption next to the stars: `"<k>/5"` or `"No rating"`.
pub fn rating_label(value: Option<&FieldValue>) -> String {
    match rating_of(value) {
        Some(stars) => format!("{}/{}", stars, MAX_RATING),
        None => "No rating".to_string(),
    }
}

pub fn verification_label(value: Option<&FieldValue>) -> &'static str {
    if value.is_some_and(FieldValue::is_filled) {
        "Verified"
    } else {
        "Pending"
    }
}

/// Read-only text of an `autonumber` field.
pub fn autonumber_display(value: Option<&FieldValue>) -> String {
    value
        .filter(|v| v.is_filled())
        .map(FieldValue::as_text)
        .unwrap_or_else(|| AUTONUMBER_PENDING.to_string())
}

/// Text shown for a numeric input: empty while unfilled so the placeholder
/// stays visible.
pub fn numeric_input_value(value: Option<&FieldValue>) -> String {
    value
        .filter(|v| v.is_filled())
        .and_then(FieldValue::as_number)
        .map(|n| n.to_string())
        .unwrap_or_default()
}

/// One-line summary of a stored value, used where the value is listed rather
/// than edited.
pub fn display_text(config: &FieldConfiguration, value: Option<&FieldValue>) -> String {
    let Some(value) = value.filter(|v| v.is_filled()) else {
        return match config.field_type {
            FieldType::Rating => rating_label(None),
            FieldType::Verification => verification_label(None).to_string(),
            FieldType::Autonumber => AUTONUMBER_PENDING.to_string(),
            _ => String::new(),
        };
    };

    match config.field_type {
        FieldType::Date => value
            .as_str()
            .and_then(format_date)
            .unwrap_or_else(|| value.as_text()),
        FieldType::Datetime => value
            .as_str()
            .and_then(format_datetime)
            .unwrap_or_else(|| value.as_text()),
        FieldType::Daterange => {
            let range = value.as_range().cloned().unwrap_or_default();
            let side = |s: Option<String>| {
                s.as_deref()
                    .and_then(format_date)
                    .unwrap_or_else(|| "?".to_string())
            };
            format!("{} to {}", side(range.start), side(range.end))
        }
        FieldType::Checkbox => "Yes".to_string(),
        FieldType::Verification => verification_label(Some(value)).to_string(),
        FieldType::Rating => rating_label(Some(value)),
        FieldType::Multifile => value.as_list().join(", "),
        _ => value.as_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::value::DateRange;

    #[test]
    fn non_numeric_input_stores_zero() {
        assert_eq!(normalize_numeric("abc"), 0.0);
        assert_eq!(normalize_numeric(""), 0.0);
        assert_eq!(normalize_numeric("-"), 0.0);
    }

    #[test]
    fn numeric_input_keeps_leading_number() {
        assert_eq!(normalize_numeric("1450.75"), 1450.75);
        assert_eq!(normalize_numeric("  12abc"), 12.0);
        assert_eq!(normalize_numeric("3.5e2"), 350.0);
        assert_eq!(normalize_numeric("7e"), 7.0);
        assert_eq!(normalize_numeric("-4"), -4.0);
    }

    #[test]
    fn dates_normalize_to_iso_midnight() {
        assert_eq!(
            normalize_date("2025-06-15").as_deref(),
            Some("2025-06-15T00:00:00.000Z")
        );
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("15/06/2025"), None);
    }

    #[test]
    fn datetimes_normalize_to_iso() {
        assert_eq!(
            normalize_datetime("2025-06-15T14:30").as_deref(),
            Some("2025-06-15T14:30:00.000Z")
        );
        assert_eq!(
            normalize_datetime("2025-06-15T14:30:00+05:30").as_deref(),
            Some("2025-06-15T09:00:00.000Z")
        );
        assert_eq!(normalize_datetime(" "), None);
    }

    #[test]
    fn stored_dates_feed_back_into_inputs() {
        let stored = FieldValue::from("2025-06-15T14:30:00.000Z");
        assert_eq!(date_input_value(Some(&stored)), "2025-06-15");
        assert_eq!(datetime_input_value(Some(&stored)), "2025-06-15T14:30");
        assert_eq!(date_input_value(None), "");
    }

    #[test]
    fn clicking_star_k_stores_k() {
        for k in 1..=5u8 {
            let value = rating_value(k);
            assert_eq!(value, FieldValue::Number(f64::from(k)));
            assert_eq!(rating_label(Some(&value)), format!("{}/5", k));
        }
        assert_eq!(rating_label(None), "No rating");
        assert_eq!(rating_label(Some(&FieldValue::Number(0.0))), "No rating");
    }

    #[test]
    fn display_text_summarizes_by_type() {
        let registry = crate::registry::fields::lookup;
        let window = FieldValue::Range(DateRange {
            start: Some("2025-06-01T00:00:00.000Z".into()),
            end: None,
        });
        assert_eq!(
            display_text(registry("raWindowTime").unwrap(), Some(&window)),
            "Jun 1, 2025 to ?"
        );
        assert_eq!(
            display_text(registry("bidNo").unwrap(), None),
            AUTONUMBER_PENDING
        );
        assert_eq!(
            display_text(
                registry("brochures").unwrap(),
                Some(&vec!["a.pdf".to_string(), "b.pdf".to_string()].into())
            ),
            "a.pdf, b.pdf"
        );
        assert_eq!(display_text(registry("dsc").unwrap(), Some(&true.into())), "Verified");
    }

    #[test]
    fn numeric_inputs_stay_blank_until_filled() {
        assert_eq!(numeric_input_value(Some(&FieldValue::Number(0.0))), "");
        assert_eq!(numeric_input_value(Some(&FieldValue::Number(12.5))), "12.5");
    }
}
