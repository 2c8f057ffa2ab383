use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Values of one stage form, keyed by field key. Submitted wholesale on save.
pub type FormValues = BTreeMap<String, FieldValue>;

/// A `{start, end}` pair produced by `daterange` fields. Each side is an
/// ISO-8601 string once picked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// The value held by a single field.
///
/// Serialized untagged so a `FormValues` map is plain JSON:
/// `{"unitRate": 120.5, "termsAcceptance": true, "brochures": ["a.pdf"]}`.
/// Variant order matters for deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
    Range(DateRange),
}

impl FieldValue {
    /// Whether the value counts as filled for required checks and completion.
    ///
    /// Empty text, zero, NaN, `false`, an empty list and a range with neither
    /// side set are all unfilled.
    pub fn is_filled(&self) -> bool {
        match self {
            FieldValue::Bool(b) => *b,
            FieldValue::Number(n) => *n != 0.0 && !n.is_nan(),
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::List(items) => !items.is_empty(),
            FieldValue::Range(range) => range.start.is_some() || range.end.is_some(),
        }
    }

    /// Text form of the value, as pattern rules see it. Lists are joined with
    /// commas and ranges contribute their start.
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::List(items) => items.join(","),
            FieldValue::Range(range) => range.start.clone().unwrap_or_default(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> bool {
        matches!(self, FieldValue::Bool(true))
    }

    pub fn as_list(&self) -> &[String] {
        match self {
            FieldValue::List(items) => items,
            _ => &[],
        }
    }

    pub fn as_range(&self) -> Option<&DateRange> {
        match self {
            FieldValue::Range(range) => Some(range),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

/// Whether `key` holds a filled value in `values`.
pub fn is_filled(values: &FormValues, key: &str) -> bool {
    values.get(key).is_some_and(FieldValue::is_filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn truthiness_matches_form_semantics() {
        assert!(!FieldValue::from("").is_filled());
        assert!(FieldValue::from("x").is_filled());
        assert!(!FieldValue::from(0.0).is_filled());
        assert!(!FieldValue::Number(f64::NAN).is_filled());
        assert!(FieldValue::from(-2.5).is_filled());
        assert!(!FieldValue::from(false).is_filled());
        assert!(FieldValue::from(true).is_filled());
        assert!(!FieldValue::List(vec![]).is_filled());
        assert!(FieldValue::List(vec!["a.pdf".into()]).is_filled());
        assert!(!FieldValue::Range(DateRange::default()).is_filled());
        assert!(
            FieldValue::Range(DateRange {
                start: Some("2025-01-01T00:00:00.000Z".into()),
                end: None,
            })
            .is_filled()
        );
    }

    #[test]
    fn form_values_survive_a_json_round_trip() {
        let mut values = FormValues::new();
        values.insert("buyerName".into(), "Ministry of Railways".into());
        values.insert("unitRate".into(), 1450.75.into());
        values.insert("rating".into(), 4.0.into());
        values.insert("termsAcceptance".into(), true.into());
        values.insert(
            "commitmentDate".into(),
            "2025-06-15T00:00:00.000Z".into(),
        );
        values.insert(
            "brochures".into(),
            vec!["catalogue.pdf".to_string(), "specs.pdf".to_string()].into(),
        );
        values.insert(
            "raWindowTime".into(),
            FieldValue::Range(DateRange {
                start: Some("2025-06-01T00:00:00.000Z".into()),
                end: Some("2025-06-02T00:00:00.000Z".into()),
            }),
        );

        let json = serde_json::to_string(&values).unwrap();
        let back: FormValues = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }

    #[test]
    fn plain_json_deserializes_into_expected_shapes() {
        let values: FormValues = serde_json::from_str(
            r#"{"a": "text", "b": 3, "c": false, "d": ["x"], "e": {"start": "s"}}"#,
        )
        .unwrap();
        assert_eq!(values["a"], FieldValue::from("text"));
        assert_eq!(values["b"], FieldValue::Number(3.0));
        assert_eq!(values["c"], FieldValue::Bool(false));
        assert_eq!(values["d"].as_list(), ["x".to_string()]);
        assert_eq!(values["e"].as_range().and_then(|r| r.start.as_deref()), Some("s"));
    }

    #[test]
    fn text_view_joins_lists() {
        let v = FieldValue::List(vec!["a".into(), "b".into()]);
        assert_eq!(v.as_text(), "a,b");
        assert_eq!(FieldValue::from(true).as_text(), "true");
    }
}
