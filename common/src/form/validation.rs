use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::{LazyLock, Mutex};

use crate::model::field::{FieldConfiguration, RuleKind, ValidationRule};
use crate::model::value::{FieldValue, FormValues};

/// Per-field error messages, keyed by field key.
pub type FieldErrors = BTreeMap<String, String>;

/// Compiled pattern rules, keyed by source. Invalid patterns are cached as
/// `None` so they are only rejected once.
static PATTERNS: LazyLock<Mutex<HashMap<String, Option<Regex>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn compiled(pattern: &str) -> Option<Regex> {
    let Ok(mut cache) = PATTERNS.lock() else {
        return Regex::new(pattern).ok();
    };
    cache
        .entry(pattern.to_string())
        .or_insert_with(|| Regex::new(pattern).ok())
        .clone()
}

fn rule_number(rule: &ValidationRule) -> Option<f64> {
    match rule.value.as_ref()? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Magnitude a min/max rule compares against: the number itself, or the
/// character length of text.
fn measured(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Number(n) => Some(*n),
        FieldValue::Text(s) => Some(s.chars().count() as f64),
        FieldValue::List(items) => Some(items.len() as f64),
        _ => None,
    }
}

/// Checks one filled value against one rule, returning the error message on
/// failure. Rules with an unusable `value` never fail.
fn check_rule(config: &FieldConfiguration, rule: &ValidationRule, value: &FieldValue) -> Option<String> {
    let failed = match rule.kind {
        RuleKind::Required => !value.is_filled(),
        RuleKind::Pattern => match rule.value.as_ref().and_then(|v| v.as_str()) {
            Some(pattern) => compiled(pattern).is_some_and(|re| !re.is_match(&value.as_text())),
            None => false,
        },
        RuleKind::Min => match (rule_number(rule), measured(value)) {
            (Some(bound), Some(actual)) => actual < bound,
            _ => false,
        },
        RuleKind::Max => match (rule_number(rule), measured(value)) {
            (Some(bound), Some(actual)) => actual > bound,
            _ => false,
        },
    };
    if !failed {
        return None;
    }

    Some(rule.message.clone().unwrap_or_else(|| match rule.kind {
        RuleKind::Required => format!("{} is required", config.name),
        RuleKind::Pattern => format!("Invalid {} format", config.name),
        RuleKind::Min => format!(
            "{} must be at least {}",
            config.name,
            rule_number(rule).unwrap_or_default()
        ),
        RuleKind::Max => format!(
            "{} must be at most {}",
            config.name,
            rule_number(rule).unwrap_or_default()
        ),
    }))
}

/// Validates `values` against `fields`.
///
/// A required field without a filled value fails with `"<name> is required"`.
/// Filled values are then run through every rule of their configuration; when
/// several rules fail, the last failure is reported.
pub fn validate_fields(fields: &[&FieldConfiguration], values: &FormValues) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for config in fields {
        let value = values.get(&config.key).filter(|v| v.is_filled());

        let Some(value) = value else {
            if config.is_required() {
                errors.insert(config.key.clone(), format!("{} is required", config.name));
            }
            continue;
        };

        for rule in &config.validation {
            if let Some(message) = check_rule(config, rule, value) {
                errors.insert(config.key.clone(), message);
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::FieldType;
    use crate::registry::fields::lookup;
    use serde_json::json;

    fn values(pairs: &[(&str, FieldValue)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn patterns_compile_once_and_bad_patterns_never_fail() {
        let first = compiled("^[0-9]{6}$").unwrap();
        let second = compiled("^[0-9]{6}$").unwrap();
        assert_eq!(first.as_str(), second.as_str());
        assert!(second.is_match("110001"));
        assert!(compiled("([unclosed").is_none());

        let config = FieldConfiguration::new("pin", "PIN", FieldType::Text, "general")
            .rule(ValidationRule::pattern("([unclosed", "Broken"));
        let errors = validate_fields(&[&config], &values(&[("pin", FieldValue::from("abc"))]));
        assert!(errors.is_empty());
    }

    #[test]
    fn required_field_fails_until_truthy() {
        let terms = lookup("termsAcceptance").unwrap();
        let fields = [terms];

        let errors = validate_fields(&fields, &FormValues::new());
        assert_eq!(
            errors.get("termsAcceptance").map(String::as_str),
            Some("Terms Acceptance is required")
        );

        let errors = validate_fields(&fields, &values(&[("termsAcceptance", false.into())]));
        assert!(errors.contains_key("termsAcceptance"));

        let errors = validate_fields(&fields, &values(&[("termsAcceptance", true.into())]));
        assert!(errors.is_empty());
    }

    #[test]
    fn pan_pattern_uses_custom_message() {
        let fields = [lookup("pan").unwrap()];
        let errors = validate_fields(&fields, &values(&[("pan", "abcde1234f".into())]));
        assert_eq!(errors["pan"], "Invalid PAN format");

        let errors = validate_fields(&fields, &values(&[("pan", "ABCDE1234F".into())]));
        assert!(errors.is_empty());
    }

    #[test]
    fn gst_pattern_accepts_valid_gstin() {
        let fields = [lookup("gst").unwrap()];
        let errors = validate_fields(&fields, &values(&[("gst", "27AAPFU0939F1ZV".into())]));
        assert!(errors.is_empty());
        let errors = validate_fields(&fields, &values(&[("gst", "27AAPFU0939F1Z".into())]));
        assert_eq!(errors["gst"], "Invalid GST format");
    }

    #[test]
    fn empty_optional_fields_skip_rules() {
        let fields = [lookup("pan").unwrap()];
        assert!(validate_fields(&fields, &values(&[("pan", "".into())])).is_empty());
    }

    #[test]
    fn pattern_without_message_uses_default() {
        let config = FieldConfiguration::new("code", "Code", FieldType::Text, "basic").rule(ValidationRule {
            kind: RuleKind::Pattern,
            value: Some(json!("^[0-9]+$")),
            message: None,
        });
        let errors = validate_fields(&[&config], &values(&[("code", "12a".into())]));
        assert_eq!(errors["code"], "Invalid Code format");
    }

    #[test]
    fn min_and_max_bound_numbers_and_text_length() {
        let config = FieldConfiguration::new("rate", "Rate", FieldType::Numeric, "pricing")
            .rule(ValidationRule {
                kind: RuleKind::Min,
                value: Some(json!(10)),
                message: None,
            })
            .rule(ValidationRule {
                kind: RuleKind::Max,
                value: Some(json!("100")),
                message: Some("Too high".into()),
            });
        let fields = [&config];
        assert_eq!(
            validate_fields(&fields, &values(&[("rate", 5.0.into())]))["rate"],
            "Rate must be at least 10"
        );
        assert_eq!(
            validate_fields(&fields, &values(&[("rate", 500.0.into())]))["rate"],
            "Too high"
        );
        assert!(validate_fields(&fields, &values(&[("rate", 50.0.into())])).is_empty());
        assert!(validate_fields(&fields, &values(&[("rate", "abcdefghijkl".into())])).is_empty());
    }

    #[test]
    fn every_registry_pattern_compiles() {
        for config in crate::registry::fields::all() {
            for rule in &config.validation {
                if let (RuleKind::Pattern, Some(pattern)) =
                    (rule.kind, rule.value.as_ref().and_then(|v| v.as_str()))
                {
                    assert!(Regex::new(pattern).is_ok(), "bad pattern on {}", config.key);
                }
            }
        }
    }
}
