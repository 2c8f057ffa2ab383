use serde::{Deserialize, Serialize};

/// The closed set of input kinds a bid form can carry.
///
/// Every variant maps to exactly one rendering strategy in the frontend and to
/// one value shape (see [`crate::model::value::FieldValue`]). The serialized form
/// is the lowercase variant name, which is what the REST API and the stored
/// configuration use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Dropdown,
    Numeric,
    Currency,
    Date,
    Datetime,
    Daterange,
    File,
    Image,
    Multifile,
    Checkbox,
    Rating,
    Autonumber,
    Lookup,
    Table,
    Verification,
    Structured,
}

impl FieldType {
    /// Field types whose description is part of the widget itself rather than
    /// a hint rendered below it.
    pub fn describes_itself(self) -> bool {
        matches!(self, FieldType::Checkbox | FieldType::Verification)
    }

    /// Field types that hold numbers.
    pub fn is_numeric(self) -> bool {
        matches!(self, FieldType::Numeric | FieldType::Currency)
    }
}

/// Kind of a single validation rule attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Required,
    Min,
    Max,
    Pattern,
}

/// A validation rule evaluated by the stage form controller.
///
/// - `Pattern` rules carry a regular expression in `value` and are tested
///   against the textual form of a filled value.
/// - `Min`/`Max` carry a number and bound numeric values, or the character
///   length of text values.
/// - `Required` is equivalent to setting `required` on the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(rename = "type")]
    pub kind: RuleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationRule {
    pub fn pattern(regex: &str, message: &str) -> Self {
        Self {
            kind: RuleKind::Pattern,
            value: Some(serde_json::Value::String(regex.to_string())),
            message: Some(message.to_string()),
        }
    }
}

/// Metadata describing one input field of a bid stage.
///
/// `key` is the unique registry key (e.g. `unitRate`) and is the key under
/// which the field's value is stored in a stage's form values. `name` is the
/// human label and is not unique across the registry (two fields are labelled
/// "Comments").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfiguration {
    pub key: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation: Vec<ValidationRule>,
}

impl FieldConfiguration {
    pub fn new(key: &str, name: &str, field_type: FieldType, category: &str) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            field_type,
            required: false,
            category: category.to_string(),
            description: None,
            placeholder: None,
            options: Vec::new(),
            validation: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|o| o.to_string()).collect();
        self
    }

    pub fn rule(mut self, rule: ValidationRule) -> Self {
        self.validation.push(rule);
        self
    }

    /// Whether the field must be filled, either through the flag or through a
    /// `required` rule.
    pub fn is_required(&self) -> bool {
        self.required
            || self
                .validation
                .iter()
                .any(|rule| rule.kind == RuleKind::Required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_uses_lowercase_names() {
        let json = serde_json::to_string(&FieldType::Daterange).unwrap();
        assert_eq!(json, "\"daterange\"");
        let parsed: FieldType = serde_json::from_str("\"multifile\"").unwrap();
        assert_eq!(parsed, FieldType::Multifile);
    }

    #[test]
    fn configuration_serializes_type_key() {
        let config = FieldConfiguration::new("pan", "PAN", FieldType::Text, "compliance")
            .rule(ValidationRule::pattern("^[A-Z]{5}[0-9]{4}[A-Z]$", "Invalid PAN format"));
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["validation"][0]["type"], "pattern");
        assert!(json.get("options").is_none());
    }

    #[test]
    fn required_rule_counts_as_required() {
        let config = FieldConfiguration::new("x", "X", FieldType::Text, "basic").rule(
            ValidationRule {
                kind: RuleKind::Required,
                value: None,
                message: None,
            },
        );
        assert!(config.is_required());
    }
}
