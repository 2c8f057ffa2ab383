//! Stage form controller.
//!
//! [`StageForm`] owns the value and error maps of one stage of one bid. It
//! resolves the stage's field keys through the field registry, validates,
//! and reports how much of the stage has been filled in. It never persists
//! anything; callers submit [`StageForm::values`] wholesale.

pub mod normalize;
pub mod validation;

use crate::model::field::FieldConfiguration;
use crate::model::progress::StageStatus;
use crate::model::stage::Stage;
use crate::model::value::{FieldValue, FormValues};
use crate::registry::RegistryError;
use crate::registry::stages::{get_stage, resolve_fields};
use validation::{FieldErrors, validate_fields};

pub struct StageForm {
    stage: &'static Stage,
    fields: Vec<&'static FieldConfiguration>,
    initial: FormValues,
    values: FormValues,
    errors: FieldErrors,
}

impl StageForm {
    pub fn new(stage_number: u8, initial: FormValues) -> Result<Self, RegistryError> {
        Ok(Self::for_stage(get_stage(stage_number)?, initial))
    }

    pub fn for_stage(stage: &'static Stage, initial: FormValues) -> Self {
        Self {
            stage,
            fields: resolve_fields(stage),
            values: initial.clone(),
            initial,
            errors: FieldErrors::new(),
        }
    }

    pub fn stage(&self) -> &'static Stage {
        self.stage
    }

    pub fn fields(&self) -> &[&'static FieldConfiguration] {
        &self.fields
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, key: &str) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }

    /// Stores `value` under `key` and clears any error shown for it.
    pub fn set_value(&mut self, key: &str, value: FieldValue) {
        self.values.insert(key.to_string(), value);
        self.errors.remove(key);
    }

    /// Runs validation over the resolved fields, replacing the error map.
    /// Returns `true` when there are no errors.
    pub fn validate(&mut self) -> bool {
        self.errors = validate_fields(&self.fields, &self.values);
        self.errors.is_empty()
    }

    pub fn filled_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|config| {
                self.values
                    .get(&config.key)
                    .is_some_and(FieldValue::is_filled)
            })
            .count()
    }

    /// Filled fields as a percentage of resolved fields; `0` for a stage
    /// without fields.
    pub fn completion_percent(&self) -> f64 {
        if self.fields.is_empty() {
            return 0.0;
        }
        self.filled_count() as f64 / self.fields.len() as f64 * 100.0
    }

    /// Whether the stage may be marked completed.
    pub fn can_complete(&self) -> bool {
        !self.fields.is_empty() && self.filled_count() == self.fields.len()
    }

    /// Whether the values differ from what the form was opened with.
    pub fn is_dirty(&self) -> bool {
        self.values != self.initial
    }

    /// Restores the initial values and clears errors.
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.errors.clear();
    }

    /// Makes the current values the new baseline, after a successful save.
    pub fn mark_saved(&mut self) {
        self.initial = self.values.clone();
    }

    /// Fields grouped by category. Groups appear in the order their first
    /// field appears in the stage.
    pub fn grouped_fields(&self) -> Vec<(&'static str, Vec<&'static FieldConfiguration>)> {
        let mut groups: Vec<(&'static str, Vec<&'static FieldConfiguration>)> = Vec::new();
        for &config in &self.fields {
            let category = config.category.as_str();
            match groups.iter().position(|(c, _)| *c == category) {
                Some(index) => groups[index].1.push(config),
                None => groups.push((category, vec![config])),
            }
        }
        groups
    }
}

/// Fields are read-only once their stage is completed.
pub fn is_editable(status: StageStatus) -> bool {
    status != StageStatus::Completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::normalize::normalize_numeric;
    use crate::model::progress::StatusAction;
    use crate::registry::stages::all_stages;

    #[test]
    fn financial_stage_with_unit_rate_is_a_quarter_done() {
        let mut form = StageForm::new(6, FormValues::new()).unwrap();
        assert_eq!(form.completion_percent(), 0.0);

        form.set_value("unitRate", FieldValue::Number(normalize_numeric("1200")));
        assert_eq!(form.completion_percent(), 25.0);
        assert!(!form.can_complete());
        assert!(!StatusAction::Complete.is_enabled(StageStatus::InProgress, form.completion_percent()));
    }

    #[test]
    fn non_numeric_unit_rate_stores_zero_and_stays_unfilled() {
        let mut form = StageForm::new(6, FormValues::new()).unwrap();
        form.set_value("unitRate", FieldValue::Number(normalize_numeric("twelve")));
        assert_eq!(form.value("unitRate"), Some(&FieldValue::Number(0.0)));
        assert_eq!(form.completion_percent(), 0.0);
    }

    #[test]
    fn completion_reaches_100_only_when_every_field_is_filled() {
        for stage in all_stages() {
            let mut form = StageForm::for_stage(stage, FormValues::new());
            let keys: Vec<String> = form.fields().iter().map(|c| c.key.clone()).collect();
            for (i, key) in keys.iter().enumerate() {
                assert!(!form.can_complete(), "stage {} complete early", stage.stage_number);
                form.set_value(key, FieldValue::from("x"));
                let expected = (i + 1) as f64 / keys.len() as f64 * 100.0;
                assert!((form.completion_percent() - expected).abs() < 1e-9);
            }
            assert_eq!(form.completion_percent(), 100.0);
            assert!(form.can_complete());
        }
    }

    #[test]
    fn stage_without_fields_reports_zero() {
        let stage = Box::leak(Box::new(Stage {
            stage_number: 99,
            stage_name: "Empty".into(),
            description: String::new(),
            field_keys: vec!["unknownKey".into()],
            checklist: vec![],
            portal_section: String::new(),
        }));
        let form = StageForm::for_stage(stage, FormValues::new());
        assert!(form.fields().is_empty());
        assert_eq!(form.completion_percent(), 0.0);
        assert!(!form.can_complete());
        assert!(form.grouped_fields().is_empty());
    }

    #[test]
    fn setting_a_value_clears_its_error() {
        let mut form = StageForm::new(5, FormValues::new()).unwrap();
        assert!(!form.validate());
        assert_eq!(form.error("termsAcceptance"), Some("Terms Acceptance is required"));

        form.set_value("termsAcceptance", true.into());
        assert_eq!(form.error("termsAcceptance"), None);
        assert!(form.validate());
    }

    #[test]
    fn groups_follow_first_appearance() {
        let form = StageForm::new(4, FormValues::new()).unwrap();
        let categories: Vec<&str> = form.grouped_fields().iter().map(|(c, _)| *c).collect();
        assert_eq!(
            categories,
            vec!["technical", "documents", "compliance", "qualification", "certification", "marketing"]
        );
        let compliance = &form.grouped_fields()[2].1;
        assert_eq!(compliance.len(), 2);
    }

    #[test]
    fn reset_restores_initial_values() {
        let mut initial = FormValues::new();
        initial.insert("grn".into(), "GRN-1".into());
        let mut form = StageForm::new(10, initial.clone()).unwrap();

        form.set_value("grn", "GRN-2".into());
        assert!(form.is_dirty());
        form.reset();
        assert_eq!(form.values(), &initial);
        assert!(!form.is_dirty());

        form.set_value("grn", "GRN-3".into());
        form.mark_saved();
        assert!(!form.is_dirty());
    }

    #[test]
    fn completed_stages_are_read_only() {
        assert!(is_editable(StageStatus::Pending));
        assert!(is_editable(StageStatus::Skipped));
        assert!(!is_editable(StageStatus::Completed));
    }

    #[test]
    fn unknown_stage_is_an_error() {
        assert!(matches!(
            StageForm::new(20, FormValues::new()),
            Err(RegistryError::UnknownStage(20))
        ));
    }
}
