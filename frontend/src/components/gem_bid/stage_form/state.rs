use common::form::StageForm;
use common::model::value::FormValues;
use common::registry::RegistryError;
use common::requests::StageDataResponse;

use super::props::StageRef;
use crate::components::helpers::compute_md5;

pub struct StageFormComponent {
    /// `None` until the stored values arrive.
    pub form: Option<StageForm>,
    pub loaded: bool,
    /// The last load failed; the view offers a retry.
    pub load_failed: bool,
    /// MD5 of the values as last loaded or saved.
    pub original_md5: Option<String>,
}

impl StageFormComponent {
    pub fn new() -> Self {
        Self {
            form: None,
            loaded: false,
            load_failed: false,
            original_md5: None,
        }
    }

    pub fn is_dirty(&self) -> bool {
        match (&self.form, &self.original_md5) {
            (Some(form), Some(original)) => *original != values_md5(form.values()),
            _ => false,
        }
    }

    /// Forgets the shown stage, before loading another one.
    pub fn clear(&mut self) {
        self.form = None;
        self.original_md5 = None;
        self.load_failed = false;
    }

    /// Installs stage data requested for `origin` when it is still the
    /// `current` stage. Replies for any other stage are ignored and `Ok(false)`
    /// is returned.
    pub fn accept_stage_data(
        &mut self,
        current: StageRef,
        origin: StageRef,
        data: StageDataResponse,
    ) -> Result<bool, RegistryError> {
        if origin != current {
            return Ok(false);
        }
        let form = StageForm::new(current.stage_number, data.values)?;
        self.original_md5 = Some(values_md5(form.values()));
        self.form = Some(form);
        self.load_failed = false;
        Ok(true)
    }
}

pub fn values_md5(values: &FormValues) -> String {
    compute_md5(&serde_json::to_string(values).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::value::FieldValue;

    fn data(pairs: &[(&str, FieldValue)]) -> StageDataResponse {
        StageDataResponse {
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            completion: 0.0,
        }
    }

    fn stage(stage_number: u8) -> StageRef {
        StageRef { bid_id: 7, stage_number }
    }

    #[test]
    fn late_reply_for_a_previous_stage_is_ignored() {
        let mut component = StageFormComponent::new();
        let financial = data(&[("unitRate", FieldValue::Number(120.5))]);
        let technical = data(&[("specificationMatch", FieldValue::Bool(true))]);

        assert!(component.accept_stage_data(stage(6), stage(6), financial).unwrap());
        assert!(!component.accept_stage_data(stage(6), stage(5), technical).unwrap());

        let form = component.form.as_ref().unwrap();
        assert_eq!(form.stage().stage_number, 6);
        assert_eq!(form.value("unitRate"), Some(&FieldValue::Number(120.5)));
        assert!(!component.is_dirty());
    }

    #[test]
    fn reply_for_another_bid_is_ignored() {
        let mut component = StageFormComponent::new();
        let other_bid = StageRef { bid_id: 8, stage_number: 6 };
        let reply = data(&[("unitRate", FieldValue::Number(1.0))]);
        assert!(!component.accept_stage_data(stage(6), other_bid, reply).unwrap());
        assert!(component.form.is_none());
    }

    #[test]
    fn accepted_data_clears_a_previous_load_failure() {
        let mut component = StageFormComponent::new();
        component.load_failed = true;
        assert!(component.accept_stage_data(stage(6), stage(6), data(&[])).unwrap());
        assert!(!component.load_failed);
    }
}
