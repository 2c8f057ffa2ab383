use common::model::field::FieldConfiguration;
use common::model::value::FieldValue;
use yew::prelude::*;

/// Properties of one rendered field.
///
/// The widget never stores the value itself: it shows `value`, reports every
/// interaction through `on_change` with an already-normalized [`FieldValue`],
/// and shows `error` when the parent supplies one.
#[derive(Properties, PartialEq, Clone)]
pub struct DynamicFieldProps {
    pub config: &'static FieldConfiguration,
    #[prop_or_default]
    pub value: Option<FieldValue>,
    pub on_change: Callback<FieldValue>,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub disabled: bool,
}
