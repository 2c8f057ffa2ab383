use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::progress::StageStatus;
use crate::model::value::FormValues;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Request payload for `PUT /api/gem-bids/{id}/stages/{n}`.
/// Fields left out keep their stored value; `status` is always applied.
pub struct StageUpdateRequest {
    pub status: StageStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checklist: Option<BTreeMap<String, bool>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Query string of `GET /api/fields/search`.
pub struct FieldSearchRequest {
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Body of `GET`/`PUT /api/gem-bids/{id}/stages/{n}/data`: the stored values
/// of the stage and how complete they make it.
pub struct StageDataResponse {
    pub values: FormValues,
    pub completion: f64,
}
