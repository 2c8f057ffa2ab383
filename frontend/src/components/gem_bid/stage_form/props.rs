use common::model::progress::StageStatus;
use yew::prelude::*;

/// Properties of the form for one stage of one bid.
///
/// The form owns its values but not the stage status: status buttons report
/// the requested status through `on_status_change` and the parent persists it
/// and passes the new `status` back down.
#[derive(Properties, PartialEq, Clone)]
pub struct StageFormProps {
    pub bid_id: i64,
    pub stage_number: u8,
    pub status: StageStatus,
    pub on_status_change: Callback<StageStatus>,
}

/// Which stage of which bid a request was made for. Responses carry it so a
/// reply for a stage that is no longer shown can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageRef {
    pub bid_id: i64,
    pub stage_number: u8,
}

impl StageFormProps {
    pub fn stage_ref(&self) -> StageRef {
        StageRef {
            bid_id: self.bid_id,
            stage_number: self.stage_number,
        }
    }
}
