use common::model::progress::StatusAction;
use common::model::value::FieldValue;
use common::requests::StageDataResponse;

use super::props::StageRef;

pub enum Msg {
    Loaded(StageRef, StageDataResponse),
    LoadFailed(StageRef),
    Retry,
    SetValue(String, FieldValue),
    Save,
    SaveSucceeded(StageRef, StageDataResponse),
    Reset,
    ChangeStatus(StatusAction),
}
