use common::model::progress::{StageProgress, StageStatus};
use common::model::stage::ViewMode;

pub enum Msg {
    FetchProgress,
    /// Progress fetched for the given bid.
    ProgressLoaded(i64, Vec<StageProgress>),
    InitStages,
    SetViewMode(ViewMode),
    ToggleExpanded(u8),
    OpenStageDialog(u8),
    CloseDialog,
    SetDialogStatus(StageStatus),
    SetNotes(String),
    SubmitUpdate,
    /// Status requested from an embedded stage form.
    FormStatusChange(u8, StageStatus),
    ToggleChecklistItem(u8, String),
    UpdateSucceeded(i64, StageProgress),
}
