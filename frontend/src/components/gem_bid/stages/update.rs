use common::requests::StageUpdateRequest;
use yew::prelude::*;

use crate::tops_sheet::yw_material_top_sheet::{close_top_sheet, open_top_sheet};

use super::messages::Msg;
use super::state::GemBidStagesComponent;
use super::{fetch_progress, init_stages, put_stage_update};

pub fn update(
    component: &mut GemBidStagesComponent,
    ctx: &Context<GemBidStagesComponent>,
    msg: Msg,
) -> bool {
    let props = ctx.props();
    let bid_id = props.bid.id;
    match msg {
        Msg::FetchProgress => {
            fetch_progress(ctx.link().clone(), bid_id);
            false
        }
        Msg::ProgressLoaded(origin, progress) => component.accept_progress(bid_id, origin, progress),
        Msg::InitStages => {
            init_stages(ctx.link().clone(), bid_id);
            false
        }
        Msg::SetViewMode(mode) => {
            props.on_view_mode_change.emit(mode);
            false
        }
        Msg::ToggleExpanded(stage_number) => {
            if !component.expanded.remove(&stage_number) {
                component.expanded.insert(stage_number);
            }
            true
        }
        Msg::OpenStageDialog(stage_number) => {
            let progress = component.progress_of(stage_number, props.bid.current_stage);
            component.selected_stage = Some(stage_number);
            component.dialog_status = progress.status;
            component.notes = progress.notes.unwrap_or_default();
            open_top_sheet(component.dialog_ref.clone());
            true
        }
        Msg::CloseDialog => {
            component.selected_stage = None;
            close_top_sheet(component.dialog_ref.clone());
            true
        }
        Msg::SetDialogStatus(status) => {
            component.dialog_status = status;
            true
        }
        Msg::SetNotes(notes) => {
            component.notes = notes;
            false
        }
        Msg::SubmitUpdate => {
            let Some(stage_number) = component.selected_stage else {
                return false;
            };
            let body = StageUpdateRequest {
                status: component.dialog_status,
                notes: Some(component.notes.clone()),
                assigned_to: None,
                checklist: None,
            };
            put_stage_update(ctx.link().clone(), bid_id, stage_number, body);
            false
        }
        Msg::FormStatusChange(stage_number, status) => {
            let body = StageUpdateRequest {
                status,
                notes: None,
                assigned_to: None,
                checklist: None,
            };
            put_stage_update(ctx.link().clone(), bid_id, stage_number, body);
            false
        }
        Msg::ToggleChecklistItem(stage_number, item) => {
            let progress = component.progress_of(stage_number, props.bid.current_stage);
            let mut checklist = progress.checklist;
            let done = checklist.get(&item).copied().unwrap_or(false);
            checklist.insert(item, !done);
            let body = StageUpdateRequest {
                status: progress.status,
                notes: None,
                assigned_to: None,
                checklist: Some(checklist),
            };
            put_stage_update(ctx.link().clone(), bid_id, stage_number, body);
            false
        }
        Msg::UpdateSucceeded(origin, progress) => {
            if origin != bid_id {
                return false;
            }
            if component.selected_stage == Some(progress.stage_number) {
                component.selected_stage = None;
                close_top_sheet(component.dialog_ref.clone());
            }
            component.record(progress);
            props.on_bid_changed.emit(());
            true
        }
    }
}
