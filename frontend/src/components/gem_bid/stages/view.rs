//! Kanban, list and timeline renderings of the bid lifecycle.

use common::form::normalize::format_datetime;
use common::model::progress::{overall_percent, stages_by_status, StageProgress, StageStatus};
use common::model::stage::{Stage, ViewMode};
use common::registry::stages::all_stages;
use yew::html::Scope;
use yew::prelude::*;

use crate::components::gem_bid::stage_form::StageFormComponent;
use crate::components::helpers::render_notes;
use crate::tops_sheet::yw_material_top_sheet::YwMaterialTopSheet;
use crate::workspace_grid::WorkspaceGrid;

use super::messages::Msg;
use super::state::GemBidStagesComponent;

pub fn view(component: &GemBidStagesComponent, ctx: &Context<GemBidStagesComponent>) -> Html {
    let link = ctx.link();
    let props = ctx.props();

    html! {
        <div class="gem-bid-stages">
            { build_header(component, ctx) }
            {
                match props.view_mode {
                    ViewMode::Kanban => build_kanban(component, ctx),
                    ViewMode::List => build_list(component, ctx),
                    ViewMode::Timeline => build_timeline(component, ctx),
                }
            }
            { build_update_dialog(component, link) }
        </div>
    }
}

fn build_header(component: &GemBidStagesComponent, ctx: &Context<GemBidStagesComponent>) -> Html {
    let link = ctx.link();
    let props = ctx.props();
    let overall = overall_percent(&component.progress);

    html! {
        <div class="stages-header">
            <div class="overall">
                <div class="completion-label">
                    <span>{ format!("Stage {} of {}", props.bid.current_stage, all_stages().len()) }</span>
                    <span>{ format!("{:.0}% complete", overall) }</span>
                </div>
                <div class="progress-bar">
                    <div class="progress-fill" style={format!("width: {:.1}%;", overall)} />
                </div>
            </div>
            <div class="view-modes">
                { for ViewMode::ALL.iter().map(|&mode| html! {
                    <button
                        class={classes!("tab-btn", (props.view_mode == mode).then_some("active"))}
                        onclick={link.callback(move |_| Msg::SetViewMode(mode))}
                    >
                        { mode.label() }
                    </button>
                }) }
                if component.progress.is_empty() {
                    <button class="btn-outline" onclick={link.callback(|_| Msg::InitStages)}>
                        {"Initialize Stages"}
                    </button>
                }
            </div>
        </div>
    }
}

fn status_badge(status: StageStatus) -> Html {
    html! {
        <span class={classes!("status-badge", status.as_str())}>{ status.label() }</span>
    }
}

fn build_kanban(component: &GemBidStagesComponent, ctx: &Context<GemBidStagesComponent>) -> Html {
    let link = ctx.link();
    let columns = stages_by_status(
        all_stages(),
        &component.progress,
        ctx.props().bid.current_stage,
    );

    html! {
        <WorkspaceGrid columns={columns.len()}>
            { for columns.into_iter().map(|(status, stages)| html! {
                <div class={classes!("kanban-column", status.as_str())}>
                    <div class="kanban-column-header">
                        <span>{ status.label() }</span>
                        <span class="count">{ stages.len() }</span>
                    </div>
                    { for stages.into_iter().map(|stage| {
                        let number = stage.stage_number;
                        html! {
                            <div class="kanban-card" onclick={link.callback(move |_| Msg::OpenStageDialog(number))}>
                                <div class="stage-number">{ format!("Stage {}", number) }</div>
                                <div class="stage-name">{ &stage.stage_name }</div>
                                <div class="portal-section muted">{ &stage.portal_section }</div>
                            </div>
                        }
                    }) }
                </div>
            }) }
        </WorkspaceGrid>
    }
}

fn build_list(component: &GemBidStagesComponent, ctx: &Context<GemBidStagesComponent>) -> Html {
    let current_stage = ctx.props().bid.current_stage;
    html! {
        <div class="stage-list">
            { for all_stages().iter().map(|stage| {
                let progress = component.progress_of(stage.stage_number, current_stage);
                build_list_row(component, ctx, stage, &progress)
            }) }
        </div>
    }
}

fn build_list_row(
    component: &GemBidStagesComponent,
    ctx: &Context<GemBidStagesComponent>,
    stage: &'static Stage,
    progress: &StageProgress,
) -> Html {
    let link = ctx.link();
    let bid_id = ctx.props().bid.id;
    let number = stage.stage_number;
    let expanded = component.expanded.contains(&number);

    html! {
        <div class={classes!("stage-row", expanded.then_some("expanded"))}>
            <div class="stage-row-header">
                <span class="stage-number">{ number }</span>
                <div class="stage-title">
                    <span class="stage-name">{ &stage.stage_name }</span>
                    <span class="muted">{ &stage.description }</span>
                </div>
                { status_badge(progress.status) }
                <button class="icon-btn" title="Update stage" onclick={link.callback(move |_| Msg::OpenStageDialog(number))}>
                    <i class="material-icons">{"edit"}</i>
                </button>
                <button class="icon-btn" title="Details" onclick={link.callback(move |_| Msg::ToggleExpanded(number))}>
                    <i class="material-icons">{ if expanded { "expand_less" } else { "expand_more" } }</i>
                </button>
            </div>
            if expanded {
                <div class="stage-row-body">
                    <div class="checklist">
                        <h5>{"Checklist"}</h5>
                        { for stage.checklist.iter().map(|item| {
                            let done = progress.checklist.get(item).copied().unwrap_or(false);
                            let item_key = item.clone();
                            html! {
                                <label class="checklist-item">
                                    <input
                                        type="checkbox"
                                        checked={done}
                                        onchange={link.callback(move |_| Msg::ToggleChecklistItem(number, item_key.clone()))}
                                    />
                                    { item }
                                </label>
                            }
                        }) }
                    </div>
                    <div class="portal-section">
                        <i class="material-icons">{"location_on"}</i>
                        <span>{ format!("GeM Portal: {}", stage.portal_section) }</span>
                    </div>
                    if let Some(notes) = progress.notes.as_ref().filter(|n| !n.is_empty()) {
                        <div class="stage-notes">
                            { Html::from_html_unchecked(render_notes(notes)) }
                        </div>
                    }
                    <StageFormComponent
                        bid_id={bid_id}
                        stage_number={number}
                        status={progress.status}
                        on_status_change={link.callback(move |status| Msg::FormStatusChange(number, status))}
                    />
                </div>
            }
        </div>
    }
}

fn build_timeline(component: &GemBidStagesComponent, ctx: &Context<GemBidStagesComponent>) -> Html {
    let link = ctx.link();
    let current_stage = ctx.props().bid.current_stage;

    html! {
        <div class="timeline">
            { for all_stages().iter().map(|stage| {
                let progress = component.progress_of(stage.stage_number, current_stage);
                let number = stage.stage_number;
                let started = progress.started_at.and_then(|t| format_datetime(&t.to_rfc3339()));
                let completed = progress.completed_at.and_then(|t| format_datetime(&t.to_rfc3339()));
                html! {
                    <div class={classes!("timeline-item", progress.status.as_str())}>
                        <div class="timeline-marker">{ number }</div>
                        <div class="timeline-content" onclick={link.callback(move |_| Msg::OpenStageDialog(number))}>
                            <div class="timeline-title">
                                <span class="stage-name">{ &stage.stage_name }</span>
                                { status_badge(progress.status) }
                            </div>
                            if let Some(started) = started {
                                <div class="muted">{ format!("Started: {}", started) }</div>
                            }
                            if let Some(completed) = completed {
                                <div class="muted">{ format!("Completed: {}", completed) }</div>
                            }
                        </div>
                    </div>
                }
            }) }
        </div>
    }
}

fn build_update_dialog(component: &GemBidStagesComponent, link: &Scope<GemBidStagesComponent>) -> Html {
    let title = component
        .selected_stage
        .and_then(|n| all_stages().iter().find(|s| s.stage_number == n))
        .map(|stage| format!("Update Stage {}: {}", stage.stage_number, stage.stage_name))
        .unwrap_or_else(|| "Update Stage".to_string());

    html! {
        <YwMaterialTopSheet
            node_ref={component.dialog_ref.clone()}
            title={title}
            on_close={link.callback(|_| Msg::CloseDialog)}
        >
            <div class="stage-dialog">
                <label for="stage-status">{"Status"}</label>
                <select
                    id="stage-status"
                    onchange={link.callback(|e: Event| {
                        let value = e.target_unchecked_into::<web_sys::HtmlSelectElement>().value();
                        let status = StageStatus::ALL
                            .into_iter()
                            .find(|s| s.as_str() == value)
                            .unwrap_or_default();
                        Msg::SetDialogStatus(status)
                    })}
                >
                    { for StageStatus::ALL.iter().map(|&status| html! {
                        <option value={status.as_str()} selected={status == component.dialog_status}>
                            { status.label() }
                        </option>
                    }) }
                </select>
                <label for="stage-notes">{"Notes"}</label>
                <textarea
                    id="stage-notes"
                    rows="4"
                    placeholder="Add notes about this stage..."
                    value={component.notes.clone()}
                    oninput={link.callback(|e: InputEvent| {
                        Msg::SetNotes(e.target_unchecked_into::<web_sys::HtmlTextAreaElement>().value())
                    })}
                />
                <div class="dialog-actions">
                    <button class="btn-outline" onclick={link.callback(|_| Msg::CloseDialog)}>{"Cancel"}</button>
                    <button class="btn-primary" onclick={link.callback(|_| Msg::SubmitUpdate)}>{"Update Stage"}</button>
                </div>
            </div>
        </YwMaterialTopSheet>
    }
}
