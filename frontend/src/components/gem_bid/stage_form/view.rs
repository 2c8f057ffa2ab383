use common::form::is_editable;
use common::model::progress::StatusAction;
use common::registry::fields::category_label;
use yew::prelude::*;

use crate::components::forms::dynamic_field::DynamicField;

use super::messages::Msg;
use super::state::StageFormComponent;

pub fn view(component: &StageFormComponent, ctx: &Context<StageFormComponent>) -> Html {
    let link = ctx.link();
    let Some(form) = component.form.as_ref() else {
        if component.load_failed {
            return html! {
                <div class="stage-form load-failed">
                    <p>{"Failed to load stage data"}</p>
                    <button class="btn-outline" onclick={link.callback(|_| Msg::Retry)}>
                        <i class="material-icons">{"refresh"}</i>
                        {"Retry"}
                    </button>
                </div>
            };
        }
        return html! { <div class="stage-form loading">{"Loading stage data..."}</div> };
    };
    let props = ctx.props();
    let editable = is_editable(props.status);
    let completion = form.completion_percent();
    let groups = form.grouped_fields();
    let dirty = component.is_dirty();

    html! {
        <div class="stage-form">
            <div class="stage-form-header">
                <div>
                    <h4>{ &form.stage().stage_name }</h4>
                    <p class="muted">{ &form.stage().description }</p>
                </div>
                <div class="status-actions">
                    { for StatusAction::ALL.iter().map(|&action| html! {
                        <button
                            class={classes!("btn-outline", (props.status == action.target()).then_some("active"))}
                            disabled={!action.is_enabled(props.status, completion)}
                            onclick={link.callback(move |_| Msg::ChangeStatus(action))}
                        >
                            { action.label() }
                        </button>
                    }) }
                </div>
            </div>

            <div class="completion">
                <div class="completion-label">
                    <span>{"Completion"}</span>
                    <span>{ format!("{:.0}%", completion) }</span>
                </div>
                <div class="progress-bar">
                    <div class="progress-fill" style={format!("width: {:.1}%;", completion)} />
                </div>
            </div>

            if groups.is_empty() {
                <div class="empty-state">
                    <i class="material-icons">{"inbox"}</i>
                    <p>{"No fields configured for this stage"}</p>
                </div>
            }
            { for groups.iter().map(|(category, fields)| html! {
                <section class="field-group">
                    <h5>{ category_label(category) }</h5>
                    <div class="field-grid">
                        { for fields.iter().map(|&config| {
                            let key = config.key.clone();
                            html! {
                                <DynamicField
                                    key={config.key.clone()}
                                    config={config}
                                    value={form.value(&config.key).cloned()}
                                    on_change={link.callback(move |value| Msg::SetValue(key.clone(), value))}
                                    error={form.error(&config.key).map(|e| AttrValue::from(e.to_string()))}
                                    disabled={!editable}
                                />
                            }
                        }) }
                    </div>
                </section>
            }) }

            <div class="stage-form-footer">
                <span class="muted">
                    { format!("{} fields • {} categories", form.fields().len(), groups.len()) }
                    if dirty {
                        <span class="unsaved-dot" title="Unsaved changes" />
                    }
                </span>
                <div>
                    <button class="btn-outline" disabled={!dirty} onclick={link.callback(|_| Msg::Reset)}>
                        {"Reset"}
                    </button>
                    <button class="btn-primary" disabled={!editable} onclick={link.callback(|_| Msg::Save)}>
                        <i class="material-icons">{"save"}</i>
                        {"Save"}
                    </button>
                </div>
            </div>
        </div>
    }
}
