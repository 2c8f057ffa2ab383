//! Message handling for the stage form.
//!
//! Saving validates first and only sends the values when every field passes.
//! Replies are tagged with the bid and stage they were requested for, and a
//! reply for anything but the stage on screen is dropped. A failed load
//! leaves a retry button in place of the form.

use common::form::StageForm;
use common::model::progress::StatusAction;
use common::requests::StageDataResponse;
use gloo_net::http::Request;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::helpers::{set_window_dirty_flag, show_toast};

use super::messages::Msg;
use super::props::StageRef;
use super::state::StageFormComponent;
use super::{load_stage_data, stage_data_url};

pub fn update(
    component: &mut StageFormComponent,
    ctx: &Context<StageFormComponent>,
    msg: Msg,
) -> bool {
    let props = ctx.props();
    match msg {
        Msg::Loaded(origin, data) => install(component, props.stage_ref(), origin, data),
        Msg::LoadFailed(origin) => {
            if origin != props.stage_ref() {
                return false;
            }
            show_toast("Failed to load stage data");
            component.load_failed = true;
            true
        }
        Msg::Retry => {
            component.clear();
            load_stage_data(ctx.link().clone(), props.stage_ref());
            true
        }
        Msg::SetValue(key, value) => {
            let Some(form) = component.form.as_mut() else {
                return false;
            };
            form.set_value(&key, value);
            set_window_dirty_flag(component.is_dirty());
            true
        }
        Msg::Save => {
            let Some(form) = component.form.as_mut() else {
                return false;
            };
            if !form.validate() {
                show_toast("Please fix the errors before saving");
                return true;
            }

            let stage_name = form.stage().stage_name.clone();
            let origin = props.stage_ref();
            let url = stage_data_url(origin.bid_id, origin.stage_number);
            let request = match Request::put(&url).json(form.values()) {
                Ok(request) => request,
                Err(err) => {
                    gloo_console::error!(format!("Could not encode stage data: {}", err));
                    show_toast("Failed to save stage data");
                    return true;
                }
            };
            let link = ctx.link().clone();
            spawn_local(async move {
                match request.send().await {
                    Ok(resp) if resp.ok() => match resp.json::<StageDataResponse>().await {
                        Ok(data) => {
                            link.send_message(Msg::SaveSucceeded(origin, data));
                            show_toast(&format!("{} data has been saved successfully", stage_name));
                        }
                        Err(_) => show_toast("Failed to save stage data"),
                    },
                    _ => show_toast("Failed to save stage data"),
                }
            });
            true
        }
        // The server may have filled autonumbers, so its values win.
        Msg::SaveSucceeded(origin, data) => install(component, props.stage_ref(), origin, data),
        Msg::Reset => {
            if let Some(form) = component.form.as_mut() {
                form.reset();
            }
            set_window_dirty_flag(component.is_dirty());
            true
        }
        Msg::ChangeStatus(action) => {
            let completion = component
                .form
                .as_ref()
                .map_or(0.0, StageForm::completion_percent);
            if action.is_enabled(props.status, completion) {
                props.on_status_change.emit(action.target());
            } else if action == StatusAction::Complete {
                show_toast("Fill in every field before completing this stage");
            }
            false
        }
    }
}

fn install(
    component: &mut StageFormComponent,
    current: StageRef,
    origin: StageRef,
    data: StageDataResponse,
) -> bool {
    match component.accept_stage_data(current, origin, data) {
        Ok(true) => {
            set_window_dirty_flag(false);
            true
        }
        Ok(false) => false,
        Err(err) => {
            gloo_console::error!(err.to_string());
            component.clear();
            component.load_failed = true;
            true
        }
    }
}
