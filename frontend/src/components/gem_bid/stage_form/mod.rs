//! Form for one stage of one bid.
//!
//! Loads the stored values from `/api/gem-bids/{id}/stages/{n}/data`, renders
//! every resolved field through [`DynamicField`](crate::components::forms::dynamic_field::DynamicField)
//! grouped by category, validates before saving and tracks unsaved changes
//! through an MD5 of the serialized values.

use common::requests::StageDataResponse;
use gloo_net::http::Request;
use yew::html::Scope;
use yew::platform::spawn_local;
use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::{StageFormProps, StageRef};
pub use state::StageFormComponent;

impl Component for StageFormComponent {
    type Message = Msg;
    type Properties = StageFormProps;

    fn create(_ctx: &Context<Self>) -> Self {
        StageFormComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        if props.stage_ref() != old_props.stage_ref() {
            self.clear();
            load_stage_data(ctx.link().clone(), props.stage_ref());
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            load_stage_data(ctx.link().clone(), ctx.props().stage_ref());
        }
    }
}

pub fn stage_data_url(bid_id: i64, stage_number: u8) -> String {
    format!("/api/gem-bids/{}/stages/{}/data", bid_id, stage_number)
}

fn load_stage_data(link: Scope<StageFormComponent>, stage: StageRef) {
    spawn_local(async move {
        let response = Request::get(&stage_data_url(stage.bid_id, stage.stage_number))
            .send()
            .await;
        match response {
            Ok(resp) if resp.ok() => match resp.json::<StageDataResponse>().await {
                Ok(data) => link.send_message(Msg::Loaded(stage, data)),
                Err(err) => {
                    gloo_console::error!(format!("Malformed stage data: {}", err));
                    link.send_message(Msg::LoadFailed(stage));
                }
            },
            _ => link.send_message(Msg::LoadFailed(stage)),
        }
    });
}
