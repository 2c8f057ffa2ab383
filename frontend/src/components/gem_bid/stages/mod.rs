//! Lifecycle view of one bid: the 14 stages as a kanban board, an expandable
//! list or a timeline, plus the dialog used to change a stage's status and
//! notes.
//!
//! Progress is fetched on first render and then polled every 5 seconds so
//! changes made in another tab show up without a reload.

use common::model::progress::StageProgress;
use common::requests::StageUpdateRequest;
use gloo_net::http::Request;
use gloo_timers::callback::Interval;
use yew::html::Scope;
use yew::platform::spawn_local;
use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

use crate::components::helpers::show_toast;
pub use messages::Msg;
pub use props::GemBidStagesProps;
pub use state::GemBidStagesComponent;

const POLL_INTERVAL_MS: u32 = 5000;

impl Component for GemBidStagesComponent {
    type Message = Msg;
    type Properties = GemBidStagesProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut component = GemBidStagesComponent::new();
        let link = ctx.link().clone();
        component.poller = Some(Interval::new(POLL_INTERVAL_MS, move || {
            link.send_message(Msg::FetchProgress)
        }));
        component
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().bid.id != old_props.bid.id {
            self.progress.clear();
            self.expanded.clear();
            self.selected_stage = None;
            ctx.link().send_message(Msg::FetchProgress);
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            ctx.link().send_message(Msg::FetchProgress);
        }
    }
}

fn stages_url(bid_id: i64) -> String {
    format!("/api/gem-bids/{}/stages", bid_id)
}

pub fn fetch_progress(link: Scope<GemBidStagesComponent>, bid_id: i64) {
    spawn_local(async move {
        match Request::get(&stages_url(bid_id)).send().await {
            Ok(resp) if resp.ok() => match resp.json::<Vec<StageProgress>>().await {
                Ok(progress) => link.send_message(Msg::ProgressLoaded(bid_id, progress)),
                Err(err) => gloo_console::error!(format!("Malformed stage progress: {}", err)),
            },
            Ok(resp) => gloo_console::warn!(format!("Stage progress request failed: {}", resp.status())),
            Err(err) => gloo_console::warn!(format!("Stage progress request failed: {}", err)),
        }
    });
}

pub fn init_stages(link: Scope<GemBidStagesComponent>, bid_id: i64) {
    spawn_local(async move {
        match Request::post(&stages_url(bid_id)).send().await {
            Ok(resp) if resp.ok() => match resp.json::<Vec<StageProgress>>().await {
                Ok(progress) => {
                    link.send_message(Msg::ProgressLoaded(bid_id, progress));
                    show_toast("Stages initialized");
                }
                Err(_) => show_toast("Failed to initialize stages"),
            },
            _ => show_toast("Failed to initialize stages"),
        }
    });
}

pub fn put_stage_update(
    link: Scope<GemBidStagesComponent>,
    bid_id: i64,
    stage_number: u8,
    body: StageUpdateRequest,
) {
    let url = format!("{}/{}", stages_url(bid_id), stage_number);
    let request = match Request::put(&url).json(&body) {
        Ok(request) => request,
        Err(err) => {
            gloo_console::error!(format!("Could not encode stage update: {}", err));
            show_toast("Failed to update stage");
            return;
        }
    };
    spawn_local(async move {
        match request.send().await {
            Ok(resp) if resp.ok() => match resp.json::<StageProgress>().await {
                Ok(progress) => {
                    link.send_message(Msg::UpdateSucceeded(bid_id, progress));
                    show_toast("Stage updated successfully");
                }
                Err(_) => show_toast("Failed to update stage"),
            },
            _ => show_toast("Failed to update stage"),
        }
    });
}
