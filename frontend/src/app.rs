//! Root component: the bid catalogue on the left, the lifecycle of the
//! selected bid on the right.

use common::form::normalize::format_date;
use common::model::bid::GemBid;
use common::model::stage::ViewMode;
use gloo_net::http::Request;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::gem_bid::stages::GemBidStagesComponent;
use crate::components::helpers::{format_inr, install_unload_guard, show_toast};

pub enum Msg {
    FetchBids,
    BidsLoaded(Vec<GemBid>),
    SetSearch(String),
    SelectBid(i64),
    SetViewMode(ViewMode),
}

pub struct App {
    bids: Vec<GemBid>,
    search: String,
    selected: Option<i64>,
    view_mode: ViewMode,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        install_unload_guard();
        ctx.link().send_message(Msg::FetchBids);
        Self {
            bids: Vec::new(),
            search: String::new(),
            selected: None,
            view_mode: ViewMode::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FetchBids => {
                let link = ctx.link().clone();
                let search = self.search.trim().to_string();
                spawn_local(async move {
                    let request = if search.is_empty() {
                        Request::get("/api/gem-bids")
                    } else {
                        Request::get("/api/gem-bids").query([("search", search.as_str())])
                    };
                    match request.send().await {
                        Ok(resp) if resp.ok() => match resp.json::<Vec<GemBid>>().await {
                            Ok(bids) => link.send_message(Msg::BidsLoaded(bids)),
                            Err(_) => show_toast("Failed to load bids"),
                        },
                        _ => show_toast("Failed to load bids"),
                    }
                });
                false
            }
            Msg::BidsLoaded(bids) => {
                if self.selected.is_none() {
                    self.selected = bids.first().map(|bid| bid.id);
                }
                self.bids = bids;
                true
            }
            Msg::SetSearch(search) => {
                self.search = search;
                ctx.link().send_message(Msg::FetchBids);
                false
            }
            Msg::SelectBid(id) => {
                self.selected = Some(id);
                true
            }
            Msg::SetViewMode(mode) => {
                self.view_mode = mode;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let selected = self
            .selected
            .and_then(|id| self.bids.iter().find(|bid| bid.id == id));

        html! {
            <div class="app-layout">
                <aside class="bid-catalogue">
                    <h2>{"GeM Bids"}</h2>
                    <input
                        type="search"
                        placeholder="Search bids..."
                        value={self.search.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            Msg::SetSearch(e.target_unchecked_into::<web_sys::HtmlInputElement>().value())
                        })}
                    />
                    { for self.bids.iter().map(|bid| self.bid_card(ctx, bid)) }
                    if self.bids.is_empty() {
                        <p class="muted">{"No bids found"}</p>
                    }
                </aside>
                <main class="bid-workspace">
                    {
                        match selected {
                            Some(bid) => html! {
                                <>
                                    <div class="bid-header">
                                        <h2>{ &bid.title }</h2>
                                        <span class="muted">{ format!("{} • {}", bid.bid_no, bid.organization) }</span>
                                    </div>
                                    <GemBidStagesComponent
                                        bid={bid.clone()}
                                        view_mode={self.view_mode}
                                        on_view_mode_change={link.callback(Msg::SetViewMode)}
                                        on_bid_changed={link.callback(|_| Msg::FetchBids)}
                                    />
                                </>
                            },
                            None => html! { <p class="muted">{"Select a bid to see its stages"}</p> },
                        }
                    }
                </main>
            </div>
        }
    }
}

impl App {
    fn bid_card(&self, ctx: &Context<Self>, bid: &GemBid) -> Html {
        let id = bid.id;
        let deadline = format_date(&bid.deadline.to_rfc3339()).unwrap_or_default();
        html! {
            <div
                class={classes!("bid-card", (self.selected == Some(id)).then_some("selected"))}
                onclick={ctx.link().callback(move |_| Msg::SelectBid(id))}
            >
                <div class="bid-no">{ &bid.bid_no }</div>
                <div class="bid-title">{ &bid.title }</div>
                <div class="muted">{ &bid.organization }</div>
                <div class="bid-meta">
                    <span>{ format!("Due {}", deadline) }</span>
                    <span>{ format_inr(bid.estimated_value) }</span>
                </div>
            </div>
        }
    }
}
