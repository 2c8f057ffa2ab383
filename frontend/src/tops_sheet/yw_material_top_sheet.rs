//! Sliding top sheet used for the stage update dialog.
//!
//! The sheet is always mounted; `open_top_sheet` and `close_top_sheet` toggle
//! its `show` class so the CSS transition runs.

use uuid::Uuid;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::{html, Callback, Component, Context, Html, NodeRef, Properties};

pub struct YwMaterialTopSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub node_ref: NodeRef,
    #[prop_or_default]
    pub title: String,
    /// Fired by the close button, after the sheet starts closing.
    #[prop_or_default]
    pub on_close: Callback<()>,
}

impl Component for YwMaterialTopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("id-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let onclose = {
            let node_ref = props.node_ref.clone();
            let on_close = props.on_close.clone();
            Callback::from(move |_| {
                close_top_sheet(node_ref.clone());
                on_close.emit(());
            })
        };
        html! {
            <div class="top-sheet" id={self.id.clone()} ref={props.node_ref.clone()}>
                <div class="top-sheet-header">
                    <h3>{ props.title.clone() }</h3>
                    <button class="icon-btn" title="Close" onclick={onclose}>
                        <i class="material-icons">{"close"}</i>
                    </button>
                </div>
                { props.children.clone() }
            </div>
        }
    }
}

fn toggle_show(top_sheet_ref: &NodeRef, show: bool) {
    let Some(top_sheet) = top_sheet_ref.cast::<web_sys::HtmlElement>() else {
        return;
    };
    let Some(window) = web_sys::window() else {
        return;
    };
    // Deferred so a freshly rendered sheet gets its transition.
    let toggle = Closure::once_into_js(move || {
        let class_list = top_sheet.class_list();
        let _ = if show {
            class_list.add_1("show")
        } else {
            class_list.remove_1("show")
        };
    });
    let _ = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(toggle.unchecked_ref(), 50);
}

pub fn open_top_sheet(top_sheet_ref: NodeRef) {
    toggle_show(&top_sheet_ref, true);
}

pub fn close_top_sheet(top_sheet_ref: NodeRef) {
    toggle_show(&top_sheet_ref, false);
}
