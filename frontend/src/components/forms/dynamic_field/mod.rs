//! Renderer for a single configured field.
//!
//! Dispatch is one `match` on [`FieldType`](common::model::field::FieldType)
//! in `view.rs`. The only state kept here is the preview of a picked image,
//! which is read from the file and shown as a data URL. Image and file fields
//! still emit just the file name.

mod props;
mod view;

use base64::{engine::general_purpose, Engine as _};
use gloo_file::{futures::read_as_bytes, Blob};
use yew::prelude::*;

pub use props::DynamicFieldProps;

pub enum Msg {
    PreviewImage(web_sys::File),
    PreviewLoaded(String),
}

pub struct DynamicField {
    pub image_preview: Option<String>,
}

impl Component for DynamicField {
    type Message = Msg;
    type Properties = DynamicFieldProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { image_preview: None }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::PreviewImage(file) => {
                let mime = file.type_();
                let link = ctx.link().clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let blob = Blob::from(file);
                    match read_as_bytes(&blob).await {
                        Ok(bytes) => {
                            let base64 = general_purpose::STANDARD.encode(&bytes);
                            link.send_message(Msg::PreviewLoaded(format!(
                                "data:{};base64,{}",
                                mime, base64
                            )));
                        }
                        Err(err) => gloo_console::error!(format!("Could not read image: {}", err)),
                    }
                });
                false
            }
            Msg::PreviewLoaded(url) => {
                self.image_preview = Some(url);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
