use common::form::normalize::{
    autonumber_display, date_input_value, datetime_input_value, normalize_date,
    normalize_datetime, normalize_numeric, numeric_input_value, rating_label, rating_of,
    rating_value, verification_label, MAX_RATING, TABLE_PLACEHOLDER,
};
use common::model::field::{FieldConfiguration, FieldType};
use common::model::value::{DateRange, FieldValue};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::{DynamicField, Msg};

pub fn view(component: &DynamicField, ctx: &Context<DynamicField>) -> Html {
    let props = ctx.props();
    let config = props.config;

    html! {
        <div class={classes!("dynamic-field", props.error.is_some().then_some("has-error"))}>
            if !config.field_type.describes_itself() {
                <label class="field-label" for={input_id(config)}>
                    { &config.name }
                    if config.is_required() {
                        <span class="required-mark">{" *"}</span>
                    }
                </label>
            }
            { render_widget(component, ctx) }
            if let Some(description) = config.description.as_ref().filter(|_| !config.field_type.describes_itself()) {
                <p class="field-hint">{ description }</p>
            }
            if let Some(error) = &props.error {
                <p class="field-error">{ error.clone() }</p>
            }
        </div>
    }
}

fn input_id(config: &FieldConfiguration) -> String {
    format!("field-{}", config.key)
}

fn text_of(value: Option<&FieldValue>) -> String {
    value.map(FieldValue::as_text).unwrap_or_default()
}

fn render_widget(component: &DynamicField, ctx: &Context<DynamicField>) -> Html {
    let props = ctx.props();
    let config = props.config;
    let value = props.value.as_ref();
    let disabled = props.disabled;
    let on_change = props.on_change.clone();
    let id = input_id(config);
    let placeholder = config.placeholder.clone().unwrap_or_default();

    match config.field_type {
        FieldType::Text => html! {
            <input
                id={id}
                type="text"
                value={text_of(value)}
                placeholder={placeholder}
                disabled={disabled}
                oninput={on_change.reform(|e: InputEvent| {
                    FieldValue::Text(e.target_unchecked_into::<HtmlInputElement>().value())
                })}
            />
        },
        FieldType::Textarea => html! {
            <textarea
                id={id}
                rows="4"
                value={text_of(value)}
                placeholder={placeholder}
                disabled={disabled}
                oninput={on_change.reform(|e: InputEvent| {
                    FieldValue::Text(e.target_unchecked_into::<HtmlTextAreaElement>().value())
                })}
            />
        },
        FieldType::Lookup => html! {
            <div class="input-with-icon">
                <i class="material-icons">{"search"}</i>
                <input
                    id={id}
                    type="text"
                    value={text_of(value)}
                    placeholder={format!("Search {}...", config.name)}
                    disabled={disabled}
                    oninput={on_change.reform(|e: InputEvent| {
                        FieldValue::Text(e.target_unchecked_into::<HtmlInputElement>().value())
                    })}
                />
            </div>
        },
        FieldType::Dropdown => {
            let selected = text_of(value);
            let prompt = config
                .placeholder
                .clone()
                .unwrap_or_else(|| format!("Select {}", config.name));
            html! {
                <select
                    id={id}
                    disabled={disabled}
                    onchange={on_change.reform(|e: Event| {
                        FieldValue::Text(e.target_unchecked_into::<HtmlSelectElement>().value())
                    })}
                >
                    <option value="" selected={selected.is_empty()}>{ prompt }</option>
                    { for config.options.iter().map(|option| html! {
                        <option value={option.clone()} selected={*option == selected}>{ option }</option>
                    }) }
                </select>
            }
        }
        FieldType::Numeric | FieldType::Currency => {
            let input = html! {
                <input
                    id={id}
                    type="number"
                    value={numeric_input_value(value)}
                    placeholder={placeholder}
                    disabled={disabled}
                    oninput={on_change.reform(|e: InputEvent| {
                        FieldValue::Number(normalize_numeric(&e.target_unchecked_into::<HtmlInputElement>().value()))
                    })}
                />
            };
            if config.field_type == FieldType::Currency {
                html! { <div class="input-with-prefix"><span class="prefix">{"₹"}</span>{ input }</div> }
            } else {
                input
            }
        }
        FieldType::Date => html! {
            <input
                id={id}
                type="date"
                value={date_input_value(value)}
                disabled={disabled}
                onchange={on_change.reform(|e: Event| {
                    let raw = e.target_unchecked_into::<HtmlInputElement>().value();
                    FieldValue::Text(normalize_date(&raw).unwrap_or_default())
                })}
            />
        },
        FieldType::Datetime => html! {
            <input
                id={id}
                type="datetime-local"
                value={datetime_input_value(value)}
                disabled={disabled}
                onchange={on_change.reform(|e: Event| {
                    let raw = e.target_unchecked_into::<HtmlInputElement>().value();
                    FieldValue::Text(normalize_datetime(&raw).unwrap_or_default())
                })}
            />
        },
        FieldType::Daterange => render_date_range(value, disabled, &on_change),
        FieldType::File | FieldType::Image => {
            let is_image = config.field_type == FieldType::Image;
            let link = ctx.link().clone();
            let onchange = Callback::from(move |e: Event| {
                let input = e.target_unchecked_into::<HtmlInputElement>();
                if let Some(file) = input.files().and_then(|files| files.get(0)) {
                    on_change.emit(FieldValue::Text(file.name()));
                    if is_image {
                        link.send_message(Msg::PreviewImage(file));
                    }
                }
            });
            html! {
                <div class="upload-box">
                    <i class="material-icons">{ if is_image { "image" } else { "upload_file" } }</i>
                    <label for={id.clone()}>
                        { if is_image { "Upload Image".to_string() } else { format!("Upload {}", config.name) } }
                    </label>
                    <input
                        id={id}
                        type="file"
                        accept={is_image.then_some("image/*")}
                        disabled={disabled}
                        {onchange}
                    />
                    if let Some(name) = value.filter(|v| v.is_filled()) {
                        <span class="file-chip">{ name.as_text() }</span>
                    }
                    if let Some(preview) = component.image_preview.clone().filter(|_| is_image) {
                        <img class="image-preview" src={preview} />
                    }
                </div>
            }
        }
        FieldType::Multifile => {
            let onchange = on_change.reform(|e: Event| {
                let input = e.target_unchecked_into::<HtmlInputElement>();
                let names = input
                    .files()
                    .map(|files| {
                        (0..files.length())
                            .filter_map(|i| files.get(i))
                            .map(|file| file.name())
                            .collect()
                    })
                    .unwrap_or_default();
                FieldValue::List(names)
            });
            html! {
                <div class="upload-box">
                    <i class="material-icons">{"upload_file"}</i>
                    <label for={id.clone()}>{"Upload Multiple Files"}</label>
                    <input id={id} type="file" multiple=true disabled={disabled} {onchange} />
                    <div class="file-chips">
                        { for value.map(FieldValue::as_list).unwrap_or_default().iter().map(|name| html! {
                            <span class="file-chip">{ name }</span>
                        }) }
                    </div>
                </div>
            }
        }
        FieldType::Checkbox => html! {
            <div class="checkbox-row">
                <input
                    id={id.clone()}
                    type="checkbox"
                    checked={value.is_some_and(FieldValue::as_bool)}
                    disabled={disabled}
                    onchange={on_change.reform(|e: Event| {
                        FieldValue::Bool(e.target_unchecked_into::<HtmlInputElement>().checked())
                    })}
                />
                <label for={id}>{ config.description.clone().unwrap_or_else(|| config.name.clone()) }</label>
            </div>
        },
        FieldType::Verification => {
            let verified = value.is_some_and(FieldValue::is_filled);
            html! {
                <div class="verification-box">
                    <div class="verification-header">
                        <i class="material-icons">{"verified_user"}</i>
                        <span>{ config.description.clone().unwrap_or_else(|| config.name.clone()) }</span>
                        <span class={classes!("badge", verified.then_some("badge-success"))}>
                            { verification_label(value) }
                        </span>
                    </div>
                    if !verified {
                        <button
                            class="btn-outline"
                            disabled={disabled}
                            onclick={on_change.reform(|_| FieldValue::Bool(true))}
                        >
                            {"Verify Now"}
                        </button>
                    }
                </div>
            }
        }
        FieldType::Rating => {
            let current = rating_of(value).unwrap_or(0);
            html! {
                <div class="rating">
                    { for (1..=MAX_RATING).map(|star| {
                        let on_change = on_change.clone();
                        let onclick = Callback::from(move |_: MouseEvent| {
                            if !disabled {
                                on_change.emit(rating_value(star));
                            }
                        });
                        html! {
                            <i class={classes!("material-icons", "star", (star <= current).then_some("filled"))} {onclick}>
                                { if star <= current { "star" } else { "star_border" } }
                            </i>
                        }
                    }) }
                    <span class="rating-label">{ rating_label(value) }</span>
                </div>
            }
        }
        FieldType::Autonumber => html! {
            <input id={id} type="text" class="readonly" value={autonumber_display(value)} disabled=true />
        },
        FieldType::Table => html! {
            <div class="placeholder-box">
                <div class="placeholder-title">
                    <i class="material-icons">{"table_chart"}</i>
                    <span>{"Table Input"}</span>
                </div>
                if let Some(description) = &config.description {
                    <p>{ description }</p>
                }
                <button
                    class="btn-outline"
                    disabled={disabled}
                    onclick={on_change.reform(|_| FieldValue::Text(TABLE_PLACEHOLDER.to_string()))}
                >
                    {"Open Table Editor"}
                </button>
            </div>
        },
        FieldType::Structured => html! {
            <div class="placeholder-box">
                <div class="placeholder-title">
                    <i class="material-icons">{"assignment"}</i>
                    <span>{"Structured Data Entry"}</span>
                </div>
                { for ["Name", "Address Line 1", "Address Line 2", "City", "Pincode", "Contact Number", "Email"]
                    .iter()
                    .map(|label| html! { <input type="text" placeholder={*label} disabled=true /> }) }
            </div>
        },
    }
}

fn render_date_range(value: Option<&FieldValue>, disabled: bool, on_change: &Callback<FieldValue>) -> Html {
    let range = value.and_then(FieldValue::as_range).cloned().unwrap_or_default();
    let side_input = |label: &'static str, current: Option<&String>, start: bool| {
        let range = range.clone();
        let on_change = on_change.clone();
        let shown = date_input_value(current.map(|s| FieldValue::Text(s.clone())).as_ref());
        let onchange = Callback::from(move |e: Event| {
            let raw = e.target_unchecked_into::<HtmlInputElement>().value();
            let side = normalize_date(&raw);
            let next = if start {
                DateRange { start: side, end: range.end.clone() }
            } else {
                DateRange { start: range.start.clone(), end: side }
            };
            on_change.emit(FieldValue::Range(next));
        });
        html! {
            <div class="date-range-side">
                <label>{ label }</label>
                <input type="date" value={shown} disabled={disabled} {onchange} />
            </div>
        }
    };

    html! {
        <div class="date-range">
            { side_input("Start Date", range.start.as_ref(), true) }
            { side_input("End Date", range.end.as_ref(), false) }
        </div>
    }
}
