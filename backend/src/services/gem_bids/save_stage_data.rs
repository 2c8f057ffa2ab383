//! # Stage Data Save
//!
//! Handler for `PUT /api/gem-bids/{id}/stages/{n}/data`.
//!
//! The body is the complete value map of the stage and replaces whatever was
//! stored. Keys that are not fields of the stage are dropped. Autonumber
//! fields left empty are filled from the bid. The remaining values go through
//! the same [`StageForm::validate`] the browser runs; any failure rejects the
//! whole save with `400` and the per-field messages.

use crate::error::ApiError;
use crate::state::AppState;
use crate::storage::{bids, stages};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::form::StageForm;
use common::model::bid::GemBid;
use common::model::field::{FieldConfiguration, FieldType};
use common::model::stage::Stage;
use common::model::value::{FieldValue, FormValues};
use common::registry::stages::get_stage;
use common::requests::StageDataResponse;
use log::debug;

pub async fn process(
    state: web::Data<AppState>,
    path: web::Path<(i64, u8)>,
    payload: web::Json<FormValues>,
) -> Result<HttpResponse, ApiError> {
    let (bid_id, stage_number) = path.into_inner();
    let saved = save_stage_data(&state, bid_id, stage_number, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(saved))
}

pub async fn save_stage_data(
    state: &AppState,
    bid_id: i64,
    stage_number: u8,
    submitted: FormValues,
) -> Result<StageDataResponse, ApiError> {
    let stage = get_stage(stage_number)?;
    state
        .db
        .run(move |conn| {
            let bid = bids::get_bid(conn, bid_id)?;
            let mut form = stage_form(stage, &bid, submitted);
            if !form.validate() {
                return Err(ApiError::Validation(form.errors().clone()));
            }
            stages::put_stage_data(conn, bid_id, stage_number, form.values(), Utc::now())?;
            Ok(StageDataResponse {
                completion: form.completion_percent(),
                values: form.values().clone(),
            })
        })
        .await
}

fn stage_form(stage: &'static Stage, bid: &GemBid, mut submitted: FormValues) -> StageForm {
    let mut form = StageForm::for_stage(stage, FormValues::new());
    let fields: Vec<&'static FieldConfiguration> = form.fields().to_vec();
    for config in fields {
        match submitted.remove(&config.key) {
            Some(value) if value.is_filled() || config.field_type != FieldType::Autonumber => {
                form.set_value(&config.key, value)
            }
            _ if config.field_type == FieldType::Autonumber => {
                if let Some(number) = bid.autonumber(&config.key) {
                    form.set_value(&config.key, FieldValue::Text(number));
                }
            }
            _ => {}
        }
    }
    if !submitted.is_empty() {
        debug!(
            "Dropping {} value(s) that are not fields of stage {}",
            submitted.len(),
            stage.stage_number
        );
    }
    form
}
