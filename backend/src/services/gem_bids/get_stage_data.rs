use crate::error::ApiError;
use crate::state::AppState;
use crate::storage::{bids, stages};
use actix_web::{web, HttpResponse};
use common::form::StageForm;
use common::registry::stages::get_stage;
use common::requests::StageDataResponse;

/// Handler for `GET /api/gem-bids/{id}/stages/{n}/data`. A stage that was
/// never saved yields an empty value map at 0% completion.
pub async fn process(
    state: web::Data<AppState>,
    path: web::Path<(i64, u8)>,
) -> Result<HttpResponse, ApiError> {
    let (bid_id, stage_number) = path.into_inner();
    let stage = get_stage(stage_number)?;
    let values = state
        .db
        .run(move |conn| {
            bids::get_bid(conn, bid_id)?;
            stages::get_stage_data(conn, bid_id, stage_number)
        })
        .await?;

    let form = StageForm::for_stage(stage, values);
    Ok(HttpResponse::Ok().json(StageDataResponse {
        completion: form.completion_percent(),
        values: form.values().clone(),
    }))
}
