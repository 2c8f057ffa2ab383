use super::checked;
use crate::error::ApiError;
use crate::state::AppState;
use crate::storage::bids;
use actix_web::{web, HttpResponse};
use common::model::bid::NewGemBid;

/// Handler for `PUT /api/gem-bids/{id}`. The body replaces every editable
/// field; last write wins.
pub async fn process(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    payload: web::Json<NewGemBid>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let changes = checked(payload.into_inner())?;
    let bid = state
        .db
        .run(move |conn| bids::update_bid(conn, id, &changes))
        .await?;
    Ok(HttpResponse::Ok().json(bid))
}
