use crate::error::ApiError;
use crate::state::AppState;
use crate::storage::bids;
use actix_web::{web, HttpResponse};
use common::model::bid::BidQuery;

pub async fn process(
    state: web::Data<AppState>,
    query: web::Query<BidQuery>,
) -> Result<HttpResponse, ApiError> {
    let all = state.db.run(|conn| bids::list_bids(conn)).await?;
    Ok(HttpResponse::Ok().json(query.apply(all)))
}
