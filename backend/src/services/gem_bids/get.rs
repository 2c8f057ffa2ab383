use crate::error::ApiError;
use crate::state::AppState;
use crate::storage::bids;
use actix_web::{web, HttpResponse};

pub async fn process(state: web::Data<AppState>, id: web::Path<i64>) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let bid = state.db.run(move |conn| bids::get_bid(conn, id)).await?;
    Ok(HttpResponse::Ok().json(bid))
}
