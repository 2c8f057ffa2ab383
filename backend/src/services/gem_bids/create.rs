use super::checked;
use crate::error::ApiError;
use crate::state::AppState;
use crate::storage::bids;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::bid::NewGemBid;
use log::info;

/// Handler for `POST /api/gem-bids`. Responds `201 Created` with the stored
/// bid, including its assigned bid number.
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<NewGemBid>,
) -> Result<HttpResponse, ApiError> {
    let new_bid = checked(payload.into_inner())?;
    let bid = state
        .db
        .run(move |conn| bids::insert_bid(conn, &new_bid, Utc::now()))
        .await?;
    info!("Created bid {} ({})", bid.bid_no, bid.title);
    Ok(HttpResponse::Created().json(bid))
}
