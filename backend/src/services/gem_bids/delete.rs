use crate::error::ApiError;
use crate::state::AppState;
use crate::storage::bids;
use actix_web::{web, HttpResponse};
use log::info;

/// Handler for `DELETE /api/gem-bids/{id}`. Stage progress and stage data go
/// with the bid; uploaded files stay on disk.
pub async fn process(state: web::Data<AppState>, id: web::Path<i64>) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    if state.db.run(move |conn| bids::delete_bid(conn, id)).await? {
        info!("Deleted bid {}", id);
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(ApiError::NotFound(format!("bid {}", id)))
    }
}
