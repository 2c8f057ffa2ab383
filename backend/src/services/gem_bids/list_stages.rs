use crate::error::ApiError;
use crate::state::AppState;
use crate::storage::{bids, stages};
use actix_web::{web, HttpResponse};

/// Handler for `GET /api/gem-bids/{id}/stages`. Only stages with recorded
/// progress are returned; clients fill the gaps from the bid's current stage.
pub async fn process(state: web::Data<AppState>, id: web::Path<i64>) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let progress = state
        .db
        .run(move |conn| {
            bids::get_bid(conn, id)?;
            stages::list_progress(conn, id)
        })
        .await?;
    Ok(HttpResponse::Ok().json(progress))
}
