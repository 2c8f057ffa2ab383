//! # Stage Status Update
//!
//! Handler for `PUT /api/gem-bids/{id}/stages/{n}`.
//!
//! The requested status is applied unconditionally; the completion guard
//! lives in the stage form, which only offers "Complete" at 100%. Entering
//! `in_progress` stamps `startedAt` once, entering `completed` stamps
//! `completedAt`, and starting a stage beyond the bid's current stage moves
//! the bid forward to it. Notes, assignee and checklist are only replaced
//! when present in the request.

use crate::error::ApiError;
use crate::state::AppState;
use crate::storage::{bids, stages};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::progress::{StageProgress, StageStatus};
use common::registry::stages::get_stage;
use common::requests::StageUpdateRequest;
use log::info;

pub async fn process(
    state: web::Data<AppState>,
    path: web::Path<(i64, u8)>,
    payload: web::Json<StageUpdateRequest>,
) -> Result<HttpResponse, ApiError> {
    let (bid_id, stage_number) = path.into_inner();
    let progress = update_stage(&state, bid_id, stage_number, payload.into_inner()).await?;
    info!(
        "Bid {} stage {} is now {}",
        bid_id,
        stage_number,
        progress.status.as_str()
    );
    Ok(HttpResponse::Ok().json(progress))
}

pub async fn update_stage(
    state: &AppState,
    bid_id: i64,
    stage_number: u8,
    request: StageUpdateRequest,
) -> Result<StageProgress, ApiError> {
    get_stage(stage_number)?;
    state
        .db
        .run(move |conn| {
            bids::get_bid(conn, bid_id)?;
            let mut progress = stages::find_progress(conn, bid_id, stage_number)?
                .unwrap_or_else(|| StageProgress::new(stage_number, StageStatus::Pending));

            progress.apply_status(request.status, Utc::now());
            if let Some(notes) = request.notes {
                progress.notes = Some(notes);
            }
            if let Some(assigned_to) = request.assigned_to {
                progress.assigned_to = Some(assigned_to);
            }
            if let Some(checklist) = request.checklist {
                progress.checklist = checklist;
            }

            stages::upsert_progress(conn, bid_id, &progress)?;
            if request.status == StageStatus::InProgress {
                bids::advance_current_stage(conn, bid_id, stage_number)?;
            }
            Ok(progress)
        })
        .await
}
