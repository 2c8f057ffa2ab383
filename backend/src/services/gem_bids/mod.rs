//! # GeM Bid Service
//!
//! CRUD over tracked bids plus the per-bid lifecycle: stage progress, the
//! form values saved for each stage, and uploaded documents.
//!
//! ## Sub-modules:
//! - `list`, `create`, `get`, `update`, `delete`: the bid catalogue.
//! - `list_stages`, `init_stages`, `update_stage`: recorded stage progress.
//! - `get_stage_data`, `save_stage_data`: stage form values. Saving runs the
//!   same validation as the stage form in the browser.
//! - `upload_documents`: multipart upload of bid documents to disk.

mod create;
mod delete;
mod get;
mod get_stage_data;
mod init_stages;
mod list;
mod list_stages;
mod save_stage_data;
mod update;
mod update_stage;
mod upload_documents;

use crate::error::ApiError;
use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;
use common::form::validation::FieldErrors;
use common::model::bid::NewGemBid;

/// The base path for all bid endpoints.
const API_PATH: &str = "/api/gem-bids";

/// Configures and returns the Actix `Scope` for bid routes.
///
/// # Registered Routes:
///
/// *   **`GET ""`**: bids filtered and sorted by the `BidQuery` query string.
/// *   **`POST ""`**: creates a bid and assigns its `GEM/<year>/B/<id>` number.
/// *   **`GET|PUT|DELETE /{id}`**: one bid.
/// *   **`GET /{id}/stages`**: recorded stage progress, by stage number.
/// *   **`POST /{id}/stages`**: records all fourteen stages as pending.
/// *   **`PUT /{id}/stages/{n}`**: status, notes, assignee and checklist of
///     stage `n`. Timestamps are stamped here.
/// *   **`GET|PUT /{id}/stages/{n}/data`**: the stage's form values and its
///     completion percentage. `PUT` rejects invalid values with `400` and the
///     per-field messages.
/// *   **`POST /{id}/documents`**: multipart upload, one or more `file` parts.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/{id}", get().to(get::process))
        .route("/{id}", put().to(update::process))
        .route("/{id}", delete().to(delete::process))
        .route("/{id}/stages", get().to(list_stages::process))
        .route("/{id}/stages", post().to(init_stages::process))
        .route("/{id}/stages/{stage}", put().to(update_stage::process))
        .route("/{id}/stages/{stage}/data", get().to(get_stage_data::process))
        .route("/{id}/stages/{stage}/data", put().to(save_stage_data::process))
        .route("/{id}/documents", post().to(upload_documents::process))
}

/// Trims a bid payload and rejects it when a required field is blank.
fn checked(new_bid: NewGemBid) -> Result<NewGemBid, ApiError> {
    let new_bid = new_bid.trimmed();
    let problems = new_bid.problems();
    if problems.is_empty() {
        return Ok(new_bid);
    }
    let errors: FieldErrors = problems
        .into_iter()
        .map(|(field, message)| (field.to_string(), message.to_string()))
        .collect();
    Err(ApiError::Validation(errors))
}
