//! # Bid Document Upload
//!
//! Handler for `POST /api/gem-bids/{id}/documents`.
//!
//! Every multipart part that carries a file name is streamed into a temporary
//! file inside the bid's upload directory while its MD5 digest is computed.
//! Once complete it is renamed to `<md5>_<file name>`, so uploading the same
//! content twice lands on the same file. The original file names are added
//! to the bid's document list; the stage form keeps storing just the name.

use crate::error::ApiError;
use crate::state::AppState;
use crate::storage::bids;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use common::model::document::StoredDocument;
use futures_util::StreamExt;
use log::info;
use md5::Context;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub async fn process(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let bid_id = id.into_inner();
    let stored = upload_documents(&state, bid_id, payload).await?;
    Ok(HttpResponse::Ok().json(stored))
}

pub async fn upload_documents(
    state: &AppState,
    bid_id: i64,
    mut payload: Multipart,
) -> Result<Vec<StoredDocument>, ApiError> {
    state.db.run(move |conn| bids::get_bid(conn, bid_id)).await?;

    let dir = state.bid_upload_dir(bid_id);
    fs::create_dir_all(&dir)?;

    let mut stored = Vec::new();
    while let Some(item) = payload.next().await {
        let mut field = item?;
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(sanitize_file_name))
            .filter(|name| !name.is_empty());
        let Some(file_name) = file_name else {
            // Non-file parts are drained and ignored.
            while let Some(chunk) = field.next().await {
                chunk?;
            }
            continue;
        };

        let mut temp = NamedTempFile::new_in(&dir)?;
        let mut hasher = Context::new();
        let mut size: u64 = 0;
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            hasher.consume(&chunk);
            temp.write_all(&chunk)?;
            size += chunk.len() as u64;
        }

        let stored_name = format!("{:x}_{}", hasher.finalize(), file_name);
        temp.persist(dir.join(&stored_name)).map_err(|e| e.error)?;
        info!("Stored {} for bid {} ({} bytes)", stored_name, bid_id, size);
        stored.push(StoredDocument {
            file_name,
            stored_name,
            size,
        });
    }

    if stored.is_empty() {
        return Err(ApiError::BadRequest("Missing file".to_string()));
    }

    let names: Vec<String> = stored.iter().map(|doc| doc.file_name.clone()).collect();
    state
        .db
        .run(move |conn| bids::add_documents(conn, bid_id, &names))
        .await?;
    Ok(stored)
}

/// Keeps the last path component of a client-supplied name and replaces
/// anything outside `[A-Za-z0-9._-]` with `_`.
fn sanitize_file_name(raw: &str) -> String {
    let base = Path::new(raw)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::sanitize_file_name;

    #[test]
    fn file_names_lose_directories_and_odd_characters() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("BoQ sheet (v2).xlsx"), "BoQ_sheet__v2_.xlsx");
        assert_eq!(sanitize_file_name(".."), "");
    }
}
