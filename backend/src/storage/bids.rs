use chrono::{DateTime, Datelike, Utc};
use common::model::bid::{bid_number, GemBid, NewGemBid};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};

use super::{enum_column, enum_text, json_column};
use crate::error::ApiError;

const SELECT_BID: &str = "SELECT id, bid_no, title, description, organization, category, \
     estimated_value, deadline, status, location, requirements, documents, priority, tags, \
     current_stage, created_at FROM gem_bids";

fn bid_from_row(row: &Row) -> rusqlite::Result<GemBid> {
    Ok(GemBid {
        id: row.get(0)?,
        bid_no: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        organization: row.get(4)?,
        category: row.get(5)?,
        estimated_value: row.get(6)?,
        deadline: row.get(7)?,
        status: enum_column(row, 8)?,
        location: row.get(9)?,
        requirements: json_column(row, 10)?,
        documents: json_column(row, 11)?,
        priority: enum_column(row, 12)?,
        tags: json_column(row, 13)?,
        current_stage: row.get(14)?,
        created_at: row.get(15)?,
    })
}

/// Inserts a bid and assigns its autonumber from the new row id.
pub fn insert_bid(conn: &mut Connection, new_bid: &NewGemBid, now: DateTime<Utc>) -> Result<GemBid, ApiError> {
    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO gem_bids (title, description, organization, category, estimated_value, \
         deadline, status, location, requirements, documents, priority, tags, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            new_bid.title,
            new_bid.description,
            new_bid.organization,
            new_bid.category,
            new_bid.estimated_value,
            new_bid.deadline,
            enum_text(&new_bid.status)?,
            new_bid.location,
            serde_json::to_string(&new_bid.requirements)?,
            serde_json::to_string(&new_bid.documents)?,
            enum_text(&new_bid.priority)?,
            serde_json::to_string(&new_bid.tags)?,
            now,
        ],
    )?;
    let id = tx.last_insert_rowid();
    tx.execute(
        "UPDATE gem_bids SET bid_no = ?1 WHERE id = ?2",
        params![bid_number(now.year(), id), id],
    )?;
    tx.commit()?;
    get_bid(conn, id)
}

pub fn list_bids(conn: &Connection) -> Result<Vec<GemBid>, ApiError> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT_BID))?;
    let bids = stmt
        .query_map([], bid_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(bids)
}

pub fn find_bid(conn: &Connection, id: i64) -> Result<Option<GemBid>, ApiError> {
    Ok(conn
        .query_row(&format!("{} WHERE id = ?1", SELECT_BID), params![id], bid_from_row)
        .optional()?)
}

pub fn get_bid(conn: &Connection, id: i64) -> Result<GemBid, ApiError> {
    find_bid(conn, id)?.ok_or_else(|| ApiError::NotFound(format!("bid {}", id)))
}

/// Replaces the editable fields of a bid. The bid number, current stage and
/// creation time are kept.
pub fn update_bid(conn: &Connection, id: i64, bid: &NewGemBid) -> Result<GemBid, ApiError> {
    let changed = conn.execute(
        "UPDATE gem_bids SET title = ?1, description = ?2, organization = ?3, category = ?4, \
         estimated_value = ?5, deadline = ?6, status = ?7, location = ?8, requirements = ?9, \
         documents = ?10, priority = ?11, tags = ?12 WHERE id = ?13",
        params![
            bid.title,
            bid.description,
            bid.organization,
            bid.category,
            bid.estimated_value,
            bid.deadline,
            enum_text(&bid.status)?,
            bid.location,
            serde_json::to_string(&bid.requirements)?,
            serde_json::to_string(&bid.documents)?,
            enum_text(&bid.priority)?,
            serde_json::to_string(&bid.tags)?,
            id,
        ],
    )?;
    if changed == 0 {
        return Err(ApiError::NotFound(format!("bid {}", id)));
    }
    get_bid(conn, id)
}

/// Deletes a bid together with its stage progress and stage data. Returns
/// whether the bid existed.
pub fn delete_bid(conn: &mut Connection, id: i64) -> Result<bool, ApiError> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM stage_progress WHERE bid_id = ?1", params![id])?;
    tx.execute("DELETE FROM stage_data WHERE bid_id = ?1", params![id])?;
    let deleted = tx.execute("DELETE FROM gem_bids WHERE id = ?1", params![id])?;
    tx.commit()?;
    Ok(deleted > 0)
}

/// Moves the bid's current stage forward to `stage_number`. Never moves it
/// back.
pub fn advance_current_stage(conn: &Connection, id: i64, stage_number: u8) -> Result<(), ApiError> {
    conn.execute(
        "UPDATE gem_bids SET current_stage = ?1 WHERE id = ?2 AND current_stage < ?1",
        params![stage_number, id],
    )?;
    Ok(())
}

/// Appends document names to the bid, skipping names it already lists.
pub fn add_documents(conn: &mut Connection, id: i64, names: &[String]) -> Result<GemBid, ApiError> {
    // Immediate, so concurrent uploads to one bid serialize on the write lock
    // before reading the list.
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let mut bid = get_bid(&tx, id)?;
    for name in names {
        if !bid.documents.contains(name) {
            bid.documents.push(name.clone());
        }
    }
    tx.execute(
        "UPDATE gem_bids SET documents = ?1 WHERE id = ?2",
        params![serde_json::to_string(&bid.documents)?, id],
    )?;
    tx.commit()?;
    Ok(bid)
}


#[cfg(test)]
mod tests {
    use super::fixtures::new_bid;
    use super::*;
    use crate::storage::test_db;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn insert_assigns_bid_number_and_round_trips() {
        let (_dir, db) = test_db::fresh();
        let mut conn = db.connect().unwrap();

        let bid = insert_bid(&mut conn, &new_bid("Laptops"), now()).unwrap();
        assert_eq!(bid.bid_no, "GEM/2025/B/000001");
        assert_eq!(bid.current_stage, 1);
        assert_eq!(bid.requirements, vec!["ISO 9001".to_string()]);
        assert_eq!(bid.created_at, now());
        assert_eq!(get_bid(&conn, bid.id).unwrap(), bid);
    }

    #[test]
    fn update_keeps_number_and_stage() {
        let (_dir, db) = test_db::fresh();
        let mut conn = db.connect().unwrap();
        let bid = insert_bid(&mut conn, &new_bid("Laptops"), now()).unwrap();
        advance_current_stage(&conn, bid.id, 4).unwrap();

        let mut changes = new_bid("Desktops");
        changes.estimated_value = 10.0;
        let updated = update_bid(&conn, bid.id, &changes).unwrap();
        assert_eq!(updated.title, "Desktops");
        assert_eq!(updated.bid_no, bid.bid_no);
        assert_eq!(updated.current_stage, 4);
    }

    #[test]
    fn current_stage_never_moves_back() {
        let (_dir, db) = test_db::fresh();
        let mut conn = db.connect().unwrap();
        let bid = insert_bid(&mut conn, &new_bid("Laptops"), now()).unwrap();
        advance_current_stage(&conn, bid.id, 6).unwrap();
        advance_current_stage(&conn, bid.id, 2).unwrap();
        assert_eq!(get_bid(&conn, bid.id).unwrap().current_stage, 6);
    }

    #[test]
    fn missing_bids_are_not_found() {
        let (_dir, db) = test_db::fresh();
        let mut conn = db.connect().unwrap();
        assert!(matches!(get_bid(&conn, 7), Err(ApiError::NotFound(_))));
        assert!(matches!(
            update_bid(&conn, 7, &new_bid("x")),
            Err(ApiError::NotFound(_))
        ));
        assert!(!delete_bid(&mut conn, 7).unwrap());
    }

    #[test]
    fn documents_are_deduplicated() {
        let (_dir, db) = test_db::fresh();
        let mut conn = db.connect().unwrap();
        let bid = insert_bid(&mut conn, &new_bid("Laptops"), now()).unwrap();
        add_documents(&mut conn, bid.id, &["boq.xlsx".to_string()]).unwrap();
        let bid = add_documents(&mut conn, bid.id, &["boq.xlsx".to_string(), "pan.pdf".to_string()]).unwrap();
        assert_eq!(bid.documents, vec!["boq.xlsx".to_string(), "pan.pdf".to_string()]);
    }

    #[test]
    fn concurrent_uploads_keep_every_name() {
        let (_dir, db) = test_db::fresh();
        let mut conn = db.connect().unwrap();
        let bid = insert_bid(&mut conn, &new_bid("Laptops"), now()).unwrap();

        let writers: Vec<_> = (0..8)
            .map(|i| {
                let db = db.clone();
                std::thread::spawn(move || {
                    let mut conn = db.connect().unwrap();
                    add_documents(&mut conn, bid.id, &[format!("doc-{}.pdf", i)]).unwrap();
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        let mut documents = get_bid(&conn, bid.id).unwrap().documents;
        documents.sort();
        let expected: Vec<String> = (0..8).map(|i| format!("doc-{}.pdf", i)).collect();
        assert_eq!(documents, expected);
    }
}
