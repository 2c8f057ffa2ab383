use chrono::{DateTime, Utc};
use common::model::progress::{StageProgress, StageStatus};
use common::model::stage::STAGE_COUNT;
use common::model::value::FormValues;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{enum_column, enum_text, json_column};
use crate::error::ApiError;

const SELECT_PROGRESS: &str = "SELECT stage_number, status, started_at, completed_at, notes, \
     assigned_to, checklist FROM stage_progress";

fn progress_from_row(row: &Row) -> rusqlite::Result<StageProgress> {
    Ok(StageProgress {
        stage_number: row.get(0)?,
        status: enum_column(row, 1)?,
        started_at: row.get(2)?,
        completed_at: row.get(3)?,
        notes: row.get(4)?,
        assigned_to: row.get(5)?,
        checklist: json_column(row, 6)?,
    })
}

/// Recorded progress of a bid, ordered by stage number.
pub fn list_progress(conn: &Connection, bid_id: i64) -> Result<Vec<StageProgress>, ApiError> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE bid_id = ?1 ORDER BY stage_number",
        SELECT_PROGRESS
    ))?;
    let progress = stmt
        .query_map(params![bid_id], progress_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(progress)
}

pub fn find_progress(
    conn: &Connection,
    bid_id: i64,
    stage_number: u8,
) -> Result<Option<StageProgress>, ApiError> {
    Ok(conn
        .query_row(
            &format!("{} WHERE bid_id = ?1 AND stage_number = ?2", SELECT_PROGRESS),
            params![bid_id, stage_number],
            progress_from_row,
        )
        .optional()?)
}

pub fn upsert_progress(conn: &Connection, bid_id: i64, progress: &StageProgress) -> Result<(), ApiError> {
    conn.execute(
        "INSERT INTO stage_progress \
         (bid_id, stage_number, status, started_at, completed_at, notes, assigned_to, checklist) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) \
         ON CONFLICT(bid_id, stage_number) DO UPDATE SET \
         status = excluded.status, started_at = excluded.started_at, \
         completed_at = excluded.completed_at, notes = excluded.notes, \
         assigned_to = excluded.assigned_to, checklist = excluded.checklist",
        params![
            bid_id,
            progress.stage_number,
            enum_text(&progress.status)?,
            progress.started_at,
            progress.completed_at,
            progress.notes,
            progress.assigned_to,
            serde_json::to_string(&progress.checklist)?,
        ],
    )?;
    Ok(())
}

/// Records every stage of the lifecycle as pending. Stages that already have
/// progress are left alone.
pub fn init_progress(conn: &mut Connection, bid_id: i64) -> Result<Vec<StageProgress>, ApiError> {
    let tx = conn.transaction()?;
    {
        let pending = enum_text(&StageStatus::Pending)?;
        let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO stage_progress (bid_id, stage_number, status) VALUES (?1, ?2, ?3)",
        )?;
        for stage_number in 1..=STAGE_COUNT {
            stmt.execute(params![bid_id, stage_number, pending])?;
        }
    }
    tx.commit()?;
    list_progress(conn, bid_id)
}

/// Saved form values of one stage; empty when nothing has been saved.
pub fn get_stage_data(conn: &Connection, bid_id: i64, stage_number: u8) -> Result<FormValues, ApiError> {
    let data = conn
        .query_row(
            "SELECT data FROM stage_data WHERE bid_id = ?1 AND stage_number = ?2",
            params![bid_id, stage_number],
            |row| json_column(row, 0),
        )
        .optional()?;
    Ok(data.unwrap_or_default())
}

/// Replaces the saved form values of one stage.
pub fn put_stage_data(
    conn: &Connection,
    bid_id: i64,
    stage_number: u8,
    values: &FormValues,
    now: DateTime<Utc>,
) -> Result<(), ApiError> {
    conn.execute(
        "INSERT INTO stage_data (bid_id, stage_number, data, updated_at) VALUES (?1, ?2, ?3, ?4) \
         ON CONFLICT(bid_id, stage_number) DO UPDATE SET \
         data = excluded.data, updated_at = excluded.updated_at",
        params![bid_id, stage_number, serde_json::to_string(values)?, now],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_db;
    use chrono::TimeZone;
    use common::model::value::FieldValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn init_creates_fourteen_pending_stages_once() {
        let (_dir, db) = test_db::fresh();
        let mut conn = db.connect().unwrap();

        let mut started = StageProgress::new(3, StageStatus::InProgress);
        started.notes = Some("waiting on OEM".into());
        upsert_progress(&conn, 1, &started).unwrap();

        let progress = init_progress(&mut conn, 1).unwrap();
        assert_eq!(progress.len(), 14);
        assert_eq!(progress[2], started);
        assert!(progress
            .iter()
            .filter(|p| p.stage_number != 3)
            .all(|p| p.status == StageStatus::Pending));

        assert_eq!(init_progress(&mut conn, 1).unwrap().len(), 14);
    }

    #[test]
    fn upsert_replaces_existing_progress() {
        let (_dir, db) = test_db::fresh();
        let conn = db.connect().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();

        let mut progress = StageProgress::new(2, StageStatus::Pending);
        upsert_progress(&conn, 5, &progress).unwrap();
        progress.apply_status(StageStatus::Completed, now);
        progress.checklist.insert("Upload PAN".into(), true);
        upsert_progress(&conn, 5, &progress).unwrap();

        assert_eq!(find_progress(&conn, 5, 2).unwrap(), Some(progress));
        assert_eq!(list_progress(&conn, 5).unwrap().len(), 1);
        assert_eq!(find_progress(&conn, 5, 3).unwrap(), None);
    }

    #[test]
    fn stage_data_defaults_to_empty_and_is_replaced_wholesale() {
        let (_dir, db) = test_db::fresh();
        let conn = db.connect().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        assert!(get_stage_data(&conn, 1, 6).unwrap().is_empty());

        let mut values = FormValues::new();
        values.insert("unitRate".into(), FieldValue::Number(1200.0));
        values.insert("gstRate".into(), FieldValue::from("18"));
        put_stage_data(&conn, 1, 6, &values, now).unwrap();
        assert_eq!(get_stage_data(&conn, 1, 6).unwrap(), values);

        values.remove("gstRate");
        put_stage_data(&conn, 1, 6, &values, now).unwrap();
        assert_eq!(get_stage_data(&conn, 1, 6).unwrap(), values);
    }
}
