use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::WeighInRow;

const COLUMNS: &str = "id, competitor_id, date, weight, created_at";

pub fn insert_weigh_in(
    conn: &mut DbConn,
    competitor_id: i64,
    date: NaiveDate,
    weight: f64,
) -> Result<WeighInRow> {
    let sql = format!(
        "INSERT INTO weigh_ins (competitor_id, date, weight) VALUES (?1, ?2, ?3) RETURNING {COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![competitor_id, date, weight],
        parse_weigh_in_row,
    )
    .context("Failed to insert weigh-in")
}

/// Series for one competitor, ascending by date. Entries sharing a date
/// keep insertion order.
pub fn list_for_competitor(conn: &mut DbConn, competitor_id: i64) -> Result<Vec<WeighInRow>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM weigh_ins WHERE competitor_id = ?1 ORDER BY date, id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![competitor_id], parse_weigh_in_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Rewrites the earliest-inserted entry recorded on `old_date`. Returns
/// the updated row, or None when no entry matches.
pub fn update_first_matching(
    conn: &mut DbConn,
    competitor_id: i64,
    old_date: NaiveDate,
    new_date: NaiveDate,
    new_weight: f64,
) -> Result<Option<WeighInRow>> {
    let sql = format!(
        "UPDATE weigh_ins SET date = ?1, weight = ?2 WHERE id = (SELECT id FROM weigh_ins WHERE competitor_id = ?3 AND date = ?4 ORDER BY id LIMIT 1) RETURNING {COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![new_date, new_weight, competitor_id, old_date],
        parse_weigh_in_row,
    )
    .optional()
    .context("Failed to update weigh-in")
}

/// Deletes the earliest-inserted entry on `date`, optionally pinned to an
/// exact weight when the same day holds several measurements. Returns
/// true when a row was removed.
pub fn delete_first_matching(
    conn: &mut DbConn,
    competitor_id: i64,
    date: NaiveDate,
    weight: Option<f64>,
) -> Result<bool> {
    let deleted = match weight {
        Some(weight) => conn.execute(
            "DELETE FROM weigh_ins WHERE id = (SELECT id FROM weigh_ins WHERE competitor_id = ?1 AND date = ?2 AND weight = ?3 ORDER BY id LIMIT 1)",
            params![competitor_id, date, weight],
        ),
        None => conn.execute(
            "DELETE FROM weigh_ins WHERE id = (SELECT id FROM weigh_ins WHERE competitor_id = ?1 AND date = ?2 ORDER BY id LIMIT 1)",
            params![competitor_id, date],
        ),
    }
    .context("Failed to delete weigh-in")?;

    Ok(deleted > 0)
}

pub fn delete_for_competitor(conn: &mut DbConn, competitor_id: i64) -> Result<()> {
    conn.execute(
        "DELETE FROM weigh_ins WHERE competitor_id = ?1",
        params![competitor_id],
    )
    .context("Failed to delete competitor weigh-ins")
    .map(|_| ())
}

fn parse_weigh_in_row(row: &rusqlite::Row) -> rusqlite::Result<WeighInRow> {
    Ok(WeighInRow {
        id: row.get(0)?,
        competitor_id: row.get(1)?,
        date: row.get(2)?,
        weight: row.get(3)?,
        created_at: row.get(4)?,
    })
}
