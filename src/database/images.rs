use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::StoredImage;

const COLUMNS: &str = "id, competitor_id, data, created_at";

pub fn upsert_image(conn: &mut DbConn, competitor_id: i64, data: &[u8]) -> Result<StoredImage> {
    let sql = format!(
        "INSERT INTO images (competitor_id, data) VALUES (?1, ?2) ON CONFLICT(competitor_id) DO UPDATE SET data = excluded.data RETURNING {COLUMNS}"
    );

    conn.query_row(&sql, params![competitor_id, data], parse_image_row)
        .context("Failed to store image")
}

pub fn find_for_competitor(conn: &mut DbConn, competitor_id: i64) -> Result<Option<StoredImage>> {
    let sql = format!("SELECT {COLUMNS} FROM images WHERE competitor_id = ?1");

    conn.query_row(&sql, params![competitor_id], parse_image_row)
        .optional()
        .context("Failed to query image")
}

/// All stored images with the owning competitor's name, for the export
/// payload.
pub fn list_all_with_names(conn: &mut DbConn) -> Result<Vec<(String, Vec<u8>)>> {
    let sql = "SELECT c.name, i.data FROM images i JOIN competitors c ON c.id = i.competitor_id ORDER BY c.name";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn delete_for_competitor(conn: &mut DbConn, competitor_id: i64) -> Result<()> {
    conn.execute(
        "DELETE FROM images WHERE competitor_id = ?1",
        params![competitor_id],
    )
    .context("Failed to delete image")
    .map(|_| ())
}

pub fn total_bytes(conn: &mut DbConn) -> Result<u64> {
    conn.query_row(
        "SELECT COALESCE(SUM(LENGTH(data)), 0) FROM images",
        [],
        |row| row.get(0),
    )
    .context("Failed to sum image sizes")
}

/// Drops every stored image. Returns the number of evicted rows.
pub fn evict_all(conn: &mut DbConn) -> Result<usize> {
    conn.execute("DELETE FROM images", [])
        .context("Failed to evict images")
}

fn parse_image_row(row: &rusqlite::Row) -> rusqlite::Result<StoredImage> {
    Ok(StoredImage {
        id: row.get(0)?,
        competitor_id: row.get(1)?,
        data: row.get(2)?,
        created_at: row.get(3)?,
    })
}
