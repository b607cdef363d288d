use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::{Competitor, PhotoSlot};

const COLUMNS: &str = "id, name, baseline_weight, current_weight, cheerer, profile_pic, before_photo, after_photo, wa_applied, created_at";

pub fn insert_competitor(
    conn: &mut DbConn,
    name: &str,
    baseline_weight: f64,
    cheerer: &str,
    profile_pic: &str,
) -> Result<Competitor> {
    let sql = format!(
        "INSERT INTO competitors (name, baseline_weight, current_weight, cheerer, profile_pic) VALUES (?1, ?2, ?2, ?3, ?4) RETURNING {COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![name, baseline_weight, cheerer, profile_pic],
        parse_competitor_row,
    )
    .context("Failed to insert competitor")
}

pub fn find_by_name(conn: &mut DbConn, name: &str) -> Result<Option<Competitor>> {
    let sql = format!("SELECT {COLUMNS} FROM competitors WHERE name = ?1");

    conn.query_row(&sql, params![name], parse_competitor_row)
        .optional()
        .context("Failed to query competitor by name")
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Competitor>> {
    let sql = format!("SELECT {COLUMNS} FROM competitors ORDER BY name");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_competitor_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn update_details(
    conn: &mut DbConn,
    id: i64,
    name: &str,
    cheerer: &str,
) -> Result<Competitor> {
    let sql = format!(
        "UPDATE competitors SET name = ?1, cheerer = ?2 WHERE id = ?3 RETURNING {COLUMNS}"
    );

    conn.query_row(&sql, params![name, cheerer, id], parse_competitor_row)
        .context("Failed to update competitor details")
}

pub fn update_current_weight(conn: &mut DbConn, id: i64, weight: f64) -> Result<()> {
    conn.execute(
        "UPDATE competitors SET current_weight = ?1 WHERE id = ?2",
        params![weight, id],
    )
    .context("Failed to update current weight")
    .map(|_| ())
}

pub fn update_photo(
    conn: &mut DbConn,
    id: i64,
    slot: PhotoSlot,
    reference: &str,
) -> Result<()> {
    let column = match slot {
        PhotoSlot::Profile => "profile_pic",
        PhotoSlot::Before => "before_photo",
        PhotoSlot::After => "after_photo",
    };

    conn.execute(
        &format!("UPDATE competitors SET {column} = ?1 WHERE id = ?2"),
        params![reference, id],
    )
    .with_context(|| format!("Failed to update {column}"))
    .map(|_| ())
}

pub fn update_wa_applied(conn: &mut DbConn, id: i64, applied: bool) -> Result<()> {
    conn.execute(
        "UPDATE competitors SET wa_applied = ?1 WHERE id = ?2",
        params![applied, id],
    )
    .context("Failed to update anti-dehydration flag")
    .map(|_| ())
}

/// Resets every profile picture reference. Used after a bulk image
/// eviction so records stop pointing at blobs that no longer exist.
pub fn reset_profile_pics(conn: &mut DbConn, prefix: &str) -> Result<usize> {
    conn.execute(
        "UPDATE competitors SET profile_pic = '' WHERE profile_pic LIKE ?1",
        params![format!("{prefix}%")],
    )
    .context("Failed to reset profile pictures")
}

pub fn delete_by_id(conn: &mut DbConn, id: i64) -> Result<()> {
    conn.execute("DELETE FROM competitors WHERE id = ?1", params![id])
        .context("Failed to delete competitor")
        .map(|_| ())
}

fn parse_competitor_row(row: &rusqlite::Row) -> rusqlite::Result<Competitor> {
    Ok(Competitor {
        id: row.get(0)?,
        name: row.get(1)?,
        baseline_weight: row.get(2)?,
        current_weight: row.get(3)?,
        cheerer: row.get(4)?,
        profile_pic: row.get(5)?,
        before_photo: row.get(6)?,
        after_photo: row.get(7)?,
        wa_applied: row.get(8)?,
        created_at: row.get(9)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::{create_memory_pool, get_connection};
    use crate::database::setup::init_database;

    fn test_conn() -> (crate::database::DbPool, DbConn) {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        init_database(&mut conn).unwrap();
        (pool, conn)
    }

    #[test]
    fn insert_starts_current_weight_at_baseline() {
        let (_pool, mut conn) = test_conn();

        let competitor =
            insert_competitor(&mut conn, "Sarah Chen", 85.0, "Team Thunder", "").unwrap();
        assert_eq!(competitor.baseline_weight, 85.0);
        assert_eq!(competitor.current_weight, 85.0);
        assert_eq!(competitor.wa_applied, None);
    }

    #[test]
    fn duplicate_name_is_rejected_by_the_unique_index() {
        let (_pool, mut conn) = test_conn();

        insert_competitor(&mut conn, "Sarah Chen", 85.0, "", "").unwrap();
        assert!(insert_competitor(&mut conn, "Sarah Chen", 90.0, "", "").is_err());
    }

    #[test]
    fn update_details_renames_in_place() {
        let (_pool, mut conn) = test_conn();

        let competitor = insert_competitor(&mut conn, "Old Name", 100.0, "", "").unwrap();
        let updated =
            update_details(&mut conn, competitor.id, "New Name", "Dream Team").unwrap();

        assert_eq!(updated.id, competitor.id);
        assert_eq!(updated.name, "New Name");
        assert_eq!(updated.cheerer, "Dream Team");
        assert!(find_by_name(&mut conn, "Old Name").unwrap().is_none());
    }

    #[test]
    fn list_all_is_name_ordered() {
        let (_pool, mut conn) = test_conn();

        insert_competitor(&mut conn, "Zoe", 90.0, "", "").unwrap();
        insert_competitor(&mut conn, "Amy", 80.0, "", "").unwrap();

        let names: Vec<String> = list_all(&mut conn)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Amy", "Zoe"]);
    }
}
