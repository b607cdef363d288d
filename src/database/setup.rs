use anyhow::{Context, Result};

use super::connection::DbConn;
use super::models::StorageInfo;

/// Applies the schema. Every statement is `IF NOT EXISTS`, so this is
/// safe to run on every startup.
pub fn init_database(conn: &mut DbConn) -> Result<()> {
    let schema_sql = include_str!("schema.sql");
    let statements = split_sql_statements(schema_sql);

    for (idx, statement) in statements.iter().enumerate() {
        execute_sql(conn, statement)
            .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
    }

    log::debug!("Database schema initialized");
    Ok(())
}

/// Empties every table without touching the schema.
pub fn clear_database(conn: &mut DbConn) -> Result<()> {
    for table in ["images", "weigh_ins", "competitors"] {
        conn.execute(&format!("DELETE FROM {table}"), [])
            .with_context(|| format!("Failed to clear table {table}"))?;
    }

    log::info!("All contest data cleared");
    Ok(())
}

/// Current database size against the configured soft budget.
pub fn storage_info(conn: &mut DbConn, budget_bytes: u64) -> Result<StorageInfo> {
    let page_count: u64 = conn
        .query_row("PRAGMA page_count", [], |row| row.get(0))
        .context("Failed to read page count")?;
    let page_size: u64 = conn
        .query_row("PRAGMA page_size", [], |row| row.get(0))
        .context("Failed to read page size")?;

    Ok(StorageInfo {
        used_bytes: page_count * page_size,
        budget_bytes,
    })
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn execute_sql(conn: &mut DbConn, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::{create_memory_pool, get_connection};

    #[test]
    fn schema_applies_twice_without_error() {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();

        init_database(&mut conn).unwrap();
        init_database(&mut conn).unwrap();
    }

    #[test]
    fn storage_info_reports_nonzero_usage() {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        init_database(&mut conn).unwrap();

        let info = storage_info(&mut conn, 5 * 1024 * 1024).unwrap();
        assert!(info.used_bytes > 0);
        assert!(info.percentage() <= 100);
    }
}
