//! Database schema initialization

use sqlx::SqlitePool;

use crate::error::Result;

/// Initialize the database schema
///
/// Creation is additive: existing tables and rows are left untouched.
pub async fn initialize_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(SCHEMA_SQL)
        .execute(pool)
        .await?;

    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- One row per completed conversion or compression
CREATE TABLE IF NOT EXISTS conversion_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    original_filename TEXT NOT NULL,
    -- 'image' or 'pdf'
    original_type TEXT NOT NULL,
    -- 'convert' or 'compress'
    action_type TEXT NOT NULL,
    output_filename TEXT NOT NULL,
    -- 'pdf', 'image' or 'docx'
    output_type TEXT NOT NULL,
    -- 'success' or 'error'
    status TEXT NOT NULL,
    -- UTC, RFC 3339 with microseconds so text order is time order
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_conversion_history_created_at ON conversion_history(created_at);
"#;
