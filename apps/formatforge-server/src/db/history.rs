//! Conversion history database operations

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use sqlx::SqlitePool;

use crate::error::{AppError, Result};

/// Display format of `created_at` in API responses
pub const HISTORY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Category of the file a client submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum OriginalType {
    Image,
    Pdf,
}

/// What was done to the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ActionType {
    Convert,
    Compress,
}

/// Category of the produced file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum OutputType {
    Pdf,
    Image,
    /// Output of PDF to DOCX conversion, which produces neither of the other two
    Docx,
}

/// Outcome of the recorded attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum EventStatus {
    Success,
    Error,
}

/// Persisted history record
#[derive(Debug, Clone, Serialize)]
pub struct ConversionEvent {
    pub id: i64,
    pub original_filename: String,
    pub original_type: OriginalType,
    pub action_type: ActionType,
    pub output_filename: String,
    pub output_type: OutputType,
    pub status: EventStatus,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Data for a new history record; `id` and `created_at` are assigned on insert
#[derive(Debug, Clone)]
pub struct NewConversionEvent {
    pub original_filename: String,
    pub original_type: OriginalType,
    pub action_type: ActionType,
    pub output_filename: String,
    pub output_type: OutputType,
    pub status: EventStatus,
}

impl NewConversionEvent {
    pub fn success(
        original_filename: impl Into<String>,
        original_type: OriginalType,
        action_type: ActionType,
        output_filename: impl Into<String>,
        output_type: OutputType,
    ) -> Self {
        Self {
            original_filename: original_filename.into(),
            original_type,
            action_type,
            output_filename: output_filename.into(),
            output_type,
            status: EventStatus::Success,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ConversionEventRow {
    id: i64,
    original_filename: String,
    original_type: OriginalType,
    action_type: ActionType,
    output_filename: String,
    output_type: OutputType,
    status: EventStatus,
    created_at: String,
}

impl TryFrom<ConversionEventRow> for ConversionEvent {
    type Error = AppError;

    fn try_from(row: ConversionEventRow) -> Result<Self> {
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|e| {
                AppError::Internal(format!(
                    "Corrupt created_at on history record {}: {}",
                    row.id, e
                ))
            })?
            .with_timezone(&Utc);

        Ok(ConversionEvent {
            id: row.id,
            original_filename: row.original_filename,
            original_type: row.original_type,
            action_type: row.action_type,
            output_filename: row.output_filename,
            output_type: row.output_type,
            status: row.status,
            created_at,
        })
    }
}

fn serialize_timestamp<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&value.format(HISTORY_TIMESTAMP_FORMAT))
}

/// History repository
///
/// Records are append-only: there is no update or delete.
pub struct HistoryRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> HistoryRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a specific record
    pub async fn get(&self, id: i64) -> Result<Option<ConversionEvent>> {
        let row = sqlx::query_as::<_, ConversionEventRow>(
            r#"
            SELECT id, original_filename, original_type, action_type,
                   output_filename, output_type, status, created_at
            FROM conversion_history
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(ConversionEvent::try_from).transpose()
    }

    /// Append a record stamped with the current instant
    pub async fn record(&self, event: &NewConversionEvent) -> Result<ConversionEvent> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        let result = sqlx::query(
            r#"
            INSERT INTO conversion_history
                (original_filename, original_type, action_type, output_filename, output_type, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&event.original_filename)
        .bind(event.original_type)
        .bind(event.action_type)
        .bind(&event.output_filename)
        .bind(event.output_type)
        .bind(event.status)
        .bind(&now)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        tracing::debug!(
            "Recorded history #{}: {:?} {} -> {}",
            id,
            event.action_type,
            event.original_filename,
            event.output_filename
        );

        self.get(id)
            .await?
            .ok_or_else(|| AppError::Internal("Failed to fetch recorded history entry".to_string()))
    }

    /// All records, newest first; records sharing a timestamp keep insertion order
    pub async fn list(&self) -> Result<Vec<ConversionEvent>> {
        let rows = sqlx::query_as::<_, ConversionEventRow>(
            r#"
            SELECT id, original_filename, original_type, action_type,
                   output_filename, output_type, status, created_at
            FROM conversion_history
            ORDER BY created_at DESC, id ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ConversionEvent::try_from).collect()
    }

    #[cfg(test)]
    pub async fn count(&self) -> Result<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM conversion_history")
            .fetch_one(self.pool)
            .await?;

        Ok(result.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::db::create_pool;
    use tempfile::TempDir;

    async fn test_pool(dir: &TempDir) -> SqlitePool {
        let config = DatabaseConfig {
            url: format!("sqlite://{}", dir.path().join("history.db").display()),
            max_connections: 2,
        };
        create_pool(&config).await.unwrap()
    }

    fn compress_event(name: &str) -> NewConversionEvent {
        NewConversionEvent::success(
            name,
            OriginalType::Image,
            ActionType::Compress,
            format!("compressed_{}", name),
            OutputType::Image,
        )
    }

    #[tokio::test]
    async fn test_record_assigns_increasing_ids() {
        let dir = TempDir::new().unwrap();
        let pool = test_pool(&dir).await;
        let repo = HistoryRepository::new(&pool);

        let first = repo.record(&compress_event("a.png")).await.unwrap();
        let second = repo.record(&compress_event("b.png")).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(second.output_filename, "compressed_b.png");
        assert_eq!(second.status, EventStatus::Success);
        assert!(second.created_at >= first.created_at);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let dir = TempDir::new().unwrap();
        let pool = test_pool(&dir).await;
        let repo = HistoryRepository::new(&pool);

        for name in ["one.png", "two.png", "three.png"] {
            repo.record(&compress_event(name)).await.unwrap();
        }

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.original_filename)
            .collect();
        assert_eq!(names, vec!["three.png", "two.png", "one.png"]);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_same_timestamp_keeps_insertion_order() {
        let dir = TempDir::new().unwrap();
        let pool = test_pool(&dir).await;
        let repo = HistoryRepository::new(&pool);

        let stamp = "2024-03-05T07:08:09.000000Z";
        for name in ["inserted_first.png", "inserted_second.png"] {
            sqlx::query(
                r#"
                INSERT INTO conversion_history
                    (original_filename, original_type, action_type, output_filename, output_type, status, created_at)
                VALUES (?, 'image', 'compress', ?, 'image', 'success', ?)
                "#,
            )
            .bind(name)
            .bind(format!("compressed_{}", name))
            .bind(stamp)
            .execute(&pool)
            .await
            .unwrap();
        }
        // a newer record still comes first
        repo.record(&compress_event("latest.png")).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.original_filename)
            .collect();
        assert_eq!(names, vec!["latest.png", "inserted_first.png", "inserted_second.png"]);
    }

    #[tokio::test]
    async fn test_schema_creation_is_additive() {
        let dir = TempDir::new().unwrap();
        let pool = test_pool(&dir).await;
        HistoryRepository::new(&pool)
            .record(&compress_event("kept.png"))
            .await
            .unwrap();

        crate::db::initialize_schema(&pool).await.unwrap();

        assert_eq!(HistoryRepository::new(&pool).count().await.unwrap(), 1);
    }

    #[test]
    fn test_event_serializes_readable_timestamp() {
        let event = ConversionEvent {
            id: 7,
            original_filename: "scan.pdf".to_string(),
            original_type: OriginalType::Pdf,
            action_type: ActionType::Convert,
            output_filename: "converted.docx".to_string(),
            output_type: OutputType::Docx,
            status: EventStatus::Success,
            created_at: DateTime::parse_from_rfc3339("2024-03-05T07:08:09.123456Z")
                .unwrap()
                .with_timezone(&Utc),
        };

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["created_at"], "2024-03-05 07:08:09");
        assert_eq!(value["original_type"], "pdf");
        assert_eq!(value["action_type"], "convert");
        assert_eq!(value["output_type"], "docx");
        assert_eq!(value["status"], "success");
    }
}
