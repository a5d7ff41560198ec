//! SQLite Story Repository

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::{format_timestamp, parse_timestamp, DbPool};
use crate::application::ports::{RepositoryError, StoryRecord, StoryRepositoryPort};

/// SQLite Story Repository
pub struct SqliteStoryRepository {
    pool: DbPool,
}

impl SqliteStoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct StoryRow {
    id: String,
    title: String,
    content: String,
    voice_id: Option<String>,
    audio_url: Option<String>,
    created_at: String,
}

impl TryFrom<StoryRow> for StoryRecord {
    type Error = RepositoryError;

    fn try_from(row: StoryRow) -> Result<Self, Self::Error> {
        let voice_id = row
            .voice_id
            .as_deref()
            .map(Uuid::parse_str)
            .transpose()
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        Ok(StoryRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            title: row.title,
            content: row.content,
            voice_id,
            audio_url: row.audio_url,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

#[async_trait]
impl StoryRepositoryPort for SqliteStoryRepository {
    async fn save(&self, story: &StoryRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO stories (id, title, content, voice_id, audio_url, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(story.id.to_string())
        .bind(&story.title)
        .bind(&story.content)
        .bind(story.voice_id.map(|id| id.to_string()))
        .bind(&story.audio_url)
        .bind(format_timestamp(&story.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<StoryRecord>, RepositoryError> {
        let rows: Vec<StoryRow> = sqlx::query_as(
            "SELECT id, title, content, voice_id, audio_url, created_at FROM stories ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(StoryRecord::try_from).collect()
    }
}
