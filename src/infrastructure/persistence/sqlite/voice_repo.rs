//! SQLite Voice Repository

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::{format_timestamp, parse_timestamp, DbPool};
use crate::application::ports::{RepositoryError, VoiceRecord, VoiceRepositoryPort};

const VOICE_COLUMNS: &str = "id, name, relationship, elevenlabs_voice_id, is_custom, \
                             audio_sample_url, language, created_at, updated_at";

/// SQLite Voice Repository
pub struct SqliteVoiceRepository {
    pool: DbPool,
}

impl SqliteVoiceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct VoiceRow {
    id: String,
    name: String,
    relationship: String,
    elevenlabs_voice_id: Option<String>,
    is_custom: bool,
    audio_sample_url: Option<String>,
    language: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<VoiceRow> for VoiceRecord {
    type Error = RepositoryError;

    fn try_from(row: VoiceRow) -> Result<Self, Self::Error> {
        Ok(VoiceRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            name: row.name,
            relationship: row.relationship,
            elevenlabs_voice_id: row.elevenlabs_voice_id,
            is_custom: row.is_custom,
            audio_sample_url: row.audio_sample_url,
            language: row.language,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

#[async_trait]
impl VoiceRepositoryPort for SqliteVoiceRepository {
    async fn save(&self, voice: &VoiceRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO voices (id, name, relationship, elevenlabs_voice_id, is_custom,
                                audio_sample_url, language, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                relationship = excluded.relationship,
                elevenlabs_voice_id = excluded.elevenlabs_voice_id,
                is_custom = excluded.is_custom,
                audio_sample_url = excluded.audio_sample_url,
                language = excluded.language,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(voice.id.to_string())
        .bind(&voice.name)
        .bind(&voice.relationship)
        .bind(&voice.elevenlabs_voice_id)
        .bind(voice.is_custom)
        .bind(&voice.audio_sample_url)
        .bind(&voice.language)
        .bind(format_timestamp(&voice.created_at))
        .bind(format_timestamp(&voice.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VoiceRecord>, RepositoryError> {
        let sql = format!("SELECT {} FROM voices WHERE id = ?", VOICE_COLUMNS);
        let row: Option<VoiceRow> = sqlx::query_as(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(VoiceRecord::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<VoiceRecord>, RepositoryError> {
        let sql = format!("SELECT {} FROM voices ORDER BY created_at ASC", VOICE_COLUMNS);
        let rows: Vec<VoiceRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(VoiceRecord::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM voices WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
