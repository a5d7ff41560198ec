//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（如 SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Voice Repository
// ============================================================================

/// 音色实体（用于持久化）
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceRecord {
    pub id: Uuid,
    pub name: String,
    /// 关系标识，自定义音色为 `custom`
    pub relationship: String,
    /// 供应商音色 ID，合成时必需
    pub elevenlabs_voice_id: Option<String>,
    pub is_custom: bool,
    pub audio_sample_url: Option<String>,
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Voice Repository Port
#[async_trait]
pub trait VoiceRepositoryPort: Send + Sync {
    /// 保存音色
    async fn save(&self, voice: &VoiceRecord) -> Result<(), RepositoryError>;

    /// 根据 ID 查找音色
    async fn find_by_id(&self, id: Uuid) -> Result<Option<VoiceRecord>, RepositoryError>;

    /// 获取所有音色（按创建时间升序）
    async fn find_all(&self) -> Result<Vec<VoiceRecord>, RepositoryError>;

    /// 删除音色，返回是否确实删除了记录
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}

// ============================================================================
// Story Repository
// ============================================================================

/// 故事实体，创建后不再修改
#[derive(Debug, Clone, PartialEq)]
pub struct StoryRecord {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// 弱引用，音色删除后可能悬空
    pub voice_id: Option<Uuid>,
    pub audio_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Story Repository Port
#[async_trait]
pub trait StoryRepositoryPort: Send + Sync {
    /// 保存故事
    async fn save(&self, story: &StoryRecord) -> Result<(), RepositoryError>;

    /// 获取所有故事（按创建时间降序）
    async fn find_all(&self) -> Result<Vec<StoryRecord>, RepositoryError>;
}
