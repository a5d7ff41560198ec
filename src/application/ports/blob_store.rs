//! Blob Store Port - 出站端口
//!
//! 录音样本与故事音频的对象存储

use async_trait::async_trait;
use thiserror::Error;

/// 对象存储错误
#[derive(Debug, Error)]
pub enum BlobStoreError {
    #[error("Object already exists: {bucket}/{name}")]
    AlreadyExists { bucket: &'static str, name: String },

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid object name: {0}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),
}

/// 存储桶
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// 录音样本
    AudioSamples,
    /// 生成的故事音频
    StoryAudio,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::AudioSamples => "audio-samples",
            Bucket::StoryAudio => "story-audio",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "audio-samples" => Some(Bucket::AudioSamples),
            "story-audio" => Some(Bucket::StoryAudio),
            _ => None,
        }
    }

    pub fn all() -> [Bucket; 2] {
        [Bucket::AudioSamples, Bucket::StoryAudio]
    }
}

/// Blob Store Port
#[async_trait]
pub trait BlobStorePort: Send + Sync {
    /// 上传对象，同名对象已存在时失败
    async fn upload(&self, bucket: Bucket, name: &str, data: &[u8]) -> Result<(), BlobStoreError>;

    /// 对象的公开访问 URL
    fn public_url(&self, bucket: Bucket, name: &str) -> String;

    /// 按公开 URL 读取对象内容
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, BlobStoreError>;
}
