//! Story API - 客户端访问服务端的接口
//!
//! 覆盖服务端全部 JSON 端点；`HttpStoryApi` 基于 reqwest 实现

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::voice::RelationshipKey;

/// 录音样本的内容类型
pub const SAMPLE_CONTENT_TYPE: &str = "audio/webm";

/// 客户端调用错误
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    /// 服务端返回非 2xx，message 为响应中的 error 字段
    #[error("Server responded {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.without_url().to_string())
        } else {
            Self::Network(err.without_url().to_string())
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ServerStatus {
    pub status: String,
    pub version: String,
}

/// 服务端的音色记录
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    pub id: Uuid,
    pub name: String,
    pub relationship: String,
    pub elevenlabs_voice_id: Option<String>,
    pub is_custom: bool,
    pub audio_sample_url: Option<String>,
    pub language: Option<String>,
    pub created_at: String,
}

impl Voice {
    /// 关系标识大小写不敏感匹配
    pub fn has_relationship(&self, relationship: &str) -> bool {
        RelationshipKey::new(self.relationship.as_str())
            .map(|key| key.matches(relationship))
            .unwrap_or(false)
    }
}

/// 在音色列表中按关系标识查找第一个匹配项
pub fn voice_for_relationship<'a>(voices: &'a [Voice], relationship: &str) -> Option<&'a Voice> {
    voices.iter().find(|v| v.has_relationship(relationship))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub voice_id: Option<Uuid>,
    pub narrator: String,
    pub audio_url: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedSample {
    pub file_name: String,
    pub audio_url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneVoiceInput {
    pub audio_url: String,
    pub name: String,
    pub relationship: String,
    pub is_custom: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClonedVoice {
    voice_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteVoiceBody<'a> {
    voice_id: &'a str,
}

#[derive(Debug, Serialize)]
struct RemoveVoiceBody {
    id: Uuid,
}

/// 登记音色记录
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVoice {
    pub name: String,
    pub relationship: String,
    pub elevenlabs_voice_id: Option<String>,
    pub audio_sample_url: Option<String>,
    pub is_custom: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRequest {
    pub voice_id: Uuid,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryText {
    pub story_text: String,
    pub voice_id: Uuid,
    pub elevenlabs_voice_id: Option<String>,
    pub language: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioRequest {
    pub story_text: String,
    pub voice_id: Option<Uuid>,
    pub elevenlabs_voice_id: String,
    pub language: Option<String>,
    pub prompt: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedAudio {
    pub audio_url: String,
    pub story_saved: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedStory {
    pub story_text: String,
    pub audio_url: String,
    pub story_saved: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

// ============================================================================
// StoryApi
// ============================================================================

/// 客户端使用的服务端接口
#[async_trait]
pub trait StoryApi: Send + Sync {
    async fn ping(&self) -> Result<ServerStatus, ClientError>;

    /// 上传录音样本，`key` 为关系标识或自定义名称
    async fn upload_sample(&self, key: &str, audio: Vec<u8>) -> Result<UploadedSample, ClientError>;

    /// 克隆音色，返回供应商音色 ID
    async fn clone_voice(&self, input: &CloneVoiceInput) -> Result<String, ClientError>;

    /// 仅删除供应商侧音色
    async fn delete_voice(&self, elevenlabs_voice_id: &str) -> Result<(), ClientError>;

    /// 按创建时间升序
    async fn list_voices(&self) -> Result<Vec<Voice>, ClientError>;

    async fn register_voice(&self, voice: &NewVoice) -> Result<Voice, ClientError>;

    /// 删除本地记录（有供应商音色时一并删除）
    async fn remove_voice(&self, id: Uuid) -> Result<(), ClientError>;

    async fn generate_story_text(&self, request: &StoryRequest) -> Result<StoryText, ClientError>;

    async fn generate_audio(&self, request: &AudioRequest) -> Result<GeneratedAudio, ClientError>;

    async fn generate_story(&self, request: &StoryRequest) -> Result<GeneratedStory, ClientError>;

    /// 按创建时间降序
    async fn list_stories(&self) -> Result<Vec<Story>, ClientError>;
}

/// 基于 HTTP 的 StoryApi
pub struct HttpStoryApi {
    client: Client,
    base_url: String,
}

impl HttpStoryApi {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ClientError> {
        let response = self.client.get(self.url(path)).send().await?;
        decode(response).await
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        decode(response).await
    }
}

/// 非 2xx 时取出 `{error}` 字段，取不到就用原始 body
async fn decode<R: DeserializeOwned>(response: Response) -> Result<R, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        return Err(ClientError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl StoryApi for HttpStoryApi {
    async fn ping(&self) -> Result<ServerStatus, ClientError> {
        self.get_json("/ping").await
    }

    async fn upload_sample(&self, key: &str, audio: Vec<u8>) -> Result<UploadedSample, ClientError> {
        let part = Part::bytes(audio)
            .file_name("sample.webm")
            .mime_str(SAMPLE_CONTENT_TYPE)?;
        let form = Form::new().text("key", key.to_string()).part("file", part);

        let response = self
            .client
            .post(self.url("/samples"))
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }

    async fn clone_voice(&self, input: &CloneVoiceInput) -> Result<String, ClientError> {
        let cloned: ClonedVoice = self.post_json("/clone-voice", input).await?;
        Ok(cloned.voice_id)
    }

    async fn delete_voice(&self, elevenlabs_voice_id: &str) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .post_json(
                "/delete-voice",
                &DeleteVoiceBody {
                    voice_id: elevenlabs_voice_id,
                },
            )
            .await?;
        Ok(())
    }

    async fn list_voices(&self) -> Result<Vec<Voice>, ClientError> {
        self.get_json("/voices").await
    }

    async fn register_voice(&self, voice: &NewVoice) -> Result<Voice, ClientError> {
        self.post_json("/voices", voice).await
    }

    async fn remove_voice(&self, id: Uuid) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .post_json("/voices/remove", &RemoveVoiceBody { id })
            .await?;
        Ok(())
    }

    async fn generate_story_text(&self, request: &StoryRequest) -> Result<StoryText, ClientError> {
        self.post_json("/generate-story-text", request).await
    }

    async fn generate_audio(&self, request: &AudioRequest) -> Result<GeneratedAudio, ClientError> {
        self.post_json("/generate-audio", request).await
    }

    async fn generate_story(&self, request: &StoryRequest) -> Result<GeneratedStory, ClientError> {
        self.post_json("/generate-story", request).await
    }

    async fn list_stories(&self) -> Result<Vec<Story>, ClientError> {
        self.get_json("/stories").await
    }
}
