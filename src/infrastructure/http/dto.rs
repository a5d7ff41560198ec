//! Data Transfer Objects
//!
//! 请求/响应字段统一使用 camelCase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{
    AudioResponse, CloneVoiceResponse, GenerateStoryResponse, StoryResponse, StoryTextResponse,
    UploadSampleResponse, VoiceResponse,
};

/// 仅表示成功的响应
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneVoiceRequest {
    pub audio_url: String,
    pub name: String,
    pub relationship: String,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneVoiceResponseDto {
    /// 供应商音色 ID
    pub voice_id: String,
}

impl From<CloneVoiceResponse> for CloneVoiceResponseDto {
    fn from(r: CloneVoiceResponse) -> Self {
        Self {
            voice_id: r.elevenlabs_voice_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteVoiceRequest {
    /// 供应商音色 ID
    pub voice_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterVoiceRequest {
    pub name: String,
    pub relationship: String,
    #[serde(default)]
    pub elevenlabs_voice_id: Option<String>,
    #[serde(default)]
    pub audio_sample_url: Option<String>,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveVoiceRequest {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceDto {
    pub id: Uuid,
    pub name: String,
    pub relationship: String,
    pub elevenlabs_voice_id: Option<String>,
    pub is_custom: bool,
    pub audio_sample_url: Option<String>,
    pub language: Option<String>,
    pub created_at: String,
}

impl From<VoiceResponse> for VoiceDto {
    fn from(v: VoiceResponse) -> Self {
        Self {
            id: v.id,
            name: v.name,
            relationship: v.relationship,
            elevenlabs_voice_id: v.elevenlabs_voice_id,
            is_custom: v.is_custom,
            audio_sample_url: v.audio_sample_url,
            language: v.language,
            created_at: v.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSampleResponseDto {
    pub file_name: String,
    pub audio_url: String,
}

impl From<UploadSampleResponse> for UploadSampleResponseDto {
    fn from(r: UploadSampleResponse) -> Self {
        Self {
            file_name: r.file_name,
            audio_url: r.audio_url,
        }
    }
}

// ============================================================================
// Story DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateStoryTextRequest {
    pub voice_id: Uuid,
    pub prompt: String,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateStoryTextResponseDto {
    pub story_text: String,
    pub voice_id: Uuid,
    pub elevenlabs_voice_id: Option<String>,
    pub language: String,
}

impl From<StoryTextResponse> for GenerateStoryTextResponseDto {
    fn from(r: StoryTextResponse) -> Self {
        Self {
            story_text: r.story_text,
            voice_id: r.voice_id,
            elevenlabs_voice_id: r.elevenlabs_voice_id,
            language: r.language,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAudioRequest {
    pub story_text: String,
    #[serde(default)]
    pub voice_id: Option<Uuid>,
    pub elevenlabs_voice_id: String,
    #[serde(default)]
    pub language: Option<String>,
    pub prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAudioResponseDto {
    pub audio_url: String,
    pub story_saved: bool,
}

impl From<AudioResponse> for GenerateAudioResponseDto {
    fn from(r: AudioResponse) -> Self {
        Self {
            audio_url: r.audio_url,
            story_saved: r.story_saved,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateStoryRequest {
    pub voice_id: Uuid,
    pub prompt: String,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateStoryResponseDto {
    pub story_text: String,
    pub audio_url: String,
    pub story_saved: bool,
}

impl From<GenerateStoryResponse> for GenerateStoryResponseDto {
    fn from(r: GenerateStoryResponse) -> Self {
        Self {
            story_text: r.story_text,
            audio_url: r.audio_url,
            story_saved: r.story_saved,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryDto {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub voice_id: Option<Uuid>,
    pub narrator: String,
    pub audio_url: Option<String>,
    pub created_at: String,
}

impl From<StoryResponse> for StoryDto {
    fn from(s: StoryResponse) -> Self {
        Self {
            id: s.id,
            title: s.title,
            content: s.content,
            voice_id: s.voice_id,
            narrator: s.narrator,
            audio_url: s.audio_url,
            created_at: s.created_at,
        }
    }
}
