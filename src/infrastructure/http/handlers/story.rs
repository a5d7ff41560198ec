//! Story HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{GenerateAudio, GenerateStory, GenerateStoryText, ListStories};
use crate::infrastructure::http::dto::{
    GenerateAudioRequest, GenerateAudioResponseDto, GenerateStoryRequest,
    GenerateStoryResponseDto, GenerateStoryTextRequest, GenerateStoryTextResponseDto, StoryDto,
};
use crate::infrastructure::http::error::{ApiError, ApiJson};
use crate::infrastructure::http::state::AppState;

const STORY_TEXT_FAILED: &str = "Failed to generate story text";
const AUDIO_FAILED: &str = "Failed to generate audio";
const STORY_FAILED: &str = "Failed to generate story";
const LIST_FAILED: &str = "Failed to load stories";

/// 两步流程第一步：写故事
pub async fn generate_story_text(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<GenerateStoryTextRequest>,
) -> Result<Json<GenerateStoryTextResponseDto>, ApiError> {
    let result = state
        .generate_story_text_handler
        .handle(GenerateStoryText {
            voice_id: req.voice_id,
            prompt: req.prompt,
            language: req.language,
        })
        .await
        .map_err(ApiError::with(STORY_TEXT_FAILED))?;

    Ok(Json(result.into()))
}

/// 两步流程第二步：合成音频
pub async fn generate_audio(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<GenerateAudioRequest>,
) -> Result<Json<GenerateAudioResponseDto>, ApiError> {
    let result = state
        .generate_audio_handler
        .handle(GenerateAudio {
            story_text: req.story_text,
            voice_id: req.voice_id,
            elevenlabs_voice_id: req.elevenlabs_voice_id,
            language: req.language,
            prompt: req.prompt,
        })
        .await
        .map_err(ApiError::with(AUDIO_FAILED))?;

    Ok(Json(result.into()))
}

/// 一次性流程
pub async fn generate_story(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<GenerateStoryRequest>,
) -> Result<Json<GenerateStoryResponseDto>, ApiError> {
    let result = state
        .generate_story_handler
        .handle(GenerateStory {
            voice_id: req.voice_id,
            prompt: req.prompt,
            language: req.language,
        })
        .await
        .map_err(ApiError::with(STORY_FAILED))?;

    Ok(Json(result.into()))
}

/// 列出故事（最新在前）
pub async fn list_stories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StoryDto>>, ApiError> {
    let stories = state
        .list_stories_handler
        .handle(ListStories)
        .await
        .map_err(ApiError::with(LIST_FAILED))?;

    Ok(Json(stories.into_iter().map(StoryDto::from).collect()))
}
