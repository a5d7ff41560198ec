//! Voice HTTP Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{
    CloneVoice, DeleteClonedVoice, GetVoice, ListVoices, RegisterVoice, RemoveVoice,
    VoiceResponse,
};
use crate::infrastructure::http::dto::{
    CloneVoiceRequest, CloneVoiceResponseDto, DeleteVoiceRequest, RegisterVoiceRequest,
    RemoveVoiceRequest, SuccessResponse, VoiceDto,
};
use crate::infrastructure::http::error::{ApiError, ApiJson};
use crate::infrastructure::http::state::AppState;

const CLONE_FAILED: &str = "Failed to clone voice";
const DELETE_FAILED: &str = "Failed to delete voice";
const LIST_FAILED: &str = "Failed to load voices";
const GET_FAILED: &str = "Failed to load voice";
const REGISTER_FAILED: &str = "Failed to save voice";

/// 下载录音样本并在供应商处克隆
pub async fn clone_voice(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CloneVoiceRequest>,
) -> Result<Json<CloneVoiceResponseDto>, ApiError> {
    let result = state
        .clone_voice_handler
        .handle(CloneVoice {
            audio_url: req.audio_url,
            name: req.name,
            relationship: req.relationship,
            is_custom: req.is_custom,
            language: req.language,
        })
        .await
        .map_err(ApiError::with(CLONE_FAILED))?;

    Ok(Json(result.into()))
}

/// 删除供应商侧音色
pub async fn delete_voice(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<DeleteVoiceRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .delete_cloned_voice_handler
        .handle(DeleteClonedVoice {
            elevenlabs_voice_id: req.voice_id,
        })
        .await
        .map_err(ApiError::with(DELETE_FAILED))?;

    Ok(Json(SuccessResponse::ok()))
}

/// 列出所有音色（按创建时间升序）
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<VoiceDto>>, ApiError> {
    let voices = state
        .list_voices_handler
        .handle(ListVoices)
        .await
        .map_err(ApiError::with(LIST_FAILED))?;

    Ok(Json(voices.into_iter().map(VoiceDto::from).collect()))
}

/// 获取单个音色
pub async fn get_voice(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<VoiceDto>, ApiError> {
    let voice: VoiceResponse = state
        .get_voice_handler
        .handle(GetVoice { voice_id: id })
        .await
        .map_err(ApiError::with(GET_FAILED))?;

    Ok(Json(voice.into()))
}

/// 登记音色记录
pub async fn register_voice(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RegisterVoiceRequest>,
) -> Result<Json<VoiceDto>, ApiError> {
    let record = state
        .register_voice_handler
        .handle(RegisterVoice {
            name: req.name,
            relationship: req.relationship,
            elevenlabs_voice_id: req.elevenlabs_voice_id,
            audio_sample_url: req.audio_sample_url,
            is_custom: req.is_custom,
            language: req.language,
        })
        .await
        .map_err(ApiError::with(REGISTER_FAILED))?;

    Ok(Json(VoiceResponse::from(record).into()))
}

/// 删除音色（供应商侧 + 本地记录）
pub async fn remove_voice(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RemoveVoiceRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .remove_voice_handler
        .handle(RemoveVoice { voice_id: req.id })
        .await
        .map_err(ApiError::with(DELETE_FAILED))?;

    Ok(Json(SuccessResponse::ok()))
}
