//! Sample Upload Handler
//!
//! multipart 字段：
//! - key: 关系标识或自定义名称
//! - file: 录音样本（audio/webm）

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;

use crate::application::UploadSample;
use crate::infrastructure::http::dto::UploadSampleResponseDto;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

const UPLOAD_FAILED: &str = "Failed to upload audio sample";

/// 上传录音样本
pub async fn upload_sample(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadSampleResponseDto>, ApiError> {
    let mut key: Option<String> = None;
    let mut data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "key" => {
                key = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read key: {}", e)))?,
                );
            }
            "file" => {
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?
                        .to_vec(),
                );
            }
            _ => {}
        }
    }

    let key = key.ok_or_else(|| ApiError::BadRequest("key is required".to_string()))?;
    let data = data.ok_or_else(|| ApiError::BadRequest("file is required".to_string()))?;

    let result = state
        .upload_sample_handler
        .handle(UploadSample { key, data })
        .await
        .map_err(ApiError::with(UPLOAD_FAILED))?;

    Ok(Json(result.into()))
}
