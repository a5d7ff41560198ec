//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                  GET   健康检查
//! - /api/samples               POST  上传录音样本（multipart）
//! - /api/clone-voice           POST  克隆音色
//! - /api/delete-voice          POST  删除供应商侧音色
//! - /api/voices                GET   列出音色
//! - /api/voices                POST  登记音色
//! - /api/voices/:id            GET   获取音色
//! - /api/voices/remove         POST  删除音色（供应商侧 + 本地记录）
//! - /api/generate-story-text   POST  写故事（两步流程第一步）
//! - /api/generate-audio        POST  合成音频（两步流程第二步）
//! - /api/generate-story        POST  一次性生成故事与音频
//! - /api/stories               GET   列出故事
//! - /storage/{bucket}/{file}   GET   对象存储静态文件

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有 API 路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/samples", post(handlers::upload_sample))
        .route("/clone-voice", post(handlers::clone_voice))
        .route("/delete-voice", post(handlers::delete_voice))
        .route("/generate-story-text", post(handlers::generate_story_text))
        .route("/generate-audio", post(handlers::generate_audio))
        .route("/generate-story", post(handlers::generate_story))
        .route("/stories", get(handlers::list_stories))
        .nest("/voices", voice_routes())
}

/// Voice 路由
fn voice_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::list_voices).post(handlers::register_voice))
        .route("/remove", post(handlers::remove_voice))
        .route("/:id", get(handlers::get_voice))
}
