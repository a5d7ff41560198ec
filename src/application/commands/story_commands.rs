//! Story Commands

use uuid::Uuid;

/// 两步流程第一步：生成故事文本
#[derive(Debug, Clone)]
pub struct GenerateStoryText {
    pub voice_id: Uuid,
    pub prompt: String,
    pub language: Option<String>,
}

/// 两步流程第二步：合成音频并保存故事
#[derive(Debug, Clone)]
pub struct GenerateAudio {
    pub story_text: String,
    pub voice_id: Option<Uuid>,
    pub elevenlabs_voice_id: String,
    pub language: Option<String>,
    pub prompt: String,
}

/// 一次性流程：文本、音频、保存一步完成
#[derive(Debug, Clone)]
pub struct GenerateStory {
    pub voice_id: Uuid,
    pub prompt: String,
    pub language: Option<String>,
}
