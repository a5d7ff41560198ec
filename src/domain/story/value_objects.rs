//! Story Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::StoryError;

/// 标题最大长度（字符）
pub const TITLE_MAX_CHARS: usize = 100;

/// 故事题目（用户或随机挑选的提示）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryPrompt(String);

impl StoryPrompt {
    pub fn new(prompt: impl Into<String>) -> Result<Self, StoryError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(StoryError::EmptyPrompt);
        }
        Ok(Self(prompt))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 由题目派生的标题
    pub fn title(&self) -> StoryTitle {
        StoryTitle::from_prompt(&self.0)
    }
}

/// 故事标题：题目的前 100 个字符
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryTitle(String);

impl StoryTitle {
    pub fn from_prompt(prompt: &str) -> Self {
        Self(prompt.chars().take(TITLE_MAX_CHARS).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// 故事篇幅
///
/// 两步流程使用 Short，一次性流程使用 Long
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryLength {
    /// 70-100 词
    Short,
    /// 200-300 词
    Long,
}

impl StoryLength {
    /// 目标词数区间
    pub fn word_band(&self) -> (u32, u32) {
        match self {
            Self::Short => (70, 100),
            Self::Long => (200, 300),
        }
    }
}

/// 故事音频文件名：`story-{毫秒时间戳}-{随机后缀}.mp3`
///
/// 同一毫秒内的并发请求也不会重名
pub fn story_audio_file_name(timestamp_millis: i64) -> String {
    format!("story-{}-{}.mp3", timestamp_millis, Uuid::new_v4().simple())
}
