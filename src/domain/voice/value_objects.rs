//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::VoiceError;

/// 自定义音色使用的关系标识
pub const CUSTOM_RELATIONSHIP: &str = "custom";

/// 旁遮普语的语言代码（合成请求中显式携带）
pub const PUNJABI_LANGUAGE_CODE: &str = "pa";

/// 音色名称
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceName(String);

impl VoiceName {
    pub fn new(name: impl Into<String>) -> Result<Self, VoiceError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(VoiceError::InvalidName("音色名称不能为空".to_string()));
        }
        if name.chars().count() > 100 {
            return Err(VoiceError::InvalidName(
                "音色名称长度不能超过100字符".to_string(),
            ));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for VoiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 关系标识（如 "mummy"、"papa"）
///
/// 匹配时忽略大小写；自定义音色统一使用 `custom`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipKey(String);

impl RelationshipKey {
    pub fn new(key: impl Into<String>) -> Result<Self, VoiceError> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(VoiceError::InvalidRelationship(
                "关系标识不能为空".to_string(),
            ));
        }
        Ok(Self(key))
    }

    /// 自定义音色的关系标识
    pub fn custom() -> Self {
        Self(CUSTOM_RELATIONSHIP.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn is_custom(&self) -> bool {
        self.matches(CUSTOM_RELATIONSHIP)
    }

    /// 大小写不敏感比较
    pub fn matches(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.trim().to_lowercase()
    }
}

impl std::fmt::Display for RelationshipKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 供应商音色 ID 最大长度
const EXTERNAL_ID_MAX_LEN: usize = 64;

/// 供应商音色 ID
///
/// 会作为路径段拼进供应商 URL，只允许 ASCII 字母数字、`-` 和 `_`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalVoiceId(String);

impl ExternalVoiceId {
    pub fn new(id: impl Into<String>) -> Result<Self, VoiceError> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(VoiceError::InvalidExternalId(
                "供应商音色 ID 不能为空".to_string(),
            ));
        }
        if id.len() > EXTERNAL_ID_MAX_LEN
            || !id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(VoiceError::InvalidExternalId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExternalVoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 语言标签（如 "en"、"pa"）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageTag(String);

impl LanguageTag {
    pub fn new(tag: impl Into<String>) -> Result<Self, VoiceError> {
        let tag = tag.into().trim().to_lowercase();
        if tag.is_empty() {
            return Err(VoiceError::InvalidLanguage("语言标签不能为空".to_string()));
        }
        if tag.len() > 16 || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(VoiceError::InvalidLanguage(tag));
        }
        Ok(Self(tag))
    }

    pub fn english() -> Self {
        Self("en".to_string())
    }

    pub fn punjabi() -> Self {
        Self(PUNJABI_LANGUAGE_CODE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn narration(&self) -> NarrationLanguage {
        NarrationLanguage::from_tag(self)
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 讲述语言
///
/// 只支持两种：默认（英语）与旁遮普语，其他标签一律按默认处理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationLanguage {
    Default,
    Punjabi,
}

impl NarrationLanguage {
    pub fn from_tag(tag: &LanguageTag) -> Self {
        if tag.as_str() == PUNJABI_LANGUAGE_CODE {
            Self::Punjabi
        } else {
            Self::Default
        }
    }

    /// 合成请求需要显式携带的语言代码，仅旁遮普语有
    pub fn synthesis_language_code(&self) -> Option<&'static str> {
        match self {
            Self::Punjabi => Some(PUNJABI_LANGUAGE_CODE),
            Self::Default => None,
        }
    }
}

/// 解析有效讲述语言
///
/// 优先级：音色自身的语言 > 调用方传入的语言 > 默认语言。
/// 空白字符串视为未设置。
pub fn resolve_language(
    voice_language: Option<&str>,
    requested: Option<&str>,
    default: &LanguageTag,
) -> LanguageTag {
    voice_language
        .and_then(|tag| LanguageTag::new(tag).ok())
        .or_else(|| requested.and_then(|tag| LanguageTag::new(tag).ok()))
        .unwrap_or_else(|| default.clone())
}

/// 录音样本的文件名：`{关系或名称}-{毫秒时间戳}-{随机后缀}.webm`
pub fn sample_file_name(key: &str, timestamp_millis: i64) -> String {
    let key: String = key
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let key = if key.is_empty() { "voice".to_string() } else { key };
    format!("{}-{}-{}.webm", key, timestamp_millis, Uuid::new_v4().simple())
}
