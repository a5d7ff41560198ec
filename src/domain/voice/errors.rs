//! Voice Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoiceError {
    #[error("无效的音色名称: {0}")]
    InvalidName(String),

    #[error("无效的关系标识: {0}")]
    InvalidRelationship(String),

    #[error("无效的语言标签: {0}")]
    InvalidLanguage(String),

    #[error("无效的供应商音色 ID: {0}")]
    InvalidExternalId(String),
}
