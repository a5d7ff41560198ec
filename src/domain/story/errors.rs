//! Story Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoryError {
    #[error("故事题目不能为空")]
    EmptyPrompt,

    #[error("故事内容不能为空")]
    EmptyText,
}
