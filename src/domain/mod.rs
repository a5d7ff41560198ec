//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Voice Context: 家庭成员音色
//! - Story Context: 故事写作与命名

pub mod story;
pub mod voice;
