//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：处理所有读操作

mod story_queries;
mod voice_queries;

pub mod handlers;

pub use story_queries::*;
pub use voice_queries::*;
