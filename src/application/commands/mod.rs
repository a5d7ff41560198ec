//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有写操作以及对外部供应商的调用

mod story_commands;
mod voice_commands;

pub mod handlers;

pub use story_commands::*;
pub use voice_commands::*;
