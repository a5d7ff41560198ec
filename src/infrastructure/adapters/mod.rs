//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod elevenlabs;
pub mod openai;
pub mod storage;

pub use elevenlabs::*;
pub use openai::*;
pub use storage::*;
