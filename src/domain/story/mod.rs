//! Story Context - 故事限界上下文
//!
//! 职责:
//! - 按语言与篇幅组合写作指令
//! - 标题截断、音频文件命名
//! - 随机故事题目

mod errors;
mod prompts;
mod value_objects;

pub use errors::StoryError;
pub use prompts::{pick_random_prompt, StoryInstructions, PROTAGONIST, RANDOM_STORY_PROMPTS};
pub use value_objects::{story_audio_file_name, StoryLength, StoryPrompt, StoryTitle, TITLE_MAX_CHARS};
