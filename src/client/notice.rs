//! 提示消息
//!
//! 失败只给出固定文案，不自动重试

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    GenerationFailed,
    CloneFailed,
    /// 首页克隆成功，提示再次点击生成故事
    ClonedFromHome,
    Cloned,
    CustomNameRequired,
    MicrophoneUnavailable,
    DeleteFailed,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::GenerationFailed => "Failed to generate story. Please try again.",
            Notice::CloneFailed => "Failed to clone voice. Please try again.",
            Notice::ClonedFromHome => {
                "Voice cloned successfully! Click the person again to generate a story."
            }
            Notice::Cloned => "Voice cloned successfully!",
            Notice::CustomNameRequired => "Please enter a name for the custom voice",
            Notice::MicrophoneUnavailable => {
                "Could not access microphone. Please allow microphone access."
            }
            Notice::DeleteFailed => "Failed to delete voice",
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::ClonedFromHome | Notice::Cloned)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
