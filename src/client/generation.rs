//! 生成状态机
//!
//! ```text
//! idle -> generating(writing) -> generating(synthesizing) -> ready(text, audio)
//! generating(*) -> failed -> idle
//! ```

use crate::domain::voice::NarrationLanguage;

/// 生成进行中的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPhase {
    Writing,
    Synthesizing,
}

impl GenerationPhase {
    /// 按界面语言给出的进度文案
    pub fn label(&self, language: NarrationLanguage) -> &'static str {
        match (self, language) {
            (GenerationPhase::Writing, NarrationLanguage::Punjabi) => "ਕਹਾਣੀ ਲਿਖੀ ਜਾ ਰਹੀ ਹੈ...",
            (GenerationPhase::Writing, NarrationLanguage::Default) => "Writing your story...",
            (GenerationPhase::Synthesizing, NarrationLanguage::Punjabi) => "ਆਵਾਜ਼ ਬਣਾਈ ਜਾ ਰਹੀ ਹੈ...",
            (GenerationPhase::Synthesizing, NarrationLanguage::Default) => "Creating audio...",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenerationState {
    #[default]
    Idle,
    /// 文本在合成阶段已可展示
    Generating {
        phase: GenerationPhase,
        story_text: Option<String>,
    },
    Ready {
        story_text: String,
        audio_url: String,
    },
}

#[derive(Debug, Default)]
pub struct GenerationMachine {
    state: GenerationState,
}

impl GenerationMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, GenerationState::Generating { .. })
    }

    pub fn phase(&self) -> Option<GenerationPhase> {
        match self.state {
            GenerationState::Generating { phase, .. } => Some(phase),
            _ => None,
        }
    }

    /// 生成中显示的状态文案，空闲时为 None
    pub fn status_label(&self, language: NarrationLanguage) -> Option<&'static str> {
        self.phase().map(|phase| phase.label(language))
    }

    pub fn story_text(&self) -> Option<&str> {
        match &self.state {
            GenerationState::Generating { story_text, .. } => story_text.as_deref(),
            GenerationState::Ready { story_text, .. } => Some(story_text),
            GenerationState::Idle => None,
        }
    }

    pub fn audio_url(&self) -> Option<&str> {
        match &self.state {
            GenerationState::Ready { audio_url, .. } => Some(audio_url),
            _ => None,
        }
    }

    /// 开始新一轮生成，清空上一次的结果；进行中返回 false
    pub fn begin(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.state = GenerationState::Generating {
            phase: GenerationPhase::Writing,
            story_text: None,
        };
        true
    }

    /// 文本就绪，进入合成阶段
    pub fn text_ready(&mut self, text: String) -> bool {
        match self.state {
            GenerationState::Generating {
                phase: GenerationPhase::Writing,
                ..
            } => {
                self.state = GenerationState::Generating {
                    phase: GenerationPhase::Synthesizing,
                    story_text: Some(text),
                };
                true
            }
            _ => false,
        }
    }

    pub fn audio_ready(&mut self, audio_url: String) -> bool {
        match std::mem::take(&mut self.state) {
            GenerationState::Generating {
                phase: GenerationPhase::Synthesizing,
                story_text: Some(story_text),
            } => {
                self.state = GenerationState::Ready {
                    story_text,
                    audio_url,
                };
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// 任一阶段失败都回到 idle
    pub fn fail(&mut self) {
        self.state = GenerationState::Idle;
    }
}
