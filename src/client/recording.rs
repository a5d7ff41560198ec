//! 录音状态机
//!
//! ```text
//! idle -> recording -> stopped(sample) -> re-record -> idle
//!                                      -> submit -> cloning -> idle
//!                                                           -> stopped(sample)  (克隆失败)
//! ```
//!
//! 麦克风采集由平台负责，这里只接收数据块

use thiserror::Error;

use super::api::SAMPLE_CONTENT_TYPE;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordingError {
    #[error("Cannot {event} while {state}")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },

    #[error("Recording captured no audio")]
    Empty,
}

/// 拼接完成的录音样本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSample {
    bytes: Vec<u8>,
}

impl AudioSample {
    fn from_chunks(chunks: Vec<Vec<u8>>) -> Self {
        Self {
            bytes: chunks.concat(),
        }
    }

    pub fn content_type(&self) -> &'static str {
        SAMPLE_CONTENT_TYPE
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RecordingState {
    #[default]
    Idle,
    Recording { chunks: Vec<Vec<u8>> },
    Stopped { sample: AudioSample },
    Cloning { sample: AudioSample },
}

impl RecordingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordingState::Idle => "idle",
            RecordingState::Recording { .. } => "recording",
            RecordingState::Stopped { .. } => "stopped",
            RecordingState::Cloning { .. } => "cloning",
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingMachine {
    state: RecordingState,
}

impl RecordingMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RecordingState {
        &self.state
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.state, RecordingState::Recording { .. })
    }

    pub fn is_cloning(&self) -> bool {
        matches!(self.state, RecordingState::Cloning { .. })
    }

    /// 待提交的样本
    pub fn sample(&self) -> Option<&AudioSample> {
        match &self.state {
            RecordingState::Stopped { sample } | RecordingState::Cloning { sample } => Some(sample),
            _ => None,
        }
    }

    fn invalid(&self, event: &'static str) -> RecordingError {
        RecordingError::InvalidTransition {
            state: self.state.as_str(),
            event,
        }
    }

    pub fn start(&mut self) -> Result<(), RecordingError> {
        match self.state {
            RecordingState::Idle => {
                self.state = RecordingState::Recording { chunks: Vec::new() };
                Ok(())
            }
            _ => Err(self.invalid("start recording")),
        }
    }

    /// 接收一个数据块，空块忽略
    pub fn push_chunk(&mut self, chunk: Vec<u8>) -> Result<(), RecordingError> {
        match &mut self.state {
            RecordingState::Recording { chunks } => {
                if !chunk.is_empty() {
                    chunks.push(chunk);
                }
                Ok(())
            }
            _ => Err(self.invalid("capture audio")),
        }
    }

    /// 结束录音并拼接样本；没有采到数据时回到 idle
    pub fn stop(&mut self) -> Result<&AudioSample, RecordingError> {
        let chunks = match std::mem::take(&mut self.state) {
            RecordingState::Recording { chunks } => chunks,
            other => {
                self.state = other;
                return Err(self.invalid("stop recording"));
            }
        };

        let sample = AudioSample::from_chunks(chunks);
        if sample.is_empty() {
            return Err(RecordingError::Empty);
        }

        self.state = RecordingState::Stopped { sample };
        match &self.state {
            RecordingState::Stopped { sample } => Ok(sample),
            _ => Err(self.invalid("stop recording")),
        }
    }

    /// 丢弃样本（重新录音前）
    pub fn discard(&mut self) -> Result<(), RecordingError> {
        match self.state {
            RecordingState::Stopped { .. } => {
                self.state = RecordingState::Idle;
                Ok(())
            }
            _ => Err(self.invalid("discard recording")),
        }
    }

    /// 提交克隆，返回需要上传的样本
    pub fn submit(&mut self) -> Result<AudioSample, RecordingError> {
        match std::mem::take(&mut self.state) {
            RecordingState::Stopped { sample } => {
                self.state = RecordingState::Cloning {
                    sample: sample.clone(),
                };
                Ok(sample)
            }
            other => {
                self.state = other;
                Err(self.invalid("submit recording"))
            }
        }
    }

    pub fn clone_succeeded(&mut self) -> Result<(), RecordingError> {
        match self.state {
            RecordingState::Cloning { .. } => {
                self.state = RecordingState::Idle;
                Ok(())
            }
            _ => Err(self.invalid("finish cloning")),
        }
    }

    /// 克隆失败，保留样本以便重试
    pub fn clone_failed(&mut self) -> Result<(), RecordingError> {
        match std::mem::take(&mut self.state) {
            RecordingState::Cloning { sample } => {
                self.state = RecordingState::Stopped { sample };
                Ok(())
            }
            other => {
                self.state = other;
                Err(self.invalid("fail cloning"))
            }
        }
    }

    /// 关闭录音界面，无论处于哪个状态
    pub fn reset(&mut self) {
        self.state = RecordingState::Idle;
    }
}
