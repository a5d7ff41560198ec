//! 客户端
//!
//! - api: 服务端接口（StoryApi）与 HTTP 实现
//! - recording / generation: 录音与生成状态机
//! - home / voices: 首页与音色管理页
//! - notice: 失败与成功提示

mod api;
mod generation;
mod home;
mod notice;
mod recording;
mod voices;

#[cfg(test)]
mod testing;

pub use api::{
    voice_for_relationship, AudioRequest, ClientError, CloneVoiceInput, GeneratedAudio,
    GeneratedStory, HttpStoryApi, NewVoice, ServerStatus, Story, StoryApi, StoryRequest,
    StoryText, UploadedSample, Voice, SAMPLE_CONTENT_TYPE,
};
pub use generation::{GenerationMachine, GenerationPhase, GenerationState};
pub use home::{HomeScreen, PersonOutcome, PUNJABI_TRANSCRIPT};
pub use notice::Notice;
pub use recording::{AudioSample, RecordingError, RecordingMachine, RecordingState};
pub use voices::{RecordingTarget, VoicesScreen};
