//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod blob_store;
mod repositories;
mod speech_synthesis;
mod text_generation;
mod vendor;
mod voice_cloning;

#[cfg(test)]
pub mod testing;

pub use blob_store::{BlobStoreError, BlobStorePort, Bucket};
pub use repositories::{
    RepositoryError, StoryRecord, StoryRepositoryPort, VoiceRecord, VoiceRepositoryPort,
};
pub use speech_synthesis::{SpeechSynthesisPort, SynthesisRequest};
pub use text_generation::{CompletionRequest, TextGenerationPort};
pub use vendor::VendorError;
pub use voice_cloning::{CloneRequest, VoiceCloningPort};
