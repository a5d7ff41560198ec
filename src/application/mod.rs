//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（仓储、对象存储、语音克隆、语音合成、文本生成）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Story commands
    GenerateAudio,
    GenerateStory,
    GenerateStoryText,
    // Voice commands
    CloneVoice,
    DeleteClonedVoice,
    RegisterVoice,
    RemoveVoice,
    UploadSample,
    // Handlers
    handlers::{
        AudioResponse, CloneVoiceHandler, CloneVoiceResponse, DeleteClonedVoiceHandler,
        GenerateAudioHandler, GenerateStoryHandler, GenerateStoryResponse,
        GenerateStoryTextHandler, RegisterVoiceHandler, RemoveVoiceHandler, StorySettings,
        StoryTextResponse, UploadSampleHandler, UploadSampleResponse,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Blob store
    BlobStoreError,
    BlobStorePort,
    Bucket,
    // Repositories
    RepositoryError,
    StoryRecord,
    StoryRepositoryPort,
    VoiceRecord,
    VoiceRepositoryPort,
    // Vendors
    CloneRequest,
    CompletionRequest,
    SpeechSynthesisPort,
    SynthesisRequest,
    TextGenerationPort,
    VendorError,
    VoiceCloningPort,
};

pub use queries::{
    // Story queries
    ListStories,
    // Voice queries
    GetVoice,
    ListVoices,
    // Handlers
    handlers::{
        GetVoiceHandler, ListStoriesHandler, ListVoicesHandler, StoryResponse, VoiceResponse,
        UNKNOWN_NARRATOR,
    },
};
