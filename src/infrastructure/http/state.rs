//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CloneVoiceHandler, DeleteClonedVoiceHandler, GenerateAudioHandler, GenerateStoryHandler,
    GenerateStoryTextHandler, RegisterVoiceHandler, RemoveVoiceHandler, StorySettings,
    UploadSampleHandler,
    // Query handlers
    GetVoiceHandler, ListStoriesHandler, ListVoicesHandler,
    // Ports
    BlobStorePort, SpeechSynthesisPort, StoryRepositoryPort, TextGenerationPort,
    VoiceCloningPort, VoiceRepositoryPort,
};
use crate::domain::voice::LanguageTag;

/// 外部依赖集合
pub struct Ports {
    pub voice_repo: Arc<dyn VoiceRepositoryPort>,
    pub story_repo: Arc<dyn StoryRepositoryPort>,
    pub blob_store: Arc<dyn BlobStorePort>,
    pub cloning: Arc<dyn VoiceCloningPort>,
    pub synthesizer: Arc<dyn SpeechSynthesisPort>,
    pub text_generator: Arc<dyn TextGenerationPort>,
}

/// 应用状态
pub struct AppState {
    // ========== Command Handlers ==========
    pub clone_voice_handler: CloneVoiceHandler,
    pub delete_cloned_voice_handler: DeleteClonedVoiceHandler,
    pub register_voice_handler: RegisterVoiceHandler,
    pub remove_voice_handler: RemoveVoiceHandler,
    pub upload_sample_handler: UploadSampleHandler,
    pub generate_story_text_handler: GenerateStoryTextHandler,
    pub generate_audio_handler: GenerateAudioHandler,
    pub generate_story_handler: GenerateStoryHandler,

    // ========== Query Handlers ==========
    pub get_voice_handler: GetVoiceHandler,
    pub list_voices_handler: ListVoicesHandler,
    pub list_stories_handler: ListStoriesHandler,
}

impl AppState {
    /// 创建应用状态
    ///
    /// `clone_language` 是克隆请求未指定语言时发给供应商的语言
    pub fn new(ports: Ports, settings: StorySettings, clone_language: LanguageTag) -> Self {
        let Ports {
            voice_repo,
            story_repo,
            blob_store,
            cloning,
            synthesizer,
            text_generator,
        } = ports;

        Self {
            // Command handlers
            clone_voice_handler: CloneVoiceHandler::new(
                blob_store.clone(),
                cloning.clone(),
                clone_language,
            ),
            delete_cloned_voice_handler: DeleteClonedVoiceHandler::new(cloning.clone()),
            register_voice_handler: RegisterVoiceHandler::new(voice_repo.clone()),
            remove_voice_handler: RemoveVoiceHandler::new(voice_repo.clone(), cloning.clone()),
            upload_sample_handler: UploadSampleHandler::new(blob_store.clone()),
            generate_story_text_handler: GenerateStoryTextHandler::new(
                voice_repo.clone(),
                text_generator.clone(),
                settings.clone(),
            ),
            generate_audio_handler: GenerateAudioHandler::new(
                synthesizer.clone(),
                blob_store.clone(),
                story_repo.clone(),
                settings.default_language.clone(),
            ),
            generate_story_handler: GenerateStoryHandler::new(
                voice_repo.clone(),
                text_generator,
                synthesizer,
                blob_store,
                story_repo.clone(),
                settings,
            ),

            // Query handlers
            get_voice_handler: GetVoiceHandler::new(voice_repo.clone()),
            list_voices_handler: ListVoicesHandler::new(voice_repo.clone()),
            list_stories_handler: ListStoriesHandler::new(story_repo, voice_repo),
        }
    }
}
