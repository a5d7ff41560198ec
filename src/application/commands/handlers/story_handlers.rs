//! Story Command Handlers
//!
//! 两条生成流程共享同一套步骤：
//! 1. 查找音色、解析讲述语言、调用语言模型写故事
//! 2. 合成音频、上传、尽力保存故事记录
//!
//! 一次性流程在调用语言模型前就确认音色已克隆

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{GenerateAudio, GenerateStory, GenerateStoryText};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    BlobStorePort, Bucket, CompletionRequest, SpeechSynthesisPort, StoryRecord,
    StoryRepositoryPort, SynthesisRequest, TextGenerationPort, VoiceRecord, VoiceRepositoryPort,
};
use crate::domain::story::{
    story_audio_file_name, StoryError, StoryInstructions, StoryLength, StoryPrompt, StoryTitle,
};
use crate::domain::voice::{resolve_language, ExternalVoiceId, LanguageTag};

/// 故事生成参数
#[derive(Debug, Clone)]
pub struct StorySettings {
    /// 音色与请求都未指定语言时使用
    pub default_language: LanguageTag,
    /// 两步流程（短篇）使用的模型
    pub short_story_model: String,
    /// 一次性流程（长篇）使用的模型
    pub long_story_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for StorySettings {
    fn default() -> Self {
        Self {
            default_language: LanguageTag::english(),
            short_story_model: "gpt-4o-mini".to_string(),
            long_story_model: "gpt-4".to_string(),
            temperature: 0.8,
            max_tokens: 1000,
        }
    }
}

impl StorySettings {
    fn model_for(&self, length: StoryLength) -> &str {
        match length {
            StoryLength::Short => &self.short_story_model,
            StoryLength::Long => &self.long_story_model,
        }
    }
}

// ============================================================================
// Shared steps
// ============================================================================

/// 写好的故事
struct WrittenStory {
    voice: VoiceRecord,
    language: LanguageTag,
    text: String,
}

/// 第一步：写故事
struct StoryWriter {
    voice_repo: Arc<dyn VoiceRepositoryPort>,
    text_generator: Arc<dyn TextGenerationPort>,
    settings: StorySettings,
}

impl StoryWriter {
    /// 音色不存在时不调用任何外部服务
    async fn find_voice(&self, voice_id: Uuid) -> Result<VoiceRecord, ApplicationError> {
        self.voice_repo
            .find_by_id(voice_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Voice", voice_id))
    }

    async fn write(
        &self,
        voice: VoiceRecord,
        prompt: &StoryPrompt,
        requested_language: Option<&str>,
        length: StoryLength,
    ) -> Result<WrittenStory, ApplicationError> {
        let language = resolve_language(
            voice.language.as_deref(),
            requested_language,
            &self.settings.default_language,
        );
        let instructions = StoryInstructions::compose(language.narration(), length, prompt);

        let text = self
            .text_generator
            .complete(CompletionRequest {
                model: self.settings.model_for(length).to_string(),
                system: instructions.system,
                user: instructions.user,
                temperature: self.settings.temperature,
                max_tokens: self.settings.max_tokens,
            })
            .await?;

        if text.trim().is_empty() {
            return Err(ApplicationError::UpstreamError(
                "Language model returned an empty story".to_string(),
            ));
        }

        tracing::info!(
            voice_id = %voice.id,
            language = %language,
            length = ?length,
            chars = text.chars().count(),
            "Story text generated"
        );

        Ok(WrittenStory {
            voice,
            language,
            text,
        })
    }
}

/// 朗读结果
struct NarratedStory {
    audio_url: String,
    story_saved: bool,
}

/// 第二步：合成、上传、保存
struct StoryNarrator {
    synthesizer: Arc<dyn SpeechSynthesisPort>,
    blob_store: Arc<dyn BlobStorePort>,
    story_repo: Arc<dyn StoryRepositoryPort>,
}

impl StoryNarrator {
    async fn narrate(
        &self,
        text: &str,
        external_voice_id: &ExternalVoiceId,
        language: &LanguageTag,
        voice_id: Option<Uuid>,
        title: StoryTitle,
    ) -> Result<NarratedStory, ApplicationError> {
        let audio = self
            .synthesizer
            .synthesize(SynthesisRequest {
                text: text.to_string(),
                external_voice_id: external_voice_id.to_string(),
                language_code: language
                    .narration()
                    .synthesis_language_code()
                    .map(str::to_string),
            })
            .await?;

        if audio.is_empty() {
            return Err(ApplicationError::UpstreamError(
                "Speech synthesis returned no audio".to_string(),
            ));
        }

        let now = Utc::now();
        let file_name = story_audio_file_name(now.timestamp_millis());
        self.blob_store
            .upload(Bucket::StoryAudio, &file_name, &audio)
            .await?;
        let audio_url = self.blob_store.public_url(Bucket::StoryAudio, &file_name);

        let story = StoryRecord {
            id: Uuid::new_v4(),
            title: title.into_inner(),
            content: text.to_string(),
            voice_id,
            audio_url: Some(audio_url.clone()),
            created_at: now,
        };

        // 故事记录尽力保存：失败只记录日志，音频 URL 照常返回
        let story_saved = match self.story_repo.save(&story).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    story_id = %story.id,
                    audio_url = %audio_url,
                    error = %e,
                    "Failed to save story record"
                );
                false
            }
        };

        tracing::info!(
            story_id = %story.id,
            file_name = %file_name,
            audio_size = audio.len(),
            story_saved,
            "Story audio published"
        );

        Ok(NarratedStory {
            audio_url,
            story_saved,
        })
    }
}

fn require_external_id(voice: &VoiceRecord) -> Result<ExternalVoiceId, ApplicationError> {
    let id = voice
        .elevenlabs_voice_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| {
            ApplicationError::validation(format!("Voice {} has not been cloned yet", voice.id))
        })?;
    Ok(ExternalVoiceId::new(id)?)
}

// ============================================================================
// GenerateStoryText
// ============================================================================

/// 故事文本响应
#[derive(Debug, Clone)]
pub struct StoryTextResponse {
    pub story_text: String,
    pub voice_id: Uuid,
    pub elevenlabs_voice_id: Option<String>,
    pub language: String,
}

/// GenerateStoryText Handler（短篇）
pub struct GenerateStoryTextHandler {
    writer: StoryWriter,
}

impl GenerateStoryTextHandler {
    pub fn new(
        voice_repo: Arc<dyn VoiceRepositoryPort>,
        text_generator: Arc<dyn TextGenerationPort>,
        settings: StorySettings,
    ) -> Self {
        Self {
            writer: StoryWriter {
                voice_repo,
                text_generator,
                settings,
            },
        }
    }

    pub async fn handle(
        &self,
        command: GenerateStoryText,
    ) -> Result<StoryTextResponse, ApplicationError> {
        let prompt = StoryPrompt::new(command.prompt)?;
        let voice = self.writer.find_voice(command.voice_id).await?;
        let story = self
            .writer
            .write(
                voice,
                &prompt,
                command.language.as_deref(),
                StoryLength::Short,
            )
            .await?;

        Ok(StoryTextResponse {
            story_text: story.text,
            voice_id: story.voice.id,
            elevenlabs_voice_id: story.voice.elevenlabs_voice_id,
            language: story.language.to_string(),
        })
    }
}

// ============================================================================
// GenerateAudio
// ============================================================================

/// 音频响应
#[derive(Debug, Clone)]
pub struct AudioResponse {
    pub audio_url: String,
    pub story_saved: bool,
}

/// GenerateAudio Handler
pub struct GenerateAudioHandler {
    narrator: StoryNarrator,
    default_language: LanguageTag,
}

impl GenerateAudioHandler {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesisPort>,
        blob_store: Arc<dyn BlobStorePort>,
        story_repo: Arc<dyn StoryRepositoryPort>,
        default_language: LanguageTag,
    ) -> Self {
        Self {
            narrator: StoryNarrator {
                synthesizer,
                blob_store,
                story_repo,
            },
            default_language,
        }
    }

    pub async fn handle(&self, command: GenerateAudio) -> Result<AudioResponse, ApplicationError> {
        if command.story_text.trim().is_empty() {
            return Err(StoryError::EmptyText.into());
        }
        if command.elevenlabs_voice_id.trim().is_empty() {
            return Err(ApplicationError::validation("elevenlabsVoiceId is required"));
        }
        let external_id = ExternalVoiceId::new(command.elevenlabs_voice_id)?;
        let prompt = StoryPrompt::new(command.prompt)?;
        let language = resolve_language(None, command.language.as_deref(), &self.default_language);

        let narrated = self
            .narrator
            .narrate(
                &command.story_text,
                &external_id,
                &language,
                command.voice_id,
                prompt.title(),
            )
            .await?;

        Ok(AudioResponse {
            audio_url: narrated.audio_url,
            story_saved: narrated.story_saved,
        })
    }
}

// ============================================================================
// GenerateStory
// ============================================================================

/// 一次性流程响应
#[derive(Debug, Clone)]
pub struct GenerateStoryResponse {
    pub story_text: String,
    pub audio_url: String,
    pub story_saved: bool,
}

/// GenerateStory Handler（长篇）
pub struct GenerateStoryHandler {
    writer: StoryWriter,
    narrator: StoryNarrator,
}

impl GenerateStoryHandler {
    pub fn new(
        voice_repo: Arc<dyn VoiceRepositoryPort>,
        text_generator: Arc<dyn TextGenerationPort>,
        synthesizer: Arc<dyn SpeechSynthesisPort>,
        blob_store: Arc<dyn BlobStorePort>,
        story_repo: Arc<dyn StoryRepositoryPort>,
        settings: StorySettings,
    ) -> Self {
        Self {
            writer: StoryWriter {
                voice_repo,
                text_generator,
                settings,
            },
            narrator: StoryNarrator {
                synthesizer,
                blob_store,
                story_repo,
            },
        }
    }

    pub async fn handle(
        &self,
        command: GenerateStory,
    ) -> Result<GenerateStoryResponse, ApplicationError> {
        let prompt = StoryPrompt::new(command.prompt)?;
        let voice = self.writer.find_voice(command.voice_id).await?;
        let external_id = require_external_id(&voice)?;
        let story = self
            .writer
            .write(
                voice,
                &prompt,
                command.language.as_deref(),
                StoryLength::Long,
            )
            .await?;

        let narrated = self
            .narrator
            .narrate(
                &story.text,
                &external_id,
                &story.language,
                Some(story.voice.id),
                prompt.title(),
            )
            .await?;

        Ok(GenerateStoryResponse {
            story_text: story.text,
            audio_url: narrated.audio_url,
            story_saved: narrated.story_saved,
        })
    }
}
