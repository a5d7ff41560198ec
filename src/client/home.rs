//! 首页
//!
//! 点击家庭成员：
//! - 尚无音色：打开录音界面，克隆后登记
//! - 已有音色：随机挑选题目，走两步生成流程，完成后刷新故事列表
//!
//! 生成或克隆进行中时所有触发按钮禁用

use std::sync::Arc;
use uuid::Uuid;

use super::api::{
    voice_for_relationship, AudioRequest, ClientError, CloneVoiceInput, NewVoice, Story,
    StoryApi, StoryRequest, Voice,
};
use super::generation::GenerationMachine;
use super::notice::Notice;
use super::recording::RecordingMachine;
use crate::domain::story::pick_random_prompt;
use crate::domain::voice::{
    find_preset, LanguageTag, PresetRelationship, PRESET_RELATIONSHIPS, PUNJABI_LANGUAGE_CODE,
};

/// 录音时展示给朗读者的文本
pub const PUNJABI_TRANSCRIPT: &str = "ਮੇਰੀ ਪਿਆਰੀ ਲਿਵ, ਤੂੰ ਸਾਡੇ ਪਰਿਵਾਰ ਦਾ ਸਭ ਤੋਂ ਕੀਮਤੀ ਤੋਹਫ਼ਾ ਹੈਂ। ਹਰ ਦਿਨ ਤੇਰੇ ਨਾਲ ਇੱਕ ਨਵਾਂ ਅਨੁਭਵ ਹੈ। ਮੈਂ ਤੈਨੂੰ ਬਹੁਤ ਪਿਆਰ ਕਰਦੀ ਹਾਂ।";

/// 点击家庭成员的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonOutcome {
    /// 有请求在进行中，忽略点击
    Ignored,
    RecorderOpened(PresetRelationship),
    StoryReady { audio_url: String },
}

pub struct HomeScreen {
    api: Arc<dyn StoryApi>,
    voices: Vec<Voice>,
    stories: Vec<Story>,
    language: LanguageTag,
    generation: GenerationMachine,
    recorder: RecordingMachine,
    recording_for: Option<PresetRelationship>,
}

impl HomeScreen {
    pub fn new(api: Arc<dyn StoryApi>) -> Self {
        Self {
            api,
            voices: Vec::new(),
            stories: Vec::new(),
            language: LanguageTag::punjabi(),
            generation: GenerationMachine::new(),
            recorder: RecordingMachine::new(),
            recording_for: None,
        }
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn language(&self) -> &LanguageTag {
        &self.language
    }

    pub fn set_language(&mut self, language: LanguageTag) {
        self.language = language;
    }

    pub fn generation(&self) -> &GenerationMachine {
        &self.generation
    }

    /// 当前语言下的进度文案
    pub fn status_label(&self) -> Option<&'static str> {
        self.generation.status_label(self.language.narration())
    }

    pub fn recorder(&self) -> &RecordingMachine {
        &self.recorder
    }

    pub fn recorder_mut(&mut self) -> &mut RecordingMachine {
        &mut self.recorder
    }

    pub fn recording_for(&self) -> Option<PresetRelationship> {
        self.recording_for
    }

    pub fn is_busy(&self) -> bool {
        self.generation.is_busy() || self.recorder.is_cloning()
    }

    /// 预设成员及其音色（可能没有）
    pub fn people(&self) -> Vec<(PresetRelationship, Option<&Voice>)> {
        PRESET_RELATIONSHIPS
            .iter()
            .map(|preset| (*preset, voice_for_relationship(&self.voices, preset.id)))
            .collect()
    }

    /// 加载失败只记日志，保留原列表
    pub async fn load_voices(&mut self) {
        match self.api.list_voices().await {
            Ok(voices) => self.voices = voices,
            Err(e) => tracing::error!(error = %e, "Error loading voices"),
        }
    }

    pub async fn load_stories(&mut self) {
        match self.api.list_stories().await {
            Ok(stories) => self.stories = stories,
            Err(e) => tracing::error!(error = %e, "Error loading stories"),
        }
    }

    pub async fn refresh(&mut self) {
        self.load_voices().await;
        self.load_stories().await;
    }

    /// 按 id 点击预设成员
    pub async fn click_person_by_id(&mut self, preset_id: &str) -> Result<PersonOutcome, Notice> {
        match find_preset(preset_id) {
            Some(preset) => self.click_person(preset).await,
            None => Ok(PersonOutcome::Ignored),
        }
    }

    pub async fn click_person(
        &mut self,
        preset: PresetRelationship,
    ) -> Result<PersonOutcome, Notice> {
        if self.is_busy() {
            return Ok(PersonOutcome::Ignored);
        }

        let voice_id = match voice_for_relationship(&self.voices, preset.id) {
            Some(voice) => voice.id,
            None => {
                self.recorder.reset();
                self.recording_for = Some(preset);
                return Ok(PersonOutcome::RecorderOpened(preset));
            }
        };

        let prompt = pick_random_prompt(&mut rand::thread_rng());
        let audio_url = self.generate_for(voice_id, prompt).await?;
        Ok(PersonOutcome::StoryReady { audio_url })
    }

    async fn generate_for(&mut self, voice_id: Uuid, prompt: &str) -> Result<String, Notice> {
        if !self.generation.begin() {
            return Err(Notice::GenerationFailed);
        }

        match self.run_two_step(voice_id, prompt).await {
            Ok(audio_url) => {
                self.load_stories().await;
                Ok(audio_url)
            }
            Err(e) => {
                tracing::error!(voice_id = %voice_id, error = %e, "Error generating story");
                self.generation.fail();
                Err(Notice::GenerationFailed)
            }
        }
    }

    async fn run_two_step(&mut self, voice_id: Uuid, prompt: &str) -> Result<String, ClientError> {
        let text = self
            .api
            .generate_story_text(&StoryRequest {
                voice_id,
                prompt: prompt.to_string(),
                language: Some(self.language.as_str().to_string()),
            })
            .await?;
        self.generation.text_ready(text.story_text.clone());

        let audio = self
            .api
            .generate_audio(&AudioRequest {
                story_text: text.story_text,
                voice_id: Some(text.voice_id),
                elevenlabs_voice_id: text.elevenlabs_voice_id.unwrap_or_default(),
                language: Some(text.language),
                prompt: prompt.to_string(),
            })
            .await?;

        if !audio.story_saved {
            tracing::warn!(voice_id = %voice_id, "Story audio ready but record not saved");
        }

        self.generation.audio_ready(audio.audio_url.clone());
        Ok(audio.audio_url)
    }

    /// 平台拒绝麦克风权限
    pub fn microphone_unavailable(&mut self) -> Notice {
        self.recorder.reset();
        Notice::MicrophoneUnavailable
    }

    /// 关闭录音界面
    pub fn close_recorder(&mut self) {
        self.recorder.reset();
        self.recording_for = None;
    }

    /// 提交录音：上传样本、克隆（旁遮普语）、登记音色
    ///
    /// 没有待提交的样本时返回 None
    pub async fn submit_voice_clone(&mut self) -> Option<Notice> {
        let preset = self.recording_for?;
        let sample = self.recorder.submit().ok()?;

        match self.clone_and_register(preset, sample.into_bytes()).await {
            Ok(()) => {
                let _ = self.recorder.clone_succeeded();
                self.recording_for = None;
                self.load_voices().await;
                Some(Notice::ClonedFromHome)
            }
            Err(e) => {
                tracing::error!(relationship = preset.id, error = %e, "Error cloning voice");
                let _ = self.recorder.clone_failed();
                Some(Notice::CloneFailed)
            }
        }
    }

    async fn clone_and_register(
        &self,
        preset: PresetRelationship,
        audio: Vec<u8>,
    ) -> Result<(), ClientError> {
        let uploaded = self.api.upload_sample(preset.id, audio).await?;

        let elevenlabs_voice_id = self
            .api
            .clone_voice(&CloneVoiceInput {
                audio_url: uploaded.audio_url.clone(),
                name: preset.label.to_string(),
                relationship: preset.id.to_string(),
                is_custom: false,
                language: Some(PUNJABI_LANGUAGE_CODE.to_string()),
            })
            .await?;

        self.api
            .register_voice(&NewVoice {
                name: preset.label.to_string(),
                relationship: preset.id.to_string(),
                elevenlabs_voice_id: Some(elevenlabs_voice_id),
                audio_sample_url: Some(uploaded.audio_url),
                is_custom: false,
                language: None,
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{voice, FakeStoryApi};
    use crate::domain::story::RANDOM_STORY_PROMPTS;

    async fn screen(api: Arc<FakeStoryApi>) -> HomeScreen {
        let mut home = HomeScreen::new(api);
        home.refresh().await;
        home
    }

    fn record(home: &mut HomeScreen, audio: &[u8]) {
        let recorder = home.recorder_mut();
        recorder.start().unwrap();
        recorder.push_chunk(audio.to_vec()).unwrap();
        recorder.stop().unwrap();
    }

    #[tokio::test]
    async fn test_defaults_to_punjabi() {
        let home = HomeScreen::new(Arc::new(FakeStoryApi::default()));
        assert_eq!(home.language().as_str(), "pa");
        assert_eq!(home.people().len(), 6);
    }

    #[tokio::test]
    async fn test_person_without_voice_opens_recorder() {
        let api = Arc::new(FakeStoryApi::default());
        let mut home = screen(api.clone()).await;

        let outcome = home.click_person_by_id("dadi").await.unwrap();
        assert!(matches!(outcome, PersonOutcome::RecorderOpened(p) if p.id == "dadi"));
        assert!(!api.calls().contains(&"generate_story_text"));
    }

    #[tokio::test]
    async fn test_person_with_voice_runs_two_step_flow() {
        let papa = voice("Papa", "PAPA", Some("el-papa"));
        let api = Arc::new(FakeStoryApi::with_voices(vec![papa.clone()]));
        let mut home = screen(api.clone()).await;
        home.set_language(LanguageTag::english());

        let outcome = home.click_person_by_id("papa").await.unwrap();
        assert!(matches!(outcome, PersonOutcome::StoryReady { .. }));

        let text_request = &api.story_requests()[0];
        assert_eq!(text_request.voice_id, papa.id);
        assert_eq!(text_request.language.as_deref(), Some("en"));
        assert!(RANDOM_STORY_PROMPTS.iter().any(|p| *p == text_request.prompt));

        let audio_request = &api.audio_requests()[0];
        assert_eq!(audio_request.elevenlabs_voice_id, "el-papa");
        assert_eq!(audio_request.prompt, text_request.prompt);
        assert_eq!(audio_request.voice_id, Some(papa.id));

        assert_eq!(home.stories().len(), 1);
        assert!(home.generation().audio_url().is_some());
        assert!(!home.is_busy());
        assert_eq!(api.calls().last(), Some(&"list_stories"));
    }

    #[tokio::test]
    async fn test_generation_failure_surfaces_notice() {
        let api = Arc::new(FakeStoryApi::with_voices(vec![voice(
            "Mummy",
            "mummy",
            Some("el-m"),
        )]));
        api.fail("generate_audio");
        let mut home = screen(api).await;

        let result = home.click_person_by_id("mummy").await;
        assert_eq!(result, Err(Notice::GenerationFailed));
        assert!(!home.generation().is_busy());
        assert!(home.status_label().is_none());
    }

    #[tokio::test]
    async fn test_clone_from_home_registers_preset_voice() {
        let api = Arc::new(FakeStoryApi::default());
        let mut home = screen(api.clone()).await;
        home.click_person_by_id("nanu").await.unwrap();
        record(&mut home, b"webm-bytes");

        assert_eq!(home.submit_voice_clone().await, Some(Notice::ClonedFromHome));

        assert_eq!(api.uploads(), vec![("nanu".to_string(), b"webm-bytes".to_vec())]);
        let clone = &api.clone_inputs()[0];
        assert_eq!(clone.name, "Nanu");
        assert_eq!(clone.relationship, "nanu");
        assert!(!clone.is_custom);
        assert_eq!(clone.language.as_deref(), Some("pa"));

        let registered = &api.registered()[0];
        assert_eq!(registered.relationship, "nanu");
        assert_eq!(registered.elevenlabs_voice_id.as_deref(), Some("el-1"));
        assert!(registered.language.is_none());

        assert!(home.recording_for().is_none());
        assert!(home.people().iter().any(|(p, v)| p.id == "nanu" && v.is_some()));
    }

    #[tokio::test]
    async fn test_clone_failure_keeps_recording() {
        let api = Arc::new(FakeStoryApi::default());
        api.fail("clone_voice");
        let mut home = screen(api.clone()).await;
        home.click_person_by_id("dadu").await.unwrap();
        record(&mut home, b"sample");

        assert_eq!(home.submit_voice_clone().await, Some(Notice::CloneFailed));
        assert_eq!(home.recorder().state().as_str(), "stopped");
        assert!(home.recording_for().is_some());
        assert!(api.registered().is_empty());
    }

    #[tokio::test]
    async fn test_submit_without_sample_does_nothing() {
        let api = Arc::new(FakeStoryApi::default());
        let mut home = screen(api.clone()).await;
        home.click_person_by_id("dadu").await.unwrap();

        assert_eq!(home.submit_voice_clone().await, None);
        assert!(api.uploads().is_empty());
    }

    #[tokio::test]
    async fn test_clicks_ignored_while_cloning() {
        let api = Arc::new(FakeStoryApi::with_voices(vec![voice("Papa", "papa", Some("el"))]));
        let mut home = screen(api.clone()).await;
        home.click_person_by_id("dadi").await.unwrap();
        record(&mut home, b"sample");
        home.recorder_mut().submit().unwrap();

        assert_eq!(home.click_person_by_id("papa").await, Ok(PersonOutcome::Ignored));
        assert!(api.story_requests().is_empty());
    }

    #[tokio::test]
    async fn test_microphone_denied() {
        let mut home = HomeScreen::new(Arc::new(FakeStoryApi::default()));
        home.recorder_mut().start().unwrap();
        assert_eq!(home.microphone_unavailable(), Notice::MicrophoneUnavailable);
        assert!(!home.recorder().is_recording());
    }
}
