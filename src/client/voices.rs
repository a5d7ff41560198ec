//! 音色管理页
//!
//! 为预设成员或自定义名称录音、克隆并登记；删除音色

use std::sync::Arc;
use uuid::Uuid;

use super::api::{voice_for_relationship, ClientError, CloneVoiceInput, NewVoice, StoryApi, Voice};
use super::notice::Notice;
use super::recording::{RecordingError, RecordingMachine};
use crate::domain::voice::{PresetRelationship, CUSTOM_RELATIONSHIP, PRESET_RELATIONSHIPS};

/// 正在为谁录音
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingTarget {
    Preset(PresetRelationship),
    Custom,
}

pub struct VoicesScreen {
    api: Arc<dyn StoryApi>,
    voices: Vec<Voice>,
    recorder: RecordingMachine,
    target: Option<RecordingTarget>,
    custom_name: String,
}

impl VoicesScreen {
    pub fn new(api: Arc<dyn StoryApi>) -> Self {
        Self {
            api,
            voices: Vec::new(),
            recorder: RecordingMachine::new(),
            target: None,
            custom_name: String::new(),
        }
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// 预设成员及其已保存的音色
    pub fn family_voices(&self) -> Vec<(PresetRelationship, Option<&Voice>)> {
        PRESET_RELATIONSHIPS
            .iter()
            .map(|preset| (*preset, voice_for_relationship(&self.voices, preset.id)))
            .collect()
    }

    pub fn custom_voices(&self) -> Vec<&Voice> {
        self.voices.iter().filter(|v| v.is_custom).collect()
    }

    pub fn custom_name(&self) -> &str {
        &self.custom_name
    }

    pub fn set_custom_name(&mut self, name: impl Into<String>) {
        self.custom_name = name.into();
    }

    pub fn target(&self) -> Option<RecordingTarget> {
        self.target
    }

    pub fn recorder(&self) -> &RecordingMachine {
        &self.recorder
    }

    pub fn recorder_mut(&mut self) -> &mut RecordingMachine {
        &mut self.recorder
    }

    pub fn is_saving(&self) -> bool {
        self.recorder.is_cloning()
    }

    pub async fn load_voices(&mut self) {
        match self.api.list_voices().await {
            Ok(voices) => self.voices = voices,
            Err(e) => tracing::error!(error = %e, "Error loading voices"),
        }
    }

    pub fn start_preset_recording(
        &mut self,
        preset: PresetRelationship,
    ) -> Result<(), RecordingError> {
        self.recorder.start()?;
        self.target = Some(RecordingTarget::Preset(preset));
        Ok(())
    }

    /// 自定义录音需要先填写名称
    pub fn start_custom_recording(&mut self) -> Result<(), Notice> {
        if self.custom_name.trim().is_empty() {
            return Err(Notice::CustomNameRequired);
        }
        if let Err(e) = self.recorder.start() {
            tracing::debug!(error = %e, "Ignoring custom recording request");
            return Ok(());
        }
        self.target = Some(RecordingTarget::Custom);
        Ok(())
    }

    pub fn microphone_unavailable(&mut self) -> Notice {
        self.recorder.reset();
        self.target = None;
        Notice::MicrophoneUnavailable
    }

    /// 放弃录音
    pub fn cancel(&mut self) {
        self.recorder.reset();
        self.target = None;
        self.custom_name.clear();
    }

    /// 上传、克隆并登记当前录音
    ///
    /// 没有待保存的录音时返回 None
    pub async fn save_voice(&mut self) -> Option<Notice> {
        let target = self.target?;
        self.recorder.sample()?;

        let custom_name = self.custom_name.trim().to_string();
        if target == RecordingTarget::Custom && custom_name.is_empty() {
            return Some(Notice::CustomNameRequired);
        }

        let sample = self.recorder.submit().ok()?;
        match self.clone_and_register(target, &custom_name, sample.into_bytes()).await {
            Ok(()) => {
                let _ = self.recorder.clone_succeeded();
                self.target = None;
                self.custom_name.clear();
                self.load_voices().await;
                Some(Notice::Cloned)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error uploading voice");
                let _ = self.recorder.clone_failed();
                Some(Notice::CloneFailed)
            }
        }
    }

    async fn clone_and_register(
        &self,
        target: RecordingTarget,
        custom_name: &str,
        audio: Vec<u8>,
    ) -> Result<(), ClientError> {
        // 预设成员用 id 作为上传键、克隆描述和关系标识，名称用展示名
        let (name, key, relationship, is_custom) = match target {
            RecordingTarget::Preset(preset) => (preset.label, preset.id, preset.id, false),
            RecordingTarget::Custom => (custom_name, custom_name, CUSTOM_RELATIONSHIP, true),
        };

        let uploaded = self.api.upload_sample(key, audio).await?;

        let elevenlabs_voice_id = self
            .api
            .clone_voice(&CloneVoiceInput {
                audio_url: uploaded.audio_url.clone(),
                name: name.to_string(),
                relationship: key.to_string(),
                is_custom,
                language: None,
            })
            .await?;

        self.api
            .register_voice(&NewVoice {
                name: name.to_string(),
                relationship: relationship.to_string(),
                elevenlabs_voice_id: Some(elevenlabs_voice_id),
                audio_sample_url: Some(uploaded.audio_url),
                is_custom,
                language: None,
            })
            .await?;

        Ok(())
    }

    /// 删除音色；确认由调用方负责
    pub async fn delete_voice(&mut self, id: Uuid) -> Option<Notice> {
        if let Err(e) = self.api.remove_voice(id).await {
            tracing::error!(voice_id = %id, error = %e, "Error deleting voice");
            return Some(Notice::DeleteFailed);
        }
        self.load_voices().await;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{voice, FakeStoryApi};
    use crate::domain::voice::find_preset;

    fn record(screen: &mut VoicesScreen, audio: &[u8]) {
        let recorder = screen.recorder_mut();
        recorder.push_chunk(audio.to_vec()).unwrap();
        recorder.stop().unwrap();
    }

    #[tokio::test]
    async fn test_preset_voice_saved() {
        let api = Arc::new(FakeStoryApi::default());
        let mut screen = VoicesScreen::new(api.clone());
        let preset = find_preset("mummy").unwrap();

        screen.start_preset_recording(preset).unwrap();
        record(&mut screen, b"mummy-audio");
        assert_eq!(screen.save_voice().await, Some(Notice::Cloned));

        assert_eq!(api.uploads()[0].0, "mummy");
        let clone = &api.clone_inputs()[0];
        assert_eq!(clone.relationship, "mummy");
        assert!(clone.language.is_none());

        let registered = &api.registered()[0];
        assert_eq!(registered.name, "Mummy");
        assert_eq!(registered.relationship, "mummy");
        assert!(!registered.is_custom);

        assert!(screen.target().is_none());
        assert!(screen
            .family_voices()
            .iter()
            .any(|(p, v)| p.id == "mummy" && v.is_some()));
    }

    #[tokio::test]
    async fn test_custom_voice_uses_custom_relationship() {
        let api = Arc::new(FakeStoryApi::default());
        let mut screen = VoicesScreen::new(api.clone());
        screen.set_custom_name("  Uncle John ");

        screen.start_custom_recording().unwrap();
        record(&mut screen, b"uncle");
        assert_eq!(screen.save_voice().await, Some(Notice::Cloned));

        assert_eq!(api.uploads()[0].0, "Uncle John");
        let clone = &api.clone_inputs()[0];
        assert_eq!(clone.name, "Uncle John");
        assert_eq!(clone.relationship, "Uncle John");
        assert!(clone.is_custom);

        let registered = &api.registered()[0];
        assert_eq!(registered.relationship, "custom");
        assert!(registered.is_custom);

        assert_eq!(screen.custom_voices().len(), 1);
        assert_eq!(screen.custom_name(), "");
    }

    #[tokio::test]
    async fn test_custom_recording_requires_name() {
        let mut screen = VoicesScreen::new(Arc::new(FakeStoryApi::default()));
        screen.set_custom_name("   ");
        assert_eq!(
            screen.start_custom_recording(),
            Err(Notice::CustomNameRequired)
        );
        assert!(!screen.recorder().is_recording());
    }

    #[tokio::test]
    async fn test_custom_name_cleared_before_save() {
        let api = Arc::new(FakeStoryApi::default());
        let mut screen = VoicesScreen::new(api.clone());
        screen.set_custom_name("Aunt Sarah");
        screen.start_custom_recording().unwrap();
        record(&mut screen, b"aunt");
        screen.set_custom_name("");

        assert_eq!(screen.save_voice().await, Some(Notice::CustomNameRequired));
        assert!(api.uploads().is_empty());
        assert_eq!(screen.recorder().state().as_str(), "stopped");
    }

    #[tokio::test]
    async fn test_upload_failure_keeps_sample() {
        let api = Arc::new(FakeStoryApi::default());
        api.fail("upload_sample");
        let mut screen = VoicesScreen::new(api.clone());
        screen
            .start_preset_recording(find_preset("papa").unwrap())
            .unwrap();
        record(&mut screen, b"papa");

        assert_eq!(screen.save_voice().await, Some(Notice::CloneFailed));
        assert!(screen.recorder().sample().is_some());
        assert!(api.clone_inputs().is_empty());
    }

    #[tokio::test]
    async fn test_delete_voice_reloads_list() {
        let dadi = voice("Dadi", "dadi", Some("el-dadi"));
        let api = Arc::new(FakeStoryApi::with_voices(vec![dadi.clone()]));
        let mut screen = VoicesScreen::new(api.clone());
        screen.load_voices().await;

        assert_eq!(screen.delete_voice(dadi.id).await, None);
        assert!(screen.voices().is_empty());
        assert!(!api.calls().contains(&"delete_voice"));
    }

    #[tokio::test]
    async fn test_delete_failure_notice() {
        let dadi = voice("Dadi", "dadi", None);
        let api = Arc::new(FakeStoryApi::with_voices(vec![dadi.clone()]));
        api.fail("remove_voice");
        let mut screen = VoicesScreen::new(api);
        screen.load_voices().await;

        assert_eq!(screen.delete_voice(dadi.id).await, Some(Notice::DeleteFailed));
        assert_eq!(screen.voices().len(), 1);
    }
}
