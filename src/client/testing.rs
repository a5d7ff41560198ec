//! 测试用的 StoryApi
//!
//! 内存中保存音色与故事，记录每次调用

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;
use uuid::Uuid;

use super::api::*;

#[derive(Default)]
struct FakeState {
    voices: Vec<Voice>,
    stories: Vec<Story>,
    calls: Vec<&'static str>,
    failing: HashSet<&'static str>,
    uploads: Vec<(String, Vec<u8>)>,
    clone_inputs: Vec<CloneVoiceInput>,
    registered: Vec<NewVoice>,
    story_requests: Vec<StoryRequest>,
    audio_requests: Vec<AudioRequest>,
}

#[derive(Default)]
pub struct FakeStoryApi {
    state: Mutex<FakeState>,
}

impl FakeStoryApi {
    pub fn with_voices(voices: Vec<Voice>) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().voices = voices;
        api
    }

    /// 指定端点返回 500
    pub fn fail(&self, endpoint: &'static str) {
        self.state.lock().unwrap().failing.insert(endpoint);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn uploads(&self) -> Vec<(String, Vec<u8>)> {
        self.state.lock().unwrap().uploads.clone()
    }

    pub fn clone_inputs(&self) -> Vec<CloneVoiceInput> {
        self.state.lock().unwrap().clone_inputs.clone()
    }

    pub fn registered(&self) -> Vec<NewVoice> {
        self.state.lock().unwrap().registered.clone()
    }

    pub fn story_requests(&self) -> Vec<StoryRequest> {
        self.state.lock().unwrap().story_requests.clone()
    }

    pub fn audio_requests(&self) -> Vec<AudioRequest> {
        self.state.lock().unwrap().audio_requests.clone()
    }

    fn enter(&self, endpoint: &'static str) -> Result<std::sync::MutexGuard<'_, FakeState>, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(endpoint);
        if state.failing.contains(endpoint) {
            return Err(ClientError::Status {
                status: 500,
                message: format!("{} failed", endpoint),
            });
        }
        Ok(state)
    }
}

pub fn voice(name: &str, relationship: &str, external_id: Option<&str>) -> Voice {
    Voice {
        id: Uuid::new_v4(),
        name: name.to_string(),
        relationship: relationship.to_string(),
        elevenlabs_voice_id: external_id.map(str::to_string),
        is_custom: relationship == "custom",
        audio_sample_url: None,
        language: None,
        created_at: "2026-01-01T00:00:00.000000Z".to_string(),
    }
}

#[async_trait]
impl StoryApi for FakeStoryApi {
    async fn ping(&self) -> Result<ServerStatus, ClientError> {
        self.enter("ping")?;
        Ok(ServerStatus {
            status: "ok".to_string(),
            version: "test".to_string(),
        })
    }

    async fn upload_sample(&self, key: &str, audio: Vec<u8>) -> Result<UploadedSample, ClientError> {
        let mut state = self.enter("upload_sample")?;
        let file_name = format!("{}-1.webm", key);
        state.uploads.push((key.to_string(), audio));
        Ok(UploadedSample {
            audio_url: format!("http://localhost:3000/storage/audio-samples/{}", file_name),
            file_name,
        })
    }

    async fn clone_voice(&self, input: &CloneVoiceInput) -> Result<String, ClientError> {
        let mut state = self.enter("clone_voice")?;
        state.clone_inputs.push(input.clone());
        Ok(format!("el-{}", state.clone_inputs.len()))
    }

    async fn delete_voice(&self, _elevenlabs_voice_id: &str) -> Result<(), ClientError> {
        self.enter("delete_voice")?;
        Ok(())
    }

    async fn list_voices(&self) -> Result<Vec<Voice>, ClientError> {
        let state = self.enter("list_voices")?;
        Ok(state.voices.clone())
    }

    async fn register_voice(&self, new_voice: &NewVoice) -> Result<Voice, ClientError> {
        let mut state = self.enter("register_voice")?;
        state.registered.push(new_voice.clone());
        let mut created = voice(
            &new_voice.name,
            &new_voice.relationship,
            new_voice.elevenlabs_voice_id.as_deref(),
        );
        created.is_custom = new_voice.is_custom;
        created.audio_sample_url = new_voice.audio_sample_url.clone();
        state.voices.push(created.clone());
        Ok(created)
    }

    async fn remove_voice(&self, id: Uuid) -> Result<(), ClientError> {
        let mut state = self.enter("remove_voice")?;
        state.voices.retain(|v| v.id != id);
        Ok(())
    }

    async fn generate_story_text(&self, request: &StoryRequest) -> Result<StoryText, ClientError> {
        let mut state = self.enter("generate_story_text")?;
        state.story_requests.push(request.clone());
        let voice = state.voices.iter().find(|v| v.id == request.voice_id).cloned();
        Ok(StoryText {
            story_text: format!("A story about {}", request.prompt),
            voice_id: request.voice_id,
            elevenlabs_voice_id: voice.and_then(|v| v.elevenlabs_voice_id),
            language: request.language.clone().unwrap_or_else(|| "en".to_string()),
        })
    }

    async fn generate_audio(&self, request: &AudioRequest) -> Result<GeneratedAudio, ClientError> {
        let mut state = self.enter("generate_audio")?;
        state.audio_requests.push(request.clone());
        let audio_url = "http://localhost:3000/storage/story-audio/story-1.mp3".to_string();
        state.stories.insert(
            0,
            Story {
                id: Uuid::new_v4(),
                title: request.prompt.clone(),
                content: request.story_text.clone(),
                voice_id: request.voice_id,
                narrator: "narrator".to_string(),
                audio_url: Some(audio_url.clone()),
                created_at: "2026-01-01T00:00:00.000000Z".to_string(),
            },
        );
        Ok(GeneratedAudio {
            audio_url,
            story_saved: true,
        })
    }

    async fn generate_story(&self, request: &StoryRequest) -> Result<GeneratedStory, ClientError> {
        let mut state = self.enter("generate_story")?;
        state.story_requests.push(request.clone());
        Ok(GeneratedStory {
            story_text: format!("A story about {}", request.prompt),
            audio_url: "http://localhost:3000/storage/story-audio/story-2.mp3".to_string(),
            story_saved: true,
        })
    }

    async fn list_stories(&self) -> Result<Vec<Story>, ClientError> {
        let state = self.enter("list_stories")?;
        Ok(state.stories.clone())
    }
}
