//! 测试用的端口实现
//!
//! 全部基于内存，记录调用参数供断言使用

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use super::*;

// ============================================================================
// Repositories
// ============================================================================

#[derive(Default)]
pub struct InMemoryVoiceRepository {
    voices: Mutex<Vec<VoiceRecord>>,
}

impl InMemoryVoiceRepository {
    pub fn with(voices: Vec<VoiceRecord>) -> Self {
        Self {
            voices: Mutex::new(voices),
        }
    }

    pub fn snapshot(&self) -> Vec<VoiceRecord> {
        self.voices.lock().unwrap().clone()
    }
}

#[async_trait]
impl VoiceRepositoryPort for InMemoryVoiceRepository {
    async fn save(&self, voice: &VoiceRecord) -> Result<(), RepositoryError> {
        let mut voices = self.voices.lock().unwrap();
        voices.retain(|v| v.id != voice.id);
        voices.push(voice.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VoiceRecord>, RepositoryError> {
        Ok(self.voices.lock().unwrap().iter().find(|v| v.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<VoiceRecord>, RepositoryError> {
        let mut voices = self.snapshot();
        voices.sort_by_key(|v| v.created_at);
        Ok(voices)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut voices = self.voices.lock().unwrap();
        let before = voices.len();
        voices.retain(|v| v.id != id);
        Ok(voices.len() != before)
    }
}

#[derive(Default)]
pub struct InMemoryStoryRepository {
    stories: Mutex<Vec<StoryRecord>>,
    fail_saves: AtomicBool,
}

impl InMemoryStoryRepository {
    /// 所有写入都失败
    pub fn failing() -> Self {
        let repo = Self::default();
        repo.fail_saves.store(true, Ordering::SeqCst);
        repo
    }

    pub fn snapshot(&self) -> Vec<StoryRecord> {
        self.stories.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoryRepositoryPort for InMemoryStoryRepository {
    async fn save(&self, story: &StoryRecord) -> Result<(), RepositoryError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(RepositoryError::DatabaseError("disk I/O error".to_string()));
        }
        self.stories.lock().unwrap().push(story.clone());
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<StoryRecord>, RepositoryError> {
        let mut stories = self.snapshot();
        stories.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(stories)
    }
}

// ============================================================================
// Blob Store
// ============================================================================

#[derive(Default)]
pub struct MemoryBlobStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    fail_uploads: AtomicBool,
}

impl MemoryBlobStore {
    pub fn failing() -> Self {
        let store = Self::default();
        store.fail_uploads.store(true, Ordering::SeqCst);
        store
    }

    /// 以公开 URL 预置对象
    pub fn put_url(&self, url: &str, data: &[u8]) {
        self.objects
            .lock()
            .unwrap()
            .insert(url.to_string(), data.to_vec());
    }

    pub fn get(&self, bucket: Bucket, name: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&self.public_url(bucket, name))
            .cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl BlobStorePort for MemoryBlobStore {
    async fn upload(&self, bucket: Bucket, name: &str, data: &[u8]) -> Result<(), BlobStoreError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(BlobStoreError::IoError("bucket unavailable".to_string()));
        }
        let url = self.public_url(bucket, name);
        let mut objects = self.objects.lock().unwrap();
        if objects.contains_key(&url) {
            return Err(BlobStoreError::AlreadyExists {
                bucket: bucket.as_str(),
                name: name.to_string(),
            });
        }
        objects.insert(url, data.to_vec());
        Ok(())
    }

    fn public_url(&self, bucket: Bucket, name: &str) -> String {
        format!("http://blobs.test/storage/{}/{}", bucket.as_str(), name)
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, BlobStoreError> {
        self.objects
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| BlobStoreError::NotFound(url.to_string()))
    }
}

// ============================================================================
// Vendors
// ============================================================================

/// 语音克隆供应商
#[derive(Default)]
pub struct FakeVoiceVendor {
    pub clone_requests: Mutex<Vec<CloneRequest>>,
    pub deleted: Mutex<Vec<String>>,
    fail_status: Mutex<Option<u16>>,
}

impl FakeVoiceVendor {
    /// 删除返回 404，克隆返回 422
    pub fn failing() -> Self {
        Self::failing_with(404)
    }

    /// 删除返回指定状态码
    pub fn failing_with(status: u16) -> Self {
        let vendor = Self::default();
        *vendor.fail_status.lock().unwrap() = Some(status);
        vendor
    }

    fn failure(&self) -> Option<u16> {
        *self.fail_status.lock().unwrap()
    }
}

#[async_trait]
impl VoiceCloningPort for FakeVoiceVendor {
    async fn clone_voice(&self, request: CloneRequest) -> Result<String, VendorError> {
        if self.failure().is_some() {
            return Err(VendorError::Upstream {
                status: 422,
                body: "{\"detail\":\"sample too short\"}".to_string(),
            });
        }
        let mut requests = self.clone_requests.lock().unwrap();
        requests.push(request);
        Ok(format!("el-voice-{}", requests.len()))
    }

    async fn delete_voice(&self, external_voice_id: &str) -> Result<(), VendorError> {
        if let Some(status) = self.failure() {
            return Err(VendorError::Upstream {
                status,
                body: "voice_not_found".to_string(),
            });
        }
        self.deleted
            .lock()
            .unwrap()
            .push(external_voice_id.to_string());
        Ok(())
    }
}

/// 文本生成供应商，总是返回固定文本
pub struct FakeTextGenerator {
    pub text: String,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeTextGenerator {
    pub fn returning(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerationPort for FakeTextGenerator {
    async fn complete(&self, request: CompletionRequest) -> Result<String, VendorError> {
        self.requests.lock().unwrap().push(request);
        Ok(self.text.clone())
    }
}

/// 语音合成供应商
#[derive(Default)]
pub struct FakeSpeechSynthesizer {
    pub requests: Mutex<Vec<SynthesisRequest>>,
    fail: AtomicBool,
}

impl FakeSpeechSynthesizer {
    pub fn failing() -> Self {
        let synth = Self::default();
        synth.fail.store(true, Ordering::SeqCst);
        synth
    }
}

#[async_trait]
impl SpeechSynthesisPort for FakeSpeechSynthesizer {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<u8>, VendorError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(VendorError::Upstream {
                status: 401,
                body: "invalid api key".to_string(),
            });
        }
        self.requests.lock().unwrap().push(request);
        Ok(b"ID3fake-mp3".to_vec())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn voice_record(relationship: &str, external_id: Option<&str>, language: Option<&str>) -> VoiceRecord {
    let now = chrono::Utc::now();
    VoiceRecord {
        id: Uuid::new_v4(),
        name: relationship.to_string(),
        relationship: relationship.to_string(),
        elevenlabs_voice_id: external_id.map(str::to_string),
        is_custom: false,
        audio_sample_url: None,
        language: language.map(str::to_string),
        created_at: now,
        updated_at: now,
    }
}
