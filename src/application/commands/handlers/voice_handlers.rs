//! Voice Command Handlers

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{
    CloneVoice, DeleteClonedVoice, RegisterVoice, RemoveVoice, UploadSample,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    BlobStorePort, Bucket, CloneRequest, VoiceCloningPort, VoiceRecord, VoiceRepositoryPort,
};
use crate::domain::voice::{
    sample_file_name, ExternalVoiceId, LanguageTag, RelationshipKey, VoiceName,
};

/// 上传给供应商时使用的样本文件名
const SAMPLE_UPLOAD_NAME: &str = "sample.webm";

// ============================================================================
// CloneVoice
// ============================================================================

/// 克隆音色响应
#[derive(Debug, Clone)]
pub struct CloneVoiceResponse {
    pub elevenlabs_voice_id: String,
}

/// CloneVoice Handler
pub struct CloneVoiceHandler {
    blob_store: Arc<dyn BlobStorePort>,
    cloning: Arc<dyn VoiceCloningPort>,
    default_language: LanguageTag,
}

impl CloneVoiceHandler {
    pub fn new(
        blob_store: Arc<dyn BlobStorePort>,
        cloning: Arc<dyn VoiceCloningPort>,
        default_language: LanguageTag,
    ) -> Self {
        Self {
            blob_store,
            cloning,
            default_language,
        }
    }

    pub async fn handle(&self, command: CloneVoice) -> Result<CloneVoiceResponse, ApplicationError> {
        let name = VoiceName::new(command.name)?;
        let relationship = RelationshipKey::new(command.relationship)?;
        if command.audio_url.trim().is_empty() {
            return Err(ApplicationError::validation("audioUrl is required"));
        }
        let language = match command.language.as_deref() {
            Some(tag) => LanguageTag::new(tag)?,
            None => self.default_language.clone(),
        };

        let audio = self.blob_store.fetch(&command.audio_url).await?;
        if audio.is_empty() {
            return Err(ApplicationError::validation("Audio sample is empty"));
        }

        let audio_size = audio.len();
        let external_id = self
            .cloning
            .clone_voice(CloneRequest {
                audio,
                file_name: SAMPLE_UPLOAD_NAME.to_string(),
                name: name.to_string(),
                relationship: relationship.to_string(),
                language: language.to_string(),
            })
            .await?;

        tracing::info!(
            name = %name,
            relationship = %relationship,
            is_custom = command.is_custom,
            language = %language,
            audio_size,
            elevenlabs_voice_id = %external_id,
            "Voice cloned"
        );

        Ok(CloneVoiceResponse {
            elevenlabs_voice_id: external_id,
        })
    }
}

// ============================================================================
// DeleteClonedVoice
// ============================================================================

/// DeleteClonedVoice Handler
///
/// 只删除供应商侧音色，不做本地幂等判断
pub struct DeleteClonedVoiceHandler {
    cloning: Arc<dyn VoiceCloningPort>,
}

impl DeleteClonedVoiceHandler {
    pub fn new(cloning: Arc<dyn VoiceCloningPort>) -> Self {
        Self { cloning }
    }

    pub async fn handle(&self, command: DeleteClonedVoice) -> Result<(), ApplicationError> {
        if command.elevenlabs_voice_id.trim().is_empty() {
            return Err(ApplicationError::validation("voiceId is required"));
        }
        let external_id = ExternalVoiceId::new(command.elevenlabs_voice_id)?;

        self.cloning.delete_voice(external_id.as_str()).await?;

        tracing::info!(elevenlabs_voice_id = %external_id, "Cloned voice deleted");
        Ok(())
    }
}

// ============================================================================
// RegisterVoice
// ============================================================================

/// RegisterVoice Handler
pub struct RegisterVoiceHandler {
    voice_repo: Arc<dyn VoiceRepositoryPort>,
}

impl RegisterVoiceHandler {
    pub fn new(voice_repo: Arc<dyn VoiceRepositoryPort>) -> Self {
        Self { voice_repo }
    }

    pub async fn handle(&self, command: RegisterVoice) -> Result<VoiceRecord, ApplicationError> {
        let name = VoiceName::new(command.name)?;
        let relationship = if command.is_custom {
            RelationshipKey::custom()
        } else {
            RelationshipKey::new(command.relationship)?
        };
        let language = command
            .language
            .as_deref()
            .filter(|tag| !tag.trim().is_empty())
            .map(LanguageTag::new)
            .transpose()?;
        let elevenlabs_voice_id = non_blank(command.elevenlabs_voice_id)
            .map(ExternalVoiceId::new)
            .transpose()?;
        let now = Utc::now();

        let voice = VoiceRecord {
            id: Uuid::new_v4(),
            name: name.into_inner(),
            relationship: relationship.into_inner(),
            elevenlabs_voice_id: elevenlabs_voice_id.map(|id| id.to_string()),
            is_custom: command.is_custom,
            audio_sample_url: non_blank(command.audio_sample_url),
            language: language.map(|tag| tag.to_string()),
            created_at: now,
            updated_at: now,
        };

        self.voice_repo.save(&voice).await?;

        tracing::info!(
            voice_id = %voice.id,
            name = %voice.name,
            relationship = %voice.relationship,
            "Voice registered"
        );

        Ok(voice)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ============================================================================
// RemoveVoice
// ============================================================================

/// RemoveVoice Handler
///
/// 有供应商音色 ID 时先删除供应商侧资源，再删除本地记录。
/// 供应商删除的任何非 2xx 响应（包括 404）都会保留本地记录
pub struct RemoveVoiceHandler {
    voice_repo: Arc<dyn VoiceRepositoryPort>,
    cloning: Arc<dyn VoiceCloningPort>,
}

impl RemoveVoiceHandler {
    pub fn new(voice_repo: Arc<dyn VoiceRepositoryPort>, cloning: Arc<dyn VoiceCloningPort>) -> Self {
        Self { voice_repo, cloning }
    }

    pub async fn handle(&self, command: RemoveVoice) -> Result<(), ApplicationError> {
        let voice_id = command.voice_id;

        let voice = self
            .voice_repo
            .find_by_id(voice_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Voice", voice_id))?;

        if let Some(external_id) = voice.elevenlabs_voice_id.as_deref() {
            if let Err(e) = self.cloning.delete_voice(external_id).await {
                tracing::warn!(
                    voice_id = %voice_id,
                    elevenlabs_voice_id = %external_id,
                    error = %e,
                    "Vendor refused cloned voice deletion, keeping record"
                );
                return Err(e.into());
            }
        }

        self.voice_repo.delete(voice_id).await?;

        tracing::info!(
            voice_id = %voice_id,
            name = %voice.name,
            had_clone = voice.elevenlabs_voice_id.is_some(),
            "Voice removed"
        );

        Ok(())
    }
}

// ============================================================================
// UploadSample
// ============================================================================

/// 上传样本响应
#[derive(Debug, Clone)]
pub struct UploadSampleResponse {
    pub file_name: String,
    pub audio_url: String,
}

/// UploadSample Handler
pub struct UploadSampleHandler {
    blob_store: Arc<dyn BlobStorePort>,
}

impl UploadSampleHandler {
    pub fn new(blob_store: Arc<dyn BlobStorePort>) -> Self {
        Self { blob_store }
    }

    pub async fn handle(&self, command: UploadSample) -> Result<UploadSampleResponse, ApplicationError> {
        let key = RelationshipKey::new(command.key)?;
        if command.data.is_empty() {
            return Err(ApplicationError::validation("Audio sample is empty"));
        }

        let file_name = sample_file_name(key.as_str(), Utc::now().timestamp_millis());
        self.blob_store
            .upload(Bucket::AudioSamples, &file_name, &command.data)
            .await?;
        let audio_url = self.blob_store.public_url(Bucket::AudioSamples, &file_name);

        tracing::info!(
            file_name = %file_name,
            size = command.data.len(),
            "Audio sample uploaded"
        );

        Ok(UploadSampleResponse {
            file_name,
            audio_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::testing::{
        voice_record, FakeVoiceVendor, InMemoryVoiceRepository, MemoryBlobStore,
    };

    fn clone_command(url: &str) -> CloneVoice {
        CloneVoice {
            audio_url: url.to_string(),
            name: "Mummy".to_string(),
            relationship: "mummy".to_string(),
            is_custom: false,
            language: None,
        }
    }

    #[tokio::test]
    async fn test_clone_voice_downloads_sample_and_clones() {
        let store = Arc::new(MemoryBlobStore::default());
        store.put_url("http://blobs.test/sample.webm", b"webm-bytes");
        let vendor = Arc::new(FakeVoiceVendor::default());
        let handler = CloneVoiceHandler::new(store, vendor.clone(), LanguageTag::punjabi());

        let result = handler
            .handle(clone_command("http://blobs.test/sample.webm"))
            .await
            .unwrap();

        assert_eq!(result.elevenlabs_voice_id, "el-voice-1");
        let requests = vendor.clone_requests.lock().unwrap();
        assert_eq!(requests[0].audio, b"webm-bytes");
        assert_eq!(requests[0].file_name, "sample.webm");
        // 未指定语言时使用克隆默认语言
        assert_eq!(requests[0].language, "pa");
    }

    #[tokio::test]
    async fn test_clone_voice_respects_language() {
        let store = Arc::new(MemoryBlobStore::default());
        store.put_url("http://blobs.test/a.webm", b"x");
        let vendor = Arc::new(FakeVoiceVendor::default());
        let handler = CloneVoiceHandler::new(store, vendor.clone(), LanguageTag::punjabi());

        let mut command = clone_command("http://blobs.test/a.webm");
        command.language = Some("en".to_string());
        handler.handle(command).await.unwrap();

        assert_eq!(vendor.clone_requests.lock().unwrap()[0].language, "en");
    }

    #[tokio::test]
    async fn test_clone_voice_vendor_failure_is_upstream_error() {
        let store = Arc::new(MemoryBlobStore::default());
        store.put_url("http://blobs.test/a.webm", b"x");
        let handler = CloneVoiceHandler::new(
            store,
            Arc::new(FakeVoiceVendor::failing()),
            LanguageTag::punjabi(),
        );

        let err = handler
            .handle(clone_command("http://blobs.test/a.webm"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::UpstreamError(_)));
    }

    #[tokio::test]
    async fn test_clone_voice_missing_sample_is_storage_error() {
        let handler = CloneVoiceHandler::new(
            Arc::new(MemoryBlobStore::default()),
            Arc::new(FakeVoiceVendor::default()),
            LanguageTag::punjabi(),
        );

        let err = handler
            .handle(clone_command("http://blobs.test/missing.webm"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::StorageError(_)));
    }

    #[tokio::test]
    async fn test_clone_voice_requires_name() {
        let handler = CloneVoiceHandler::new(
            Arc::new(MemoryBlobStore::default()),
            Arc::new(FakeVoiceVendor::default()),
            LanguageTag::punjabi(),
        );
        let mut command = clone_command("http://blobs.test/a.webm");
        command.name = " ".to_string();

        let err = handler.handle(command).await.unwrap_err();
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_delete_cloned_voice_propagates_vendor_failure() {
        let handler = DeleteClonedVoiceHandler::new(Arc::new(FakeVoiceVendor::failing()));
        let err = handler
            .handle(DeleteClonedVoice {
                elevenlabs_voice_id: "el-1".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::UpstreamError(_)));
    }

    #[tokio::test]
    async fn test_delete_cloned_voice_rejects_path_like_id() {
        let vendor = Arc::new(FakeVoiceVendor::default());
        let handler = DeleteClonedVoiceHandler::new(vendor.clone());

        for id in ["../../v1/history/abc", "abc/def", "abc?x=1"] {
            let err = handler
                .handle(DeleteClonedVoice {
                    elevenlabs_voice_id: id.to_string(),
                })
                .await
                .unwrap_err();
            assert!(err.is_client_error(), "{} accepted", id);
        }
        assert!(vendor.deleted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_rejects_path_like_external_id() {
        let repo = Arc::new(InMemoryVoiceRepository::default());
        let handler = RegisterVoiceHandler::new(repo.clone());

        let err = handler
            .handle(RegisterVoice {
                name: "Papa".to_string(),
                relationship: "papa".to_string(),
                elevenlabs_voice_id: Some("../voices/other".to_string()),
                audio_sample_url: None,
                is_custom: false,
                language: None,
            })
            .await
            .unwrap_err();

        assert!(err.is_client_error());
        assert!(repo.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_register_custom_voice_uses_custom_relationship() {
        let repo = Arc::new(InMemoryVoiceRepository::default());
        let handler = RegisterVoiceHandler::new(repo.clone());

        let voice = handler
            .handle(RegisterVoice {
                name: "Aunt Jo".to_string(),
                relationship: "Aunt Jo".to_string(),
                elevenlabs_voice_id: Some("el-9".to_string()),
                audio_sample_url: Some(String::new()),
                is_custom: true,
                language: None,
            })
            .await
            .unwrap();

        assert_eq!(voice.relationship, "custom");
        assert!(voice.is_custom);
        assert_eq!(voice.audio_sample_url, None);
        assert_eq!(repo.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_voice_without_clone_skips_vendor() {
        let voice = voice_record("mummy", None, None);
        let repo = Arc::new(InMemoryVoiceRepository::with(vec![voice.clone()]));
        let vendor = Arc::new(FakeVoiceVendor::default());
        let handler = RemoveVoiceHandler::new(repo.clone(), vendor.clone());

        handler.handle(RemoveVoice { voice_id: voice.id }).await.unwrap();

        assert!(vendor.deleted.lock().unwrap().is_empty());
        assert!(repo.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_remove_voice_with_clone_deletes_at_vendor() {
        let voice = voice_record("papa", Some("el-7"), None);
        let repo = Arc::new(InMemoryVoiceRepository::with(vec![voice.clone()]));
        let vendor = Arc::new(FakeVoiceVendor::default());
        let handler = RemoveVoiceHandler::new(repo.clone(), vendor.clone());

        handler.handle(RemoveVoice { voice_id: voice.id }).await.unwrap();

        assert_eq!(*vendor.deleted.lock().unwrap(), vec!["el-7".to_string()]);
        assert!(repo.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_remove_voice_vendor_not_found_is_upstream_error() {
        let voice = voice_record("papa", Some("el-7"), None);
        let repo = Arc::new(InMemoryVoiceRepository::with(vec![voice.clone()]));
        let handler = RemoveVoiceHandler::new(repo.clone(), Arc::new(FakeVoiceVendor::failing_with(404)));

        let err = handler.handle(RemoveVoice { voice_id: voice.id }).await.unwrap_err();
        assert!(matches!(err, ApplicationError::UpstreamError(_)));
        assert_eq!(repo.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_voice_keeps_record_when_vendor_fails() {
        let voice = voice_record("papa", Some("el-7"), None);
        let repo = Arc::new(InMemoryVoiceRepository::with(vec![voice.clone()]));
        let handler = RemoveVoiceHandler::new(repo.clone(), Arc::new(FakeVoiceVendor::failing_with(500)));

        let err = handler.handle(RemoveVoice { voice_id: voice.id }).await.unwrap_err();
        assert!(matches!(err, ApplicationError::UpstreamError(_)));
        assert_eq!(repo.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_unknown_voice_is_not_found() {
        let handler = RemoveVoiceHandler::new(
            Arc::new(InMemoryVoiceRepository::default()),
            Arc::new(FakeVoiceVendor::default()),
        );
        let err = handler
            .handle(RemoveVoice {
                voice_id: Uuid::new_v4(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_upload_sample_names_file_by_key() {
        let store = Arc::new(MemoryBlobStore::default());
        let handler = UploadSampleHandler::new(store.clone());

        let result = handler
            .handle(UploadSample {
                key: "dadi".to_string(),
                data: b"chunk1chunk2".to_vec(),
            })
            .await
            .unwrap();

        assert!(result.file_name.starts_with("dadi-"));
        assert!(result.file_name.ends_with(".webm"));
        assert_eq!(
            result.audio_url,
            format!("http://blobs.test/storage/audio-samples/{}", result.file_name)
        );
        assert_eq!(
            store.get(Bucket::AudioSamples, &result.file_name).unwrap(),
            b"chunk1chunk2"
        );
    }

    #[tokio::test]
    async fn test_upload_empty_sample_rejected() {
        let handler = UploadSampleHandler::new(Arc::new(MemoryBlobStore::default()));
        let err = handler
            .handle(UploadSample {
                key: "dadi".to_string(),
                data: Vec::new(),
            })
            .await
            .unwrap_err();
        assert!(err.is_client_error());
    }
}
