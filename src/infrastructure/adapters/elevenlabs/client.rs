//! ElevenLabs Client - 语音克隆与语音合成
//!
//! 实现 VoiceCloningPort 和 SpeechSynthesisPort
//!
//! 供应商 API:
//! POST   {base}/v1/voices/add             multipart(name, files, description, labels) -> {"voice_id"}
//! DELETE {base}/v1/voices/{id}
//! POST   {base}/v1/text-to-speech/{id}    JSON -> audio/mpeg

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{
    CloneRequest, SpeechSynthesisPort, SynthesisRequest, VendorError, VoiceCloningPort,
};

const API_KEY_HEADER: &str = "xi-api-key";
const VOICES_PATH: [&str; 2] = ["v1", "voices"];
const TEXT_TO_SPEECH_PATH: [&str; 2] = ["v1", "text-to-speech"];

/// ElevenLabs 客户端配置
#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    pub api_key: String,
    pub base_url: String,
    /// 合成模型
    pub model_id: String,
    pub stability: f32,
    pub similarity_boost: f32,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.elevenlabs.io".to_string(),
            model_id: "eleven_v3".to_string(),
            stability: 0.5,
            similarity_boost: 0.75,
            timeout_secs: 120,
        }
    }
}

impl ElevenLabsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct TextToSpeechBody {
    text: String,
    model_id: String,
    voice_settings: VoiceSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    language_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AddVoiceResponse {
    voice_id: String,
}

/// ElevenLabs 客户端
pub struct ElevenLabsClient {
    client: Client,
    config: ElevenLabsConfig,
}

impl ElevenLabsClient {
    pub fn new(config: ElevenLabsConfig) -> Result<Self, VendorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VendorError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// 音色 ID 作为单个路径段追加，`/`、`?`、`%` 等字符会被编码
    fn voice_url(&self, collection: &[&str], voice_id: &str) -> Result<Url, VendorError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| VendorError::Network(format!("Invalid base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| VendorError::Network("Base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(collection)
            .push(voice_id);
        Ok(url)
    }

    fn synthesis_body(&self, request: SynthesisRequest) -> TextToSpeechBody {
        TextToSpeechBody {
            text: request.text,
            model_id: self.config.model_id.clone(),
            voice_settings: VoiceSettings {
                stability: self.config.stability,
                similarity_boost: self.config.similarity_boost,
            },
            language_code: request.language_code,
        }
    }

    fn clone_form(request: CloneRequest) -> Result<Form, VendorError> {
        let labels = serde_json::json!({ "language": request.language }).to_string();
        let description = clone_description(&request.relationship, &request.language);
        let sample = Part::bytes(request.audio)
            .file_name(request.file_name)
            .mime_str("audio/webm")
            .map_err(|e| VendorError::InvalidResponse(e.to_string()))?;

        Ok(Form::new()
            .text("name", request.name)
            .part("files", sample)
            .text("description", description)
            .text("labels", labels))
    }
}

/// 克隆音色的描述文本
fn clone_description(relationship: &str, language: &str) -> String {
    format!("Voice clone for {} in {}", relationship, language)
}

/// 非 2xx 响应转为 Upstream 错误
async fn ensure_success(response: Response) -> Result<Response, VendorError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(VendorError::Upstream {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl VoiceCloningPort for ElevenLabsClient {
    async fn clone_voice(&self, request: CloneRequest) -> Result<String, VendorError> {
        let audio_size = request.audio.len();
        let form = Self::clone_form(request)?;

        tracing::debug!(audio_size, "Sending ElevenLabs add-voice request");

        let response = self
            .client
            .post(self.url("/v1/voices/add"))
            .header(API_KEY_HEADER, &self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(VendorError::from_transport)?;

        let body: AddVoiceResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| VendorError::InvalidResponse(format!("Failed to parse voice_id: {}", e)))?;

        Ok(body.voice_id)
    }

    async fn delete_voice(&self, external_voice_id: &str) -> Result<(), VendorError> {
        let response = self
            .client
            .delete(self.voice_url(&VOICES_PATH, external_voice_id)?)
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await
            .map_err(VendorError::from_transport)?;

        ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl SpeechSynthesisPort for ElevenLabsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<u8>, VendorError> {
        let url = self.voice_url(&TEXT_TO_SPEECH_PATH, &request.external_voice_id)?;
        let body = self.synthesis_body(request);

        tracing::debug!(
            chars = body.text.chars().count(),
            model_id = %body.model_id,
            language_code = ?body.language_code,
            "Sending ElevenLabs text-to-speech request"
        );

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&body)
            .send()
            .await
            .map_err(VendorError::from_transport)?;

        let audio = ensure_success(response)
            .await?
            .bytes()
            .await
            .map_err(|e| VendorError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        tracing::info!(audio_size = audio.len(), "ElevenLabs synthesis completed");
        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ElevenLabsClient {
        ElevenLabsClient::new(ElevenLabsConfig::new("test-key")).unwrap()
    }

    #[test]
    fn test_config_default() {
        let config = ElevenLabsConfig::default();
        assert_eq!(config.base_url, "https://api.elevenlabs.io");
        assert_eq!(config.model_id, "eleven_v3");
        assert_eq!(config.stability, 0.5);
        assert_eq!(config.similarity_boost, 0.75);
    }

    #[test]
    fn test_url_joins_base() {
        let client = ElevenLabsClient::new(
            ElevenLabsConfig::new("k").with_base_url("http://localhost:9999/"),
        )
        .unwrap();
        assert_eq!(client.url("/v1/voices/add"), "http://localhost:9999/v1/voices/add");
    }

    #[test]
    fn test_voice_url_appends_id() {
        let client = ElevenLabsClient::new(
            ElevenLabsConfig::new("k").with_base_url("http://localhost:9999/"),
        )
        .unwrap();
        let url = client.voice_url(&VOICES_PATH, "21m00Tcm4TlvDq8ikWAM").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9999/v1/voices/21m00Tcm4TlvDq8ikWAM");
    }

    fn segments(url: &Url) -> Vec<String> {
        url.path_segments().unwrap().map(str::to_string).collect()
    }

    #[test]
    fn test_delete_url_keeps_traversal_id_in_one_segment() {
        let url = client().voice_url(&VOICES_PATH, "../../v1/history/abc").unwrap();
        let segments = segments(&url);
        assert!(url.path().starts_with("/v1/voices/"));
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[..2], ["v1", "voices"]);
        assert!(!segments[2].contains('/'));
        assert_eq!(url.host_str(), Some("api.elevenlabs.io"));
    }

    #[test]
    fn test_synthesis_url_keeps_traversal_id_in_one_segment() {
        let url = client()
            .voice_url(&TEXT_TO_SPEECH_PATH, "../../voices/abc?x=1")
            .unwrap();
        let segments = segments(&url);
        assert!(url.path().starts_with("/v1/text-to-speech/"));
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[..2], ["v1", "text-to-speech"]);
        assert!(url.query().is_none());
    }

    #[test]
    fn test_punjabi_body_carries_language_code() {
        let body = client().synthesis_body(SynthesisRequest {
            text: "ਸਤ ਸ੍ਰੀ ਅਕਾਲ".to_string(),
            external_voice_id: "el-1".to_string(),
            language_code: Some("pa".to_string()),
        });
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model_id"], "eleven_v3");
        assert_eq!(json["language_code"], "pa");
        assert_eq!(json["voice_settings"]["stability"], 0.5);
        assert_eq!(json["voice_settings"]["similarity_boost"], 0.75);
    }

    #[test]
    fn test_default_body_omits_language_code() {
        let body = client().synthesis_body(SynthesisRequest {
            text: "hello".to_string(),
            external_voice_id: "el-1".to_string(),
            language_code: None,
        });
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("language_code").is_none());
        assert_eq!(json["text"], "hello");
    }

    #[test]
    fn test_clone_description() {
        assert_eq!(clone_description("dadi", "pa"), "Voice clone for dadi in pa");
    }

    #[test]
    fn test_clone_form_builds() {
        let form = ElevenLabsClient::clone_form(CloneRequest {
            audio: vec![1, 2, 3],
            file_name: "sample.webm".to_string(),
            name: "Dadi".to_string(),
            relationship: "dadi".to_string(),
            language: "pa".to_string(),
        })
        .unwrap();
        assert!(!form.boundary().is_empty());
    }
}
