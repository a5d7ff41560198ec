//! Speech Synthesis Port - 语音合成网关

use async_trait::async_trait;

use super::VendorError;

/// 合成请求
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    /// 要朗读的文本
    pub text: String,
    /// 供应商音色 ID
    pub external_voice_id: String,
    /// 显式语言代码，只有旁遮普语会设置
    pub language_code: Option<String>,
}

/// Speech Synthesis Port
#[async_trait]
pub trait SpeechSynthesisPort: Send + Sync {
    /// 合成完整的 mp3 音频
    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<u8>, VendorError>;
}
