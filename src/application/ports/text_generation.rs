//! Text Generation Port - 文本生成网关

use async_trait::async_trait;

use super::VendorError;

/// 补全请求
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Text Generation Port
#[async_trait]
pub trait TextGenerationPort: Send + Sync {
    /// 返回模型生成的文本，模型未返回内容时为空字符串
    async fn complete(&self, request: CompletionRequest) -> Result<String, VendorError>;
}
