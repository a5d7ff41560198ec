//! Voice Cloning Port - 语音克隆网关

use async_trait::async_trait;

use super::VendorError;

/// 克隆请求
#[derive(Debug, Clone)]
pub struct CloneRequest {
    /// 录音样本原始字节
    pub audio: Vec<u8>,
    /// 上传给供应商的文件名
    pub file_name: String,
    /// 音色展示名称
    pub name: String,
    /// 关系标识或自定义名称（仅用于描述）
    pub relationship: String,
    /// 克隆语言
    pub language: String,
}

/// Voice Cloning Port
///
/// 创建/销毁供应商侧的计费资源，本地不做幂等保护
#[async_trait]
pub trait VoiceCloningPort: Send + Sync {
    /// 克隆音色，返回供应商分配的音色 ID
    async fn clone_voice(&self, request: CloneRequest) -> Result<String, VendorError>;

    /// 删除供应商侧音色
    async fn delete_voice(&self, external_voice_id: &str) -> Result<(), VendorError>;
}
