//! Voice Commands

use uuid::Uuid;

/// 克隆音色命令（下载录音样本并交给供应商克隆）
#[derive(Debug, Clone)]
pub struct CloneVoice {
    pub audio_url: String,
    pub name: String,
    pub relationship: String,
    pub is_custom: bool,
    pub language: Option<String>,
}

/// 删除供应商侧音色命令
#[derive(Debug, Clone)]
pub struct DeleteClonedVoice {
    pub elevenlabs_voice_id: String,
}

/// 登记音色记录命令
#[derive(Debug, Clone)]
pub struct RegisterVoice {
    pub name: String,
    pub relationship: String,
    pub elevenlabs_voice_id: Option<String>,
    pub audio_sample_url: Option<String>,
    pub is_custom: bool,
    pub language: Option<String>,
}

/// 删除音色命令（供应商侧 + 本地记录）
#[derive(Debug, Clone)]
pub struct RemoveVoice {
    pub voice_id: Uuid,
}

/// 上传录音样本命令
#[derive(Debug, Clone)]
pub struct UploadSample {
    /// 关系标识或自定义名称，用作文件名前缀
    pub key: String,
    pub data: Vec<u8>,
}
