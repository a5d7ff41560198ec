//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 对象存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 文本生成供应商
    #[serde(default)]
    pub openai: OpenAiSettings,

    /// 语音克隆与合成供应商
    #[serde(default)]
    pub elevenlabs: ElevenLabsSettings,

    /// 故事生成
    #[serde(default)]
    pub story: StoryConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL，用于生成对象存储 URL
    /// 如果未设置，则使用 http://{host}:{port}
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 获取公开的 Base URL
    pub fn public_base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            let host = if self.host == "0.0.0.0" {
                "localhost"
            } else {
                &self.host
            };
            format!("http://{}:{}", host, self.port)
        })
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/storytime.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// 对象存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 存储根目录，每个桶一个子目录
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// 上传文件最大大小（字节），默认 20MB
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,

    /// 下载外部样本的超时时间（秒）
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,
}

fn default_root_dir() -> PathBuf {
    PathBuf::from("data/storage")
}

fn default_max_upload_size() -> u64 {
    20 * 1024 * 1024
}

fn default_download_timeout() -> u64 {
    30
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            max_upload_size: default_max_upload_size(),
            download_timeout_secs: default_download_timeout(),
        }
    }
}

/// OpenAI 配置
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiSettings {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_openai_url")]
    pub base_url: String,

    /// 两步流程（短篇）使用的模型
    #[serde(default = "default_short_model")]
    pub short_story_model: String,

    /// 一次性流程（长篇）使用的模型
    #[serde(default = "default_long_model")]
    pub long_story_model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// 请求超时时间（秒）
    #[serde(default = "default_openai_timeout")]
    pub timeout_secs: u64,
}

fn default_openai_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_short_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_long_model() -> String {
    "gpt-4".to_string()
}

fn default_temperature() -> f32 {
    0.8
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_openai_timeout() -> u64 {
    60
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_openai_url(),
            short_story_model: default_short_model(),
            long_story_model: default_long_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_openai_timeout(),
        }
    }
}

/// ElevenLabs 配置
#[derive(Debug, Clone, Deserialize)]
pub struct ElevenLabsSettings {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_elevenlabs_url")]
    pub base_url: String,

    /// 合成模型
    #[serde(default = "default_tts_model")]
    pub tts_model_id: String,

    #[serde(default = "default_stability")]
    pub stability: f32,

    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f32,

    /// 克隆请求未指定语言时使用
    #[serde(default = "default_clone_language")]
    pub clone_language: String,

    /// 请求超时时间（秒），合成长故事较慢
    #[serde(default = "default_elevenlabs_timeout")]
    pub timeout_secs: u64,
}

fn default_elevenlabs_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_tts_model() -> String {
    "eleven_v3".to_string()
}

fn default_stability() -> f32 {
    0.5
}

fn default_similarity_boost() -> f32 {
    0.75
}

fn default_clone_language() -> String {
    "pa".to_string()
}

fn default_elevenlabs_timeout() -> u64 {
    120
}

impl Default for ElevenLabsSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_elevenlabs_url(),
            tts_model_id: default_tts_model(),
            stability: default_stability(),
            similarity_boost: default_similarity_boost(),
            clone_language: default_clone_language(),
            timeout_secs: default_elevenlabs_timeout(),
        }
    }
}

/// 故事生成配置
#[derive(Debug, Clone, Deserialize)]
pub struct StoryConfig {
    /// 音色与请求都未指定语言时使用
    #[serde(default = "default_story_language")]
    pub default_language: String,
}

fn default_story_language() -> String {
    "en".to_string()
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            default_language: default_story_language(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LogConfig {
    /// 未设置 RUST_LOG 时使用的过滤规则
    pub fn default_filter(&self) -> String {
        format!("{level},storytime={level},tower_http=debug", level = self.level)
    }
}
