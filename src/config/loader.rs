//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml / config.local.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::domain::voice::LanguageTag;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "STORYTIME";

/// 加载应用配置
///
/// # 环境变量示例
/// - `STORYTIME_SERVER__PORT=8080`
/// - `STORYTIME_OPENAI__API_KEY=sk-...`
/// - `STORYTIME_ELEVENLABS__API_KEY=...`
/// - `STORYTIME_STORY__DEFAULT_LANGUAGE=pa`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// `config_path` 为 None 时搜索当前目录下的默认配置文件
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 例如: STORYTIME_ELEVENLABS__API_KEY
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    // 缺省字段由 serde default 补齐
    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError(message.into())
}

/// 验证配置有效性
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(invalid("Server port cannot be 0"));
    }

    if config.database.path.trim().is_empty() {
        return Err(invalid("Database path cannot be empty"));
    }

    if config.openai.base_url.trim().is_empty() {
        return Err(invalid("OpenAI base URL cannot be empty"));
    }
    if config.openai.api_key.trim().is_empty() {
        return Err(invalid("OpenAI API key is missing (STORYTIME_OPENAI__API_KEY)"));
    }
    if !(0.0..=2.0).contains(&config.openai.temperature) {
        return Err(invalid("OpenAI temperature must be within [0, 2]"));
    }
    if config.openai.max_tokens == 0 {
        return Err(invalid("OpenAI max_tokens must be greater than 0"));
    }
    if config.openai.timeout_secs == 0 {
        return Err(invalid("OpenAI timeout cannot be 0"));
    }

    if config.elevenlabs.base_url.trim().is_empty() {
        return Err(invalid("ElevenLabs base URL cannot be empty"));
    }
    if config.elevenlabs.api_key.trim().is_empty() {
        return Err(invalid(
            "ElevenLabs API key is missing (STORYTIME_ELEVENLABS__API_KEY)",
        ));
    }
    if config.elevenlabs.timeout_secs == 0 {
        return Err(invalid("ElevenLabs timeout cannot be 0"));
    }

    if config.storage.download_timeout_secs == 0 {
        return Err(invalid("Storage download timeout cannot be 0"));
    }

    LanguageTag::new(&config.elevenlabs.clone_language)
        .map_err(|e| invalid(format!("elevenlabs.clone_language: {}", e)))?;
    LanguageTag::new(&config.story.default_language)
        .map_err(|e| invalid(format!("story.default_language: {}", e)))?;

    Ok(())
}

fn credential_state(key: &str) -> &'static str {
    if key.trim().is_empty() {
        "missing"
    } else {
        "configured"
    }
}

/// 打印配置信息（用于启动时日志），不输出密钥
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Public Base URL: {}", config.server.public_base_url());
    tracing::info!("Database: {}", config.database.path);
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    tracing::info!("Storage Root: {:?}", config.storage.root_dir);
    tracing::info!("OpenAI URL: {}", config.openai.base_url);
    tracing::info!("OpenAI Key: {}", credential_state(&config.openai.api_key));
    tracing::info!(
        "Story Models: short={} long={}",
        config.openai.short_story_model,
        config.openai.long_story_model
    );
    tracing::info!("ElevenLabs URL: {}", config.elevenlabs.base_url);
    tracing::info!("ElevenLabs Key: {}", credential_state(&config.elevenlabs.api_key));
    tracing::info!("ElevenLabs Model: {}", config.elevenlabs.tts_model_id);
    tracing::info!("Clone Language: {}", config.elevenlabs.clone_language);
    tracing::info!("Default Story Language: {}", config.story.default_language);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
