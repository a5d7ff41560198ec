//! Storytime - 家庭音色睡前故事服务
//!
//! - Domain: voice/, story/ (Bounded Contexts)
//! - Application: commands, queries, ports
//! - Infrastructure: http, persistence, adapters

use std::sync::Arc;

use storytime::application::StorySettings;
use storytime::config::{load_config, print_config};
use storytime::domain::voice::LanguageTag;
use storytime::infrastructure::adapters::{
    ElevenLabsClient, ElevenLabsConfig, FileBlobStore, OpenAiChatClient, OpenAiConfig,
};
use storytime::infrastructure::http::{AppState, HttpServer, Ports, ServerConfig};
use storytime::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteStoryRepository, SqliteVoiceRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log.default_filter())),
        )
        .init();

    tracing::info!("Storytime {}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig::new(&config.database.path, config.database.max_connections);
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    let voice_repo = Arc::new(SqliteVoiceRepository::new(pool.clone()));
    let story_repo = Arc::new(SqliteStoryRepository::new(pool));

    let public_base_url = config.server.public_base_url();
    let blob_store = Arc::new(
        FileBlobStore::new(
            &config.storage.root_dir,
            &public_base_url,
            config.storage.download_timeout_secs,
        )
        .await?,
    );

    // 供应商网关
    let elevenlabs = Arc::new(ElevenLabsClient::new(ElevenLabsConfig {
        api_key: config.elevenlabs.api_key.clone(),
        base_url: config.elevenlabs.base_url.clone(),
        model_id: config.elevenlabs.tts_model_id.clone(),
        stability: config.elevenlabs.stability,
        similarity_boost: config.elevenlabs.similarity_boost,
        timeout_secs: config.elevenlabs.timeout_secs,
    })?);
    let openai = Arc::new(OpenAiChatClient::new(
        OpenAiConfig::new(config.openai.api_key.clone())
            .with_base_url(config.openai.base_url.clone())
            .with_timeout(config.openai.timeout_secs),
    )?);

    let settings = StorySettings {
        default_language: LanguageTag::new(&config.story.default_language)?,
        short_story_model: config.openai.short_story_model.clone(),
        long_story_model: config.openai.long_story_model.clone(),
        temperature: config.openai.temperature,
        max_tokens: config.openai.max_tokens,
    };
    let clone_language = LanguageTag::new(&config.elevenlabs.clone_language)?;

    let state = AppState::new(
        Ports {
            voice_repo,
            story_repo,
            blob_store,
            cloning: elevenlabs.clone(),
            synthesizer: elevenlabs,
            text_generator: openai,
        },
        settings,
        clone_language,
    );

    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_storage_root(&config.storage.root_dir)
        .with_max_body_size(config.storage.max_upload_size as usize);
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
