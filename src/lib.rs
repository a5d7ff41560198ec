//! Storytime - 家庭音色睡前故事服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: 家庭成员音色、关系标识、讲述语言
//! - Story Context: 故事题目、标题、写作指令
//!
//! 应用层 (application/):
//! - Ports: 端口定义（Repositories, BlobStore, VoiceCloning, SpeechSynthesis, TextGeneration）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: JSON API + 对象存储静态文件
//! - Persistence: SQLite 存储
//! - Adapters: ElevenLabs, OpenAI, 文件系统对象存储
//!
//! 客户端 (client/):
//! - 录音与生成状态机、首页与音色页控制器

pub mod application;
pub mod client;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
