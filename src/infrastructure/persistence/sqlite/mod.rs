//! SQLite Persistence - SQLite 数据库持久化实现

mod database;
mod story_repo;
mod voice_repo;

pub use database::*;
pub use story_repo::*;
pub use voice_repo::*;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::application::ports::RepositoryError;

/// 定宽 RFC 3339 时间戳，字典序即时间序
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| RepositoryError::SerializationError(e.to_string()))
}
