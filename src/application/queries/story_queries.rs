//! Story Queries

/// 列出所有故事查询（最新在前）
#[derive(Debug, Clone)]
pub struct ListStories;
