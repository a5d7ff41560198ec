//! OpenAI Adapter - 文本生成供应商

mod chat_client;

pub use chat_client::*;
