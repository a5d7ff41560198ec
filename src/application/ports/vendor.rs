//! Vendor Error - 外部供应商调用错误
//!
//! 语音克隆、语音合成、文本生成三个网关共用

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VendorError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    /// 供应商返回非 2xx，body 仅用于服务端日志
    #[error("Upstream responded {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl VendorError {
    /// 将 reqwest 错误归类
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Network(format!("Cannot connect to vendor: {}", err.without_url()))
        } else {
            Self::Network(err.without_url().to_string())
        }
    }
}
