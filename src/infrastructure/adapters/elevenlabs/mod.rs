//! ElevenLabs Adapter - 语音克隆与合成供应商

mod client;

pub use client::*;
