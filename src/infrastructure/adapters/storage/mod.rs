//! Storage Adapter - 对象存储实现

mod file_blob_store;

pub use file_blob_store::*;
