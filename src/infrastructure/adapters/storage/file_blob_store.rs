//! File Blob Store - 文件系统对象存储实现
//!
//! 实现 BlobStorePort trait
//!
//! 目录布局: {root_dir}/{bucket}/{file_name}
//! 公开 URL: {public_base_url}/storage/{bucket}/{file_name}

use async_trait::async_trait;
use reqwest::Client;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::application::ports::{BlobStoreError, BlobStorePort, Bucket};

/// 对外提供静态文件的路由前缀
pub const STORAGE_ROUTE: &str = "/storage";

/// 文件系统对象存储
pub struct FileBlobStore {
    /// 存储根目录
    root_dir: PathBuf,
    /// 服务对外地址，例如 http://localhost:3000
    public_base_url: String,
    /// 下载外部样本用
    client: Client,
}

impl FileBlobStore {
    /// 创建存储并确保所有桶目录存在
    pub async fn new(
        root_dir: impl AsRef<Path>,
        public_base_url: impl Into<String>,
        download_timeout_secs: u64,
    ) -> Result<Self, BlobStoreError> {
        let root_dir = root_dir.as_ref().to_path_buf();

        for bucket in Bucket::all() {
            fs::create_dir_all(root_dir.join(bucket.as_str()))
                .await
                .map_err(|e| BlobStoreError::IoError(e.to_string()))?;
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(download_timeout_secs))
            .build()
            .map_err(|e| BlobStoreError::IoError(e.to_string()))?;

        Ok(Self {
            root_dir,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// 获取存储根目录
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn object_path(&self, bucket: Bucket, name: &str) -> PathBuf {
        self.root_dir.join(bucket.as_str()).join(name)
    }

    /// 本存储生成的 URL 解析为 (桶, 文件名)
    fn resolve_local(&self, url: &str) -> Option<(Bucket, String)> {
        let prefix = format!("{}{}/", self.public_base_url, STORAGE_ROUTE);
        let rest = url.strip_prefix(&prefix)?;
        let (bucket, name) = rest.split_once('/')?;
        let bucket = Bucket::from_str(bucket)?;
        validate_name(name).ok()?;
        Some((bucket, name.to_string()))
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, BlobStoreError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BlobStoreError::DownloadFailed(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BlobStoreError::DownloadFailed(format!("HTTP {}", status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BlobStoreError::DownloadFailed(e.without_url().to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// 文件名只能是单层路径
fn validate_name(name: &str) -> Result<(), BlobStoreError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');
    if invalid {
        return Err(BlobStoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[async_trait]
impl BlobStorePort for FileBlobStore {
    async fn upload(&self, bucket: Bucket, name: &str, data: &[u8]) -> Result<(), BlobStoreError> {
        validate_name(name)?;
        let path = self.object_path(bucket, name);

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => BlobStoreError::AlreadyExists {
                    bucket: bucket.as_str(),
                    name: name.to_string(),
                },
                _ => BlobStoreError::IoError(e.to_string()),
            })?;

        file.write_all(data)
            .await
            .map_err(|e| BlobStoreError::IoError(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| BlobStoreError::IoError(e.to_string()))?;

        tracing::debug!(
            bucket = bucket.as_str(),
            name = %name,
            size = data.len(),
            "Blob stored"
        );

        Ok(())
    }

    fn public_url(&self, bucket: Bucket, name: &str) -> String {
        format!(
            "{}{}/{}/{}",
            self.public_base_url,
            STORAGE_ROUTE,
            bucket.as_str(),
            name
        )
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, BlobStoreError> {
        match self.resolve_local(url) {
            Some((bucket, name)) => {
                fs::read(self.object_path(bucket, &name))
                    .await
                    .map_err(|e| match e.kind() {
                        ErrorKind::NotFound => BlobStoreError::NotFound(url.to_string()),
                        _ => BlobStoreError::IoError(e.to_string()),
                    })
            }
            None => self.download(url).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn store(dir: &TempDir) -> FileBlobStore {
        FileBlobStore::new(dir.path(), "http://localhost:3000/", 5)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_new_creates_buckets() {
        let dir = TempDir::new().unwrap();
        let _store = store(&dir).await;
        assert!(dir.path().join("audio-samples").is_dir());
        assert!(dir.path().join("story-audio").is_dir());
    }

    #[tokio::test]
    async fn test_upload_then_fetch_by_url() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir).await;

        store
            .upload(Bucket::AudioSamples, "mummy-1700000000000.webm", b"webm-bytes")
            .await
            .unwrap();
        let url = store.public_url(Bucket::AudioSamples, "mummy-1700000000000.webm");

        assert_eq!(
            url,
            "http://localhost:3000/storage/audio-samples/mummy-1700000000000.webm"
        );
        assert_eq!(store.fetch(&url).await.unwrap(), b"webm-bytes");
    }

    #[tokio::test]
    async fn test_upload_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir).await;

        store
            .upload(Bucket::StoryAudio, "story-1.mp3", b"first")
            .await
            .unwrap();
        let err = store
            .upload(Bucket::StoryAudio, "story-1.mp3", b"second")
            .await
            .unwrap_err();

        assert!(matches!(err, BlobStoreError::AlreadyExists { .. }));
        let on_disk = std::fs::read(dir.path().join("story-audio/story-1.mp3")).unwrap();
        assert_eq!(on_disk, b"first");
    }

    #[tokio::test]
    async fn test_rejects_path_names() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir).await;

        for name in ["", "..", "../escape.mp3", "a/b.mp3"] {
            let err = store.upload(Bucket::StoryAudio, name, b"x").await.unwrap_err();
            assert!(matches!(err, BlobStoreError::InvalidName(_)), "{name}");
        }
    }

    #[tokio::test]
    async fn test_fetch_missing_local_object() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir).await;

        let url = store.public_url(Bucket::StoryAudio, "story-404.mp3");
        assert!(matches!(
            store.fetch(&url).await,
            Err(BlobStoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_bucket_is_not_local() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir).await;
        assert!(store
            .resolve_local("http://localhost:3000/storage/other/x.webm")
            .is_none());
        assert!(store
            .resolve_local("http://elsewhere/storage/audio-samples/x.webm")
            .is_none());
    }
}
