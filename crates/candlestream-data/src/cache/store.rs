//! 파일 기반 아티팩트 저장소.
//!
//! 레이아웃: `{root}/{namespace}/{function 슬러그}_{key}.json`
//!
//! 저장은 같은 디렉토리의 임시 파일에 쓴 뒤 `rename` 으로 게시하므로,
//! 동시에 읽는 쪽은 이전 파일이나 완성된 새 파일만 보게 됩니다.
//! 항목을 삭제하거나 만료시키는 연산은 없습니다.

use crate::cache::key::{slug, CacheKey};
use crate::error::{DataError, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

const EXTENSION: &str = "json";

/// 저장소 안에서 한 아티팩트를 가리키는 이름 (함수 식별자 + 파생 키).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactKey {
    function: String,
    key: CacheKey,
}

impl ArtifactKey {
    pub fn new(function: impl Into<String>, key: CacheKey) -> Self {
        Self {
            function: function.into(),
            key,
        }
    }

    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    /// `{function}_{key}.json`. 함수 식별자는 키의 심볼과 같은 규칙으로 정리됩니다.
    pub fn file_name(&self) -> String {
        format!("{}_{}.{}", slug(&self.function), self.key, EXTENSION)
    }
}

/// 저장된 아티팩트 메타데이터.
#[derive(Debug, Clone)]
pub struct StoredArtifact {
    pub path: PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// 아티팩트 저장소.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// 루트 디렉토리는 첫 `put` 때 만들어집니다.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn namespace_dir(&self, namespace: &str) -> PathBuf {
        self.root.join(namespace)
    }

    pub fn artifact_path(&self, namespace: &str, key: &ArtifactKey) -> PathBuf {
        self.namespace_dir(namespace).join(key.file_name())
    }

    pub async fn exists(&self, namespace: &str, key: &ArtifactKey) -> Result<bool> {
        let path = self.artifact_path(namespace, key);
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| DataError::storage(path, e))
    }

    /// 아티팩트를 읽습니다.
    ///
    /// # Errors
    ///
    /// - `DataError::NotFound`: 해당 키의 파일이 없음
    /// - `DataError::Storage`: 그 밖의 I/O 실패
    /// - `DataError::Serialization`: 파일 내용이 손상됨
    pub async fn get<T: DeserializeOwned>(&self, namespace: &str, key: &ArtifactKey) -> Result<T> {
        let path = self.artifact_path(namespace, key);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DataError::NotFound(format!("{}/{}", namespace, key.file_name())));
            }
            Err(e) => return Err(DataError::storage(path, e)),
        };

        serde_json::from_slice(&bytes).map_err(|e| DataError::Serialization {
            path,
            message: e.to_string(),
        })
    }

    /// 아티팩트를 저장합니다. 같은 키가 있으면 덮어씁니다.
    pub async fn put<T: Serialize>(&self, namespace: &str, key: &ArtifactKey, value: &T) -> Result<()> {
        let dir = self.namespace_dir(namespace);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| DataError::storage(&dir, e))?;

        let path = dir.join(key.file_name());
        let bytes = serde_json::to_vec(value).map_err(|e| DataError::Serialization {
            path: path.clone(),
            message: e.to_string(),
        })?;

        // 숨김 파일이므로 list() 에 잡히지 않음
        let tmp = dir.join(format!(".{}.tmp-{}", key.file_name(), uuid::Uuid::new_v4()));

        if let Err(e) = write_synced(&tmp, &bytes).await {
            discard(&tmp).await;
            return Err(DataError::storage(tmp, e));
        }

        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            discard(&tmp).await;
            return Err(DataError::storage(path, e));
        }

        debug!(path = %path.display(), bytes = bytes.len(), "아티팩트 저장");
        Ok(())
    }

    /// 네임스페이스에 저장된 아티팩트 목록 (파일 이름순).
    pub async fn list(&self, namespace: &str) -> Result<Vec<StoredArtifact>> {
        let dir = self.namespace_dir(namespace);

        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(DataError::storage(dir, e)),
        };

        let mut artifacts = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DataError::storage(&dir, e))?
        {
            let file_name = entry.file_name().to_string_lossy().to_string();
            let path = entry.path();
            if file_name.starts_with('.')
                || path.extension().and_then(|e| e.to_str()) != Some(EXTENSION)
            {
                continue;
            }

            let metadata = entry
                .metadata()
                .await
                .map_err(|e| DataError::storage(&path, e))?;

            artifacts.push(StoredArtifact {
                file_name,
                size_bytes: metadata.len(),
                modified: metadata.modified().ok().map(DateTime::<Utc>::from),
                path,
            });
        }

        artifacts.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(artifacts)
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

async fn discard(tmp: &Path) {
    if let Err(e) = tokio::fs::remove_file(tmp).await {
        if e.kind() != ErrorKind::NotFound {
            warn!(path = %tmp.display(), error = %e, "임시 파일 정리 실패");
        }
    }
}
