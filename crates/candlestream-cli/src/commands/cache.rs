//! 캐시 아티팩트 조회 명령어.

use anyhow::{Context, Result};
use candlestream_data::{ArtifactStore, StoredArtifact};
use std::io::Write;

/// 네임스페이스의 아티팩트를 출력하고 개수를 반환합니다.
pub async fn run_ls(store: &ArtifactStore, namespace: &str) -> Result<usize> {
    let artifacts = store
        .list(namespace)
        .await
        .with_context(|| format!("캐시 목록 조회 실패: {}", store.namespace_dir(namespace).display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_listing(&mut out, &artifacts)?;

    Ok(artifacts.len())
}

/// 아티팩트 목록 표 출력.
pub fn write_listing<W: Write>(out: &mut W, artifacts: &[StoredArtifact]) -> std::io::Result<()> {
    if artifacts.is_empty() {
        writeln!(out, "저장된 아티팩트가 없습니다")?;
        return Ok(());
    }

    writeln!(out, "{:<10} {:<20} NAME", "SIZE", "MODIFIED")?;
    for artifact in artifacts {
        let modified = artifact
            .modified
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:<10} {:<20} {}",
            artifact.size_bytes, modified, artifact.file_name
        )?;
    }

    let total: u64 = artifacts.iter().map(|a| a.size_bytes).sum();
    writeln!(out, "\n{} 개, 총 {} bytes", artifacts.len(), total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn artifact(name: &str, size: u64) -> StoredArtifact {
        StoredArtifact {
            path: PathBuf::from("cache/data").join(name),
            file_name: name.to_string(),
            size_bytes: size,
            modified: None,
        }
    }

    #[test]
    fn test_listing_empty() {
        let mut buf = Vec::new();
        write_listing(&mut buf, &[]).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("없습니다"));
    }

    #[test]
    fn test_listing_rows_and_total() {
        let mut buf = Vec::new();
        let artifacts = vec![
            artifact("smartapi-historical-candles_INFY-EQ_2023-01-31_ab.json", 100),
            artifact("smartapi-historical-candles_TCS-EQ_2023-01-31_cd.json", 50),
        ];
        write_listing(&mut buf, &artifacts).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("INFY-EQ_2023-01-31"));
        assert!(text.contains("TCS-EQ_2023-01-31"));
        assert!(text.contains("2 개, 총 150 bytes"));
    }

    #[tokio::test]
    async fn test_run_ls_on_missing_namespace() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path());
        assert_eq!(run_ls(&store, "data").await.unwrap(), 0);
    }
}
