//! 데이터 모듈 오류 타입.

use crate::provider::SourceError;
use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// 캐시/조회 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 시작일이 종료일보다 늦음
    #[error("Invalid date range: {start} > {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// 저장소에 아티팩트가 없음 (페처 내부에서 캐시 미스로 처리됨)
    #[error("Artifact not found: {0}")]
    NotFound(String),

    /// 아티팩트 파일 I/O 실패
    #[error("Storage error at {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 아티팩트 직렬화/역직렬화 실패
    #[error("Serialization error at {}: {message}", .path.display())]
    Serialization { path: PathBuf, message: String },

    /// 외부 캔들 제공자 실패
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

impl DataError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataError::Storage {
            path: path.into(),
            source,
        }
    }

    /// 캐시 미스 신호인지 확인합니다.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotFound(_))
    }

    /// 호출자가 재시도해볼 만한 오류인지 확인합니다.
    pub fn is_retryable(&self) -> bool {
        match self {
            DataError::Source(e) => e.is_retryable(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
