//! 외부 캔들 제공자 추상화.
//!
//! 캐시 엔진은 제공자를 `CandleSource` trait 로만 바라봅니다. 인증 세션
//! 생성은 이 crate 의 범위 밖이며, 이미 연결된 핸들을 주입받습니다.

mod http;

pub use http::HttpCandleSource;

use async_trait::async_trait;
use candlestream_core::{CandleTable, Exchange, Interval};
use chrono::NaiveDate;
use thiserror::Error;

// =============================================================================
// 에러 타입
// =============================================================================

/// 캔들 제공자 에러.
#[derive(Debug, Error)]
pub enum SourceError {
    /// 네트워크 에러
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 인증 실패
    #[error("인증 실패: {0}")]
    Authentication(String),

    /// API 에러
    #[error("API 에러 [{code}]: {message}")]
    Api { code: String, message: String },

    /// 응답 파싱 에러
    #[error("파싱 에러: {0}")]
    Parse(String),

    /// 요청 한도 초과
    #[error("요청 한도 초과: {0}")]
    RateLimit(String),
}

impl SourceError {
    /// 재시도 가능한 에러인지 확인합니다.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SourceError::Network(_) | SourceError::RateLimit(_))
    }
}

// =============================================================================
// CandleSource Trait
// =============================================================================

/// 과거 캔들 제공자.
///
/// `name()` 은 캐시 키와 아티팩트 파일 이름에 들어가는 함수 식별자이므로
/// 프로세스 재시작 간에 바뀌면 안 됩니다.
#[async_trait]
pub trait CandleSource: Send + Sync {
    /// 안정적인 함수 식별자 (예: `smartapi.historical_candles`).
    fn name(&self) -> &str;

    /// `start`..=`end` 구간의 캔들을 조회합니다.
    ///
    /// # Returns
    ///
    /// 제공자가 `data: null` 을 돌려주면 `Ok(None)`. 데이터 없음은 에러가 아닙니다.
    ///
    /// # Errors
    ///
    /// - `SourceError::Network`: 네트워크 연결 실패
    /// - `SourceError::Authentication`: 토큰 만료 등
    /// - `SourceError::Api`: 제공자가 실패 상태를 반환
    async fn fetch_candles(
        &self,
        exchange: Exchange,
        symbol: &str,
        token: &str,
        interval: Interval,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<CandleTable>, SourceError>;

    /// 시작 시 연결 상태 확인. 실패하면 프로세스를 중단해야 합니다.
    async fn check_connectivity(&self) -> Result<(), SourceError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_retryable() {
        assert!(SourceError::Network("reset".to_string()).is_retryable());
        assert!(SourceError::RateLimit("429".to_string()).is_retryable());
        assert!(!SourceError::Parse("bad json".to_string()).is_retryable());
        assert!(!SourceError::Api {
            code: "AB1004".to_string(),
            message: "Something Went Wrong".to_string(),
        }
        .is_retryable());
    }
}
