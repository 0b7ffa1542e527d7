//! # CandleStream Core
//!
//! 월 단위 캔들 캐시 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - OHLCV 캔들 및 캔들 테이블
//! - 거래소 / 캔들 간격 정의
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use types::*;
