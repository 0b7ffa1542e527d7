//! 월 단위 캔들 캐시.
//!
//! 이 crate는 다음을 제공합니다:
//! - 날짜 → 월 파티션 변환 (`PartitionClock`)
//! - 결정적 캐시 키 생성 (`KeyDeriver`)
//! - 파일 기반 아티팩트 저장소 (`ArtifactStore`)
//! - 마감된 월만 캐시하는 페처 (`MemoizingFetcher`)
//! - 여러 달에 걸친 구간 조립 (`RangeAssembler`)
//! - 외부 캔들 제공자 추상화 (`CandleSource`)

pub mod cache;
pub mod error;
pub mod provider;

pub use error::{DataError, Result};

pub use cache::{
    ArtifactKey, ArtifactStore, CacheContext, CacheKey, CallArgs, Clock, FixedClock, KeyDeriver,
    MemoizingFetcher, Partition, PartitionClock, RangeAssembler, StoredArtifact, SystemClock,
};
pub use provider::{CandleSource, HttpCandleSource, SourceError};
