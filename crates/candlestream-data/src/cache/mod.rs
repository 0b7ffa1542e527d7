//! 월 파티션 캐시 레이어.
//!
//! ```text
//! RangeAssembler ──▶ MemoizingFetcher ──▶ PartitionClock  (라이브/마감 월 판정)
//!                                    ├──▶ KeyDeriver      (결정적 키)
//!                                    ├──▶ ArtifactStore   (파일 아티팩트)
//!                                    └──▶ CandleSource    (캐시 미스 시에만)
//! ```
//!
//! - 마감된 월: 월말 날짜로 정규화하여 한 번 받은 데이터는 영구 보관
//! - 현재 월: 장중에 계속 바뀌므로 항상 제공자를 직접 호출, 저장하지 않음
//! - 데이터 없음(`None`/빈 테이블): 저장하지 않음. 다음 실행에서 다시 조회

pub mod key;
pub mod memo;
pub mod partition;
pub mod range;
pub mod store;

pub use key::{CacheKey, CallArgs, KeyDeriver};
pub use memo::MemoizingFetcher;
pub use partition::{Clock, FixedClock, Partition, PartitionClock, SystemClock};
pub use range::{CacheContext, RangeAssembler};
pub use store::{ArtifactKey, ArtifactStore, StoredArtifact};
