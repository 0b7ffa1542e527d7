//! 월 단위 메모이제이션 페처.
//!
//! 임의의 `CandleSource` 를 감싸 같은 시그니처의 캐시된 조회 함수를 만듭니다.
//!
//! ```text
//! fetch_month(date)
//!     │
//!     ├─ 현재 월? ──YES──▶ source(월초..오늘) 그대로 반환 (저장 안 함)
//!     │
//!     ▼ NO
//! 월말로 정규화 → 키 생성 → 저장소 조회
//!     │
//!     ├─ 히트 ──▶ 저장된 테이블 반환
//!     │
//!     ▼ 미스
//! source(월초..월말)
//!     ├─ 데이터 있음 ──▶ 저장 후 반환
//!     └─ 데이터 없음 ──▶ None (저장 안 함, 다음 실행에서 재조회)
//! ```

use crate::cache::key::{CallArgs, KeyDeriver};
use crate::cache::partition::{Partition, PartitionClock};
use crate::cache::store::{ArtifactKey, ArtifactStore};
use crate::error::Result;
use crate::provider::CandleSource;
use candlestream_core::{CandleTable, Exchange, Interval};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// `CandleSource` 를 월 파티션 캐시로 감싼 페처.
///
/// 상태를 갖지 않습니다. 영속 상태는 모두 `ArtifactStore` 에 있습니다.
pub struct MemoizingFetcher<S: ?Sized> {
    source: Arc<S>,
    store: ArtifactStore,
    namespace: String,
    clock: PartitionClock,
    interval: Interval,
}

impl<S: ?Sized> Clone for MemoizingFetcher<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            store: self.store.clone(),
            namespace: self.namespace.clone(),
            clock: self.clock.clone(),
            interval: self.interval,
        }
    }
}

impl<S: CandleSource + ?Sized> MemoizingFetcher<S> {
    /// 원본 조회 함수를 캐시로 감쌉니다. 기본 간격은 1분봉입니다.
    pub fn wrap(
        source: Arc<S>,
        store: ArtifactStore,
        namespace: impl Into<String>,
        clock: PartitionClock,
    ) -> Self {
        Self {
            source,
            store,
            namespace: namespace.into(),
            clock,
            interval: Interval::default(),
        }
    }

    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    pub fn clock(&self) -> &PartitionClock {
        &self.clock
    }

    /// 키에 포함되는 추가 인자. 간격이 다르면 다른 아티팩트가 됩니다.
    fn call_args(&self) -> CallArgs {
        CallArgs::new().kwarg("interval", self.interval.as_wire_str())
    }

    /// 마감 월 `date` 의 아티팩트 키.
    pub fn artifact_key(&self, symbol: &str, date: NaiveDate) -> ArtifactKey {
        let resolved = PartitionClock::month_end_day(date);
        let function = self.source.name();
        let key = KeyDeriver::derive_key(function, symbol, resolved, &self.call_args());
        ArtifactKey::new(function, key)
    }

    /// `date` 가 속한 달의 캔들을 조회합니다.
    ///
    /// # Returns
    ///
    /// 제공자가 데이터를 주지 않으면 `Ok(None)`.
    ///
    /// # Errors
    ///
    /// - `DataError::Storage` / `DataError::Serialization`: 캐시 파일 읽기/쓰기 실패
    /// - `DataError::Source`: 제공자 호출 실패 (그대로 전달)
    #[instrument(skip(self, token))]
    pub async fn fetch_month(
        &self,
        exchange: Exchange,
        symbol: &str,
        token: &str,
        date: NaiveDate,
    ) -> Result<Option<CandleTable>> {
        let (start, end) = match self.clock.resolve(date) {
            Partition::Live { start, end } => {
                info!(
                    symbol = symbol,
                    start = %start,
                    end = %end,
                    today = self.clock.is_today(date),
                    "현재 월 요청, 캐시 우회"
                );
                let fetched = self
                    .source
                    .fetch_candles(exchange, symbol, token, self.interval, start, end)
                    .await?;
                return Ok(non_empty(fetched));
            }
            Partition::Closed { start, end } => (start, end),
        };

        let key = self.artifact_key(symbol, end);

        match self.store.get::<CandleTable>(&self.namespace, &key).await {
            Ok(table) => {
                debug!(symbol = symbol, key = %key.key(), rows = table.len(), "캐시 히트");
                return Ok(Some(table));
            }
            Err(e) if e.is_not_found() => {
                debug!(symbol = symbol, key = %key.key(), "캐시 미스");
            }
            Err(e) => return Err(e),
        }

        info!(symbol = symbol, start = %start, end = %end, "마감 월 데이터 동기화");
        let fetched = self
            .source
            .fetch_candles(exchange, symbol, token, self.interval, start, end)
            .await?;

        match non_empty(fetched) {
            Some(table) => {
                self.store.put(&self.namespace, &key, &table).await?;
                info!(symbol = symbol, key = %key.key(), rows = table.len(), "아티팩트 저장 완료");
                Ok(Some(table))
            }
            None => {
                // 빈 결과는 저장하지 않음: 제공자가 나중에 게시할 수 있음
                warn!(symbol = symbol, start = %start, end = %end, "제공자 응답에 데이터 없음");
                Ok(None)
            }
        }
    }
}

fn non_empty(table: Option<CandleTable>) -> Option<CandleTable> {
    table.filter(|t| !t.is_empty())
}
