//! 여러 달에 걸친 구간 조립.

use crate::cache::memo::MemoizingFetcher;
use crate::cache::partition::PartitionClock;
use crate::cache::store::ArtifactStore;
use crate::error::{DataError, Result};
use crate::provider::CandleSource;
use candlestream_core::{AppConfig, CandleTable, Exchange, Interval};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// 캐시 실행 컨텍스트.
///
/// 캐시 디렉토리, 네임스페이스, 시계를 전역 대신 명시적으로 전달합니다.
#[derive(Debug, Clone)]
pub struct CacheContext {
    pub root_dir: PathBuf,
    pub namespace: String,
    pub interval: Interval,
    pub clock: PartitionClock,
}

impl CacheContext {
    pub fn new(root_dir: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            root_dir: root_dir.into(),
            namespace: namespace.into(),
            interval: Interval::default(),
            clock: PartitionClock::system(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            root_dir: config.cache.root_dir.clone(),
            namespace: config.cache.namespace.clone(),
            interval: config.provider.interval,
            clock: PartitionClock::system(),
        }
    }

    pub fn with_clock(mut self, clock: PartitionClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }
}

/// 월별 페처를 반복 호출해 하나의 테이블을 만듭니다.
pub struct RangeAssembler<S: ?Sized> {
    fetcher: MemoizingFetcher<S>,
}

impl<S: CandleSource + ?Sized> RangeAssembler<S> {
    /// 연결된 제공자 핸들을 주입받아 생성합니다.
    pub fn new(source: Arc<S>, context: CacheContext) -> Self {
        let store = ArtifactStore::new(context.root_dir);
        let fetcher = MemoizingFetcher::wrap(source, store, context.namespace, context.clock)
            .with_interval(context.interval);
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &MemoizingFetcher<S> {
        &self.fetcher
    }

    /// `start`..=`end` 가 걸친 모든 달의 캔들을 시간순으로 이어 붙입니다.
    ///
    /// 데이터가 있는 달이 하나도 없으면 `Ok(None)`.
    ///
    /// # Errors
    ///
    /// - `DataError::InvalidRange`: `start > end`. 제공자는 호출되지 않습니다.
    /// - 저장소/제공자 오류는 그 달에서 즉시 전달됩니다.
    #[instrument(skip(self, token))]
    pub async fn fetch_range(
        &self,
        exchange: Exchange,
        symbol: &str,
        token: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<CandleTable>> {
        if start > end {
            warn!(symbol = symbol, start = %start, end = %end, "잘못된 날짜 구간, 동기화 불가");
            return Err(DataError::InvalidRange { start, end });
        }

        let last = PartitionClock::month_end_day(end);
        let mut months = Vec::new();
        let mut cursor = start;

        // 시작일이 마지막 달의 월말이면 조회할 달이 없음
        while cursor < last {
            let boundary = PartitionClock::month_end_day(cursor);
            if let Some(table) = self
                .fetcher
                .fetch_month(exchange, symbol, token, boundary)
                .await?
            {
                months.push(table);
            }

            cursor = match boundary.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        if months.is_empty() {
            info!(symbol = symbol, start = %start, end = %end, "구간에 데이터 없음");
            return Ok(None);
        }

        let month_count = months.len();
        let table = CandleTable::concat(months);
        info!(
            symbol = symbol,
            months = month_count,
            rows = table.len(),
            "구간 조립 완료"
        );
        Ok(Some(table))
    }

    /// 하루치 캔들. 그 달을 조회한 뒤 `day` 로 걸러냅니다.
    pub async fn fetch_day(
        &self,
        exchange: Exchange,
        symbol: &str,
        token: &str,
        day: NaiveDate,
    ) -> Result<Option<CandleTable>> {
        let month = self.fetcher.fetch_month(exchange, symbol, token, day).await?;
        Ok(month
            .map(|table| table.filter_by_day(day))
            .filter(|table| !table.is_empty()))
    }
}
