//! OHLCV 캔들 및 캔들 테이블.
//!
//! - `Candle` - 한 개의 OHLCV 행
//! - `CandleTable` - 시간순으로 정렬된 캔들 행 묶음 (캐시 아티팩트 단위)

use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// OHLCV 캔들 한 행.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    /// 캔들 시작 시각 (거래소 현지 오프셋 유지)
    pub timestamp: DateTime<FixedOffset>,
    /// 시가
    pub open: Decimal,
    /// 고가
    pub high: Decimal,
    /// 저가
    pub low: Decimal,
    /// 종가
    pub close: Decimal,
    /// 거래량
    pub volume: Decimal,
}

impl Candle {
    /// 고정 컬럼 순서.
    pub const COLUMNS: [&'static str; 6] = ["timestamp", "open", "high", "low", "close", "volume"];

    /// 새 캔들을 생성합니다.
    pub fn new(
        timestamp: DateTime<FixedOffset>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 거래소 현지 기준 캔들 날짜.
    pub fn trading_day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// 시간순 캔들 테이블.
///
/// 행 인덱스는 벡터 위치 그 자체이므로 `concat`/`filter_by_day` 결과는
/// 항상 0부터 다시 번호가 매겨진 것과 같습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandleTable {
    rows: Vec<Candle>,
}

impl CandleTable {
    /// 행 목록으로 테이블을 생성합니다.
    pub fn new(rows: Vec<Candle>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Candle] {
        &self.rows
    }

    pub fn first_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        self.rows.first().map(|c| c.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        self.rows.last().map(|c| c.timestamp)
    }

    /// 여러 테이블을 주어진 순서대로 이어 붙입니다.
    pub fn concat<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = CandleTable>,
    {
        let rows = tables.into_iter().flat_map(|t| t.rows).collect();
        Self { rows }
    }

    /// `day`(거래소 현지 날짜)에 해당하는 행만 남긴 새 테이블.
    pub fn filter_by_day(&self, day: NaiveDate) -> Self {
        let rows = self
            .rows
            .iter()
            .filter(|c| c.trading_day() == day)
            .cloned()
            .collect();
        Self { rows }
    }
}

impl From<Vec<Candle>> for CandleTable {
    fn from(rows: Vec<Candle>) -> Self {
        Self::new(rows)
    }
}
