//! 통합 테스트용 가짜 캔들 제공자.

#![allow(dead_code)]

use async_trait::async_trait;
use candlestream_core::{Candle, CandleTable, Exchange, Interval};
use candlestream_data::{CandleSource, FixedClock, PartitionClock, SourceError};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn fixed_clock(today: NaiveDate) -> (Arc<FixedClock>, PartitionClock) {
    let fixed = Arc::new(FixedClock::new(today));
    (fixed.clone(), PartitionClock::new(fixed))
}

/// 하루 2개(09:15, 09:16 IST)씩 캔들을 만들어 `days` 일치 테이블을 생성.
pub fn month_table(year: i32, month: u32, days: &[u32]) -> CandleTable {
    let mut rows = Vec::new();
    for &day in days {
        for minute in [15, 16] {
            let ts: DateTime<FixedOffset> = DateTime::parse_from_rfc3339(&format!(
                "{:04}-{:02}-{:02}T09:{:02}:00+05:30",
                year, month, day, minute
            ))
            .unwrap();
            let base = Decimal::from(100 + day);
            rows.push(Candle::new(
                ts,
                base,
                base + Decimal::ONE,
                base - Decimal::ONE,
                base + Decimal::from(minute) / Decimal::from(100),
                Decimal::from(1000 * minute),
            ));
        }
    }
    CandleTable::new(rows)
}

/// 호출 기록.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub symbol: String,
    pub interval: Interval,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// 월별로 미리 정한 응답을 돌려주고 호출 횟수를 세는 제공자.
#[derive(Default)]
pub struct CountingSource {
    months: Mutex<HashMap<(i32, u32), CandleTable>>,
    failing: Mutex<Option<(i32, u32)>>,
    calls: AtomicUsize,
    log: Mutex<Vec<Call>>,
}

impl CountingSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_month(self, year: i32, month: u32, table: CandleTable) -> Self {
        self.set_month(year, month, table);
        self
    }

    pub fn set_month(&self, year: i32, month: u32, table: CandleTable) {
        self.months.lock().unwrap().insert((year, month), table);
    }

    /// 해당 달 요청 시 네트워크 오류를 돌려줌.
    pub fn fail_on(&self, year: i32, month: u32) {
        *self.failing.lock().unwrap() = Some((year, month));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn log(&self) -> Vec<Call> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl CandleSource for CountingSource {
    fn name(&self) -> &str {
        "tests.counting_source"
    }

    async fn fetch_candles(
        &self,
        _exchange: Exchange,
        symbol: &str,
        _token: &str,
        interval: Interval,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<CandleTable>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push(Call {
            symbol: symbol.to_string(),
            interval,
            start,
            end,
        });

        let month = (start.year(), start.month());
        if *self.failing.lock().unwrap() == Some(month) {
            return Err(SourceError::Network("connection reset".to_string()));
        }

        Ok(self.months.lock().unwrap().get(&month).cloned())
    }
}
