//! 날짜 → 캐시 파티션 변환.
//!
//! 현재 달에 속한 날짜는 "라이브", 그 밖의 날짜는 "마감"으로 분류하고
//! 마감 월은 월말 날짜 하나로 정규화합니다.

use chrono::{Datelike, Local, NaiveDate};
use std::fmt;
use std::sync::{Arc, RwLock};

/// "오늘"을 알려주는 시계.
pub trait Clock: Send + Sync + fmt::Debug {
    fn today(&self) -> NaiveDate;
}

/// 로컬 시스템 시계.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// 고정 날짜 시계 (테스트, 재현 가능한 배치 실행용).
#[derive(Debug)]
pub struct FixedClock {
    today: RwLock<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: RwLock::new(today),
        }
    }

    /// 시계를 다른 날짜로 옮깁니다.
    pub fn set_today(&self, today: NaiveDate) {
        let mut guard = self.today.write().unwrap_or_else(|e| e.into_inner());
        *guard = today;
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.today.read().unwrap_or_else(|e| e.into_inner())
    }
}

/// 요청 날짜가 속한 캐시 파티션.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    /// 현재 달. `start`(월초) ..= `end`(오늘), 캐시하지 않음
    Live { start: NaiveDate, end: NaiveDate },
    /// 지난(또는 미래) 달. `start`(월초) ..= `end`(월말)
    Closed { start: NaiveDate, end: NaiveDate },
}

impl Partition {
    pub fn is_live(&self) -> bool {
        matches!(self, Partition::Live { .. })
    }

    /// 제공자에 요청할 조회 구간.
    pub fn window(&self) -> (NaiveDate, NaiveDate) {
        match *self {
            Partition::Live { start, end } | Partition::Closed { start, end } => (start, end),
        }
    }
}

/// 파티션 판정기.
#[derive(Debug, Clone)]
pub struct PartitionClock {
    clock: Arc<dyn Clock>,
}

impl Default for PartitionClock {
    fn default() -> Self {
        Self::system()
    }
}

impl PartitionClock {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// 로컬 시스템 시계 기반.
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// `date` 가 속한 달의 마지막 날. 12월은 다음 해 1월 1일 전날로 계산합니다.
    ///
    /// `NaiveDate::MAX` 이후로 넘어가는 경우에만 `NaiveDate::MAX` 로 포화됩니다.
    pub fn month_end_day(date: NaiveDate) -> NaiveDate {
        let (year, month) = if date.month() == 12 {
            (date.year() + 1, 1)
        } else {
            (date.year(), date.month() + 1)
        };

        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|first_of_next| first_of_next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// `date` 가 속한 달의 첫날.
    pub fn month_start_day(date: NaiveDate) -> NaiveDate {
        date.with_day(1).unwrap_or(date)
    }

    /// 오늘과 같은 연/월인지.
    pub fn is_current_month(&self, date: NaiveDate) -> bool {
        let today = self.today();
        date.year() == today.year() && date.month() == today.month()
    }

    pub fn is_today(&self, date: NaiveDate) -> bool {
        date == self.today()
    }

    /// 요청 날짜를 파티션으로 변환합니다.
    ///
    /// "오늘"은 한 번만 읽으므로 같은 호출 안에서 판정과 구간이 어긋나지 않습니다.
    pub fn resolve(&self, date: NaiveDate) -> Partition {
        let today = self.today();
        let start = Self::month_start_day(date);

        if date.year() == today.year() && date.month() == today.month() {
            Partition::Live { start, end: today }
        } else {
            Partition::Closed {
                start,
                end: Self::month_end_day(date),
            }
        }
    }
}
