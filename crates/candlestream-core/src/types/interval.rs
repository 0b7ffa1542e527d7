//! 데이터 제공자 캔들 간격 정의.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 캔들 간격.
///
/// 제공자 API 의 와이어 이름(`ONE_MINUTE` 등)으로 직렬화됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Interval {
    /// 1분봉
    #[default]
    OneMinute,
    /// 3분봉
    ThreeMinute,
    /// 5분봉
    FiveMinute,
    /// 10분봉
    TenMinute,
    /// 15분봉
    FifteenMinute,
    /// 30분봉
    ThirtyMinute,
    /// 1시간봉
    OneHour,
    /// 일봉
    OneDay,
}

impl Interval {
    /// 제공자 API 간격 문자열.
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            Interval::OneMinute => "ONE_MINUTE",
            Interval::ThreeMinute => "THREE_MINUTE",
            Interval::FiveMinute => "FIVE_MINUTE",
            Interval::TenMinute => "TEN_MINUTE",
            Interval::FifteenMinute => "FIFTEEN_MINUTE",
            Interval::ThirtyMinute => "THIRTY_MINUTE",
            Interval::OneHour => "ONE_HOUR",
            Interval::OneDay => "ONE_DAY",
        }
    }

    /// 와이어 이름 또는 축약형(`1m`, `5m`, `1h`, `1d` ...)에서 파싱합니다.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ONE_MINUTE" | "1M" | "1MIN" => Some(Interval::OneMinute),
            "THREE_MINUTE" | "3M" | "3MIN" => Some(Interval::ThreeMinute),
            "FIVE_MINUTE" | "5M" | "5MIN" => Some(Interval::FiveMinute),
            "TEN_MINUTE" | "10M" | "10MIN" => Some(Interval::TenMinute),
            "FIFTEEN_MINUTE" | "15M" | "15MIN" => Some(Interval::FifteenMinute),
            "THIRTY_MINUTE" | "30M" | "30MIN" => Some(Interval::ThirtyMinute),
            "ONE_HOUR" | "1H" => Some(Interval::OneHour),
            "ONE_DAY" | "1D" => Some(Interval::OneDay),
            _ => None,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

impl FromStr for Interval {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CoreError::InvalidInput(format!("Invalid interval: {}", s)))
    }
}
