//! 거래소 세그먼트 정의.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 캔들을 조회할 거래소 세그먼트.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Exchange {
    /// NSE 현물
    Nse,
    /// BSE 현물
    Bse,
    /// NSE 선물/옵션
    Nfo,
    /// BSE 선물/옵션
    Bfo,
    /// 원자재
    Mcx,
    /// 통화 파생
    Cds,
}

impl Exchange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Exchange::Nse => "NSE",
            Exchange::Bse => "BSE",
            Exchange::Nfo => "NFO",
            Exchange::Bfo => "BFO",
            Exchange::Mcx => "MCX",
            Exchange::Cds => "CDS",
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Exchange {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NSE" => Ok(Exchange::Nse),
            "BSE" => Ok(Exchange::Bse),
            "NFO" => Ok(Exchange::Nfo),
            "BFO" => Ok(Exchange::Bfo),
            "MCX" => Ok(Exchange::Mcx),
            "CDS" => Ok(Exchange::Cds),
            _ => Err(CoreError::InvalidInput(format!("Unknown exchange: {}", s))),
        }
    }
}
