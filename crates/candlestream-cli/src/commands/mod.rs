//! CLI 명령어 구현 모듈.

pub mod cache;
pub mod day;
pub mod fetch;

use candlestream_core::CandleTable;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// 조회 중 표시할 스피너.
pub(crate) fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// 조회 결과 요약 출력.
pub(crate) fn print_summary(label: &str, table: &CandleTable) {
    println!("\n{}: {} 캔들", label, table.len());
    if let (Some(first), Some(last)) = (table.first_timestamp(), table.last_timestamp()) {
        println!("기간: {} ~ {}", first.to_rfc3339(), last.to_rfc3339());
    }
}
