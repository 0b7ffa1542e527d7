//! 하루/한 달 단위 캔들 조회 명령어.

use super::{print_summary, spinner};
use anyhow::{Context, Result};
use candlestream_core::Exchange;
use candlestream_data::{CandleSource, RangeAssembler};
use chrono::NaiveDate;

/// `day` 하루치 캔들을 조회하고 행 수를 반환합니다.
pub async fn run_day<S: CandleSource + ?Sized>(
    assembler: &RangeAssembler<S>,
    exchange: Exchange,
    symbol: &str,
    token: &str,
    day: NaiveDate,
) -> Result<usize> {
    let pb = spinner(format!("{} {} 조회 중...", symbol, day));
    let result = assembler.fetch_day(exchange, symbol, token, day).await;
    pb.finish_and_clear();

    match result.with_context(|| format!("{} {} 조회 실패", symbol, day))? {
        Some(table) => {
            print_summary("일 조회 완료", &table);
            Ok(table.len())
        }
        None => {
            println!("\n{} {} 데이터가 없습니다", symbol, day);
            Ok(0)
        }
    }
}

/// `date` 가 속한 달 전체를 조회하고 행 수를 반환합니다.
pub async fn run_month<S: CandleSource + ?Sized>(
    assembler: &RangeAssembler<S>,
    exchange: Exchange,
    symbol: &str,
    token: &str,
    date: NaiveDate,
) -> Result<usize> {
    let fetcher = assembler.fetcher();
    let partition = fetcher.clock().resolve(date);
    let (start, end) = partition.window();

    let pb = spinner(format!("{} {} ~ {} 조회 중...", symbol, start, end));
    let result = fetcher.fetch_month(exchange, symbol, token, date).await;
    pb.finish_and_clear();

    match result.with_context(|| format!("{} {} ~ {} 조회 실패", symbol, start, end))? {
        Some(table) => {
            let label = if partition.is_live() {
                "월 조회 완료 (현재 월, 캐시 안 함)"
            } else {
                "월 조회 완료"
            };
            print_summary(label, &table);
            Ok(table.len())
        }
        None => {
            println!("\n{} {} ~ {} 데이터가 없습니다", symbol, start, end);
            Ok(0)
        }
    }
}
