//! 여러 달 구간 조립 통합 테스트.

mod common;

use candlestream_core::Exchange;
use candlestream_data::{CacheContext, DataError, PartitionClock, RangeAssembler};
use common::{date, fixed_clock, month_table, CountingSource};
use std::sync::Arc;
use tempfile::TempDir;

const TOKEN: &str = "265";

fn assembler(
    source: &Arc<CountingSource>,
    dir: &TempDir,
    clock: PartitionClock,
) -> RangeAssembler<CountingSource> {
    let context = CacheContext::new(dir.path(), "data").with_clock(clock);
    RangeAssembler::new(source.clone(), context)
}

#[tokio::test]
async fn test_inverted_range_is_rejected_without_calls() {
    let dir = TempDir::new().unwrap();
    let source = Arc::new(CountingSource::new());
    let (_, clock) = fixed_clock(date(2023, 3, 15));
    let assembler = assembler(&source, &dir, clock);

    let err = assembler
        .fetch_range(Exchange::Nse, "AAPL", TOKEN, date(2023, 3, 1), date(2023, 1, 1))
        .await
        .unwrap_err();

    assert!(matches!(err, DataError::InvalidRange { .. }));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_range_spanning_live_month() {
    let dir = TempDir::new().unwrap();
    let source = Arc::new(
        CountingSource::new()
            .with_month(2023, 1, month_table(2023, 1, &[16, 17]))
            .with_month(2023, 2, month_table(2023, 2, &[1]))
            .with_month(2023, 3, month_table(2023, 3, &[1, 9])),
    );
    let (_, clock) = fixed_clock(date(2023, 3, 10));
    let assembler = assembler(&source, &dir, clock);

    let table = assembler
        .fetch_range(Exchange::Nse, "AAPL", TOKEN, date(2023, 1, 15), date(2023, 3, 10))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(source.calls(), 3);
    assert_eq!(table.len(), 10);

    let windows: Vec<_> = source.log().iter().map(|c| (c.start, c.end)).collect();
    assert_eq!(
        windows,
        vec![
            (date(2023, 1, 1), date(2023, 1, 31)),
            (date(2023, 2, 1), date(2023, 2, 28)),
            (date(2023, 3, 1), date(2023, 3, 10)),
        ]
    );

    // 월 경계를 넘어도 시간순 유지
    let timestamps: Vec<_> = table.rows().iter().map(|c| c.timestamp).collect();
    let mut sorted = timestamps.clone();
    sorted.sort();
    assert_eq!(timestamps, sorted);

    // 마감된 1, 2월은 캐시에서, 3월은 다시 제공자에서
    assembler
        .fetch_range(Exchange::Nse, "AAPL", TOKEN, date(2023, 1, 15), date(2023, 3, 10))
        .await
        .unwrap();
    assert_eq!(source.calls(), 4);
}

#[tokio::test]
async fn test_months_without_data_are_skipped() {
    let dir = TempDir::new().unwrap();
    let source = Arc::new(
        CountingSource::new()
            .with_month(2022, 10, month_table(2022, 10, &[3]))
            .with_month(2022, 12, month_table(2022, 12, &[1, 2])),
    );
    let (_, clock) = fixed_clock(date(2023, 3, 15));
    let assembler = assembler(&source, &dir, clock);

    let table = assembler
        .fetch_range(Exchange::Nse, "INFY-EQ", TOKEN, date(2022, 10, 1), date(2022, 12, 31))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(source.calls(), 3);
    assert_eq!(table.len(), 6);
    assert_eq!(
        table.first_timestamp().map(|t| t.date_naive()),
        Some(date(2022, 10, 3))
    );
    assert_eq!(
        table.last_timestamp().map(|t| t.date_naive()),
        Some(date(2022, 12, 2))
    );
    // 11월은 저장되지 않음
    assert_eq!(assembler.fetcher().store().list("data").await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_range_with_no_data_is_none() {
    let dir = TempDir::new().unwrap();
    let source = Arc::new(CountingSource::new());
    let (_, clock) = fixed_clock(date(2023, 3, 15));
    let assembler = assembler(&source, &dir, clock);

    let table = assembler
        .fetch_range(Exchange::Nse, "AAPL", TOKEN, date(2022, 5, 1), date(2022, 6, 30))
        .await
        .unwrap();

    assert!(table.is_none());
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_start_on_last_month_end_fetches_nothing() {
    let dir = TempDir::new().unwrap();
    let source = Arc::new(CountingSource::new().with_month(2023, 1, month_table(2023, 1, &[31])));
    let (_, clock) = fixed_clock(date(2023, 3, 15));
    let assembler = assembler(&source, &dir, clock);

    // 커서가 이미 마지막 월말이므로 반복이 한 번도 돌지 않음
    let table = assembler
        .fetch_range(Exchange::Nse, "AAPL", TOKEN, date(2023, 1, 31), date(2023, 1, 31))
        .await
        .unwrap();

    assert!(table.is_none());
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_single_day_range_inside_month_fetches_whole_month() {
    let dir = TempDir::new().unwrap();
    let source =
        Arc::new(CountingSource::new().with_month(2023, 1, month_table(2023, 1, &[16, 30])));
    let (_, clock) = fixed_clock(date(2023, 3, 15));
    let assembler = assembler(&source, &dir, clock);

    let table = assembler
        .fetch_range(Exchange::Nse, "AAPL", TOKEN, date(2023, 1, 30), date(2023, 1, 30))
        .await
        .unwrap();

    // 월 단위로 조회하므로 그 달 전체가 반환됨
    assert_eq!(table.map(|t| t.len()), Some(4));
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_month_end_start_still_reaches_next_month() {
    let dir = TempDir::new().unwrap();
    let source = Arc::new(
        CountingSource::new()
            .with_month(2023, 1, month_table(2023, 1, &[31]))
            .with_month(2023, 2, month_table(2023, 2, &[1])),
    );
    let (_, clock) = fixed_clock(date(2023, 3, 15));
    let assembler = assembler(&source, &dir, clock);

    let table = assembler
        .fetch_range(Exchange::Nse, "AAPL", TOKEN, date(2023, 1, 31), date(2023, 2, 1))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(source.calls(), 2);
    assert_eq!(table.len(), 4);
}

#[tokio::test]
async fn test_year_boundary() {
    let dir = TempDir::new().unwrap();
    let source = Arc::new(
        CountingSource::new()
            .with_month(2022, 12, month_table(2022, 12, &[30]))
            .with_month(2023, 1, month_table(2023, 1, &[2])),
    );
    let (_, clock) = fixed_clock(date(2023, 3, 15));
    let assembler = assembler(&source, &dir, clock);

    let table = assembler
        .fetch_range(Exchange::Nse, "AAPL", TOKEN, date(2022, 12, 15), date(2023, 1, 15))
        .await
        .unwrap()
        .unwrap();

    let windows: Vec<_> = source.log().iter().map(|c| (c.start, c.end)).collect();
    assert_eq!(
        windows,
        vec![
            (date(2022, 12, 1), date(2022, 12, 31)),
            (date(2023, 1, 1), date(2023, 1, 31)),
        ]
    );
    assert_eq!(table.len(), 4);
}

#[tokio::test]
async fn test_fetch_day_filters_month() {
    let dir = TempDir::new().unwrap();
    let source = Arc::new(CountingSource::new().with_month(2023, 1, month_table(2023, 1, &[2, 3, 4])));
    let (_, clock) = fixed_clock(date(2023, 3, 15));
    let assembler = assembler(&source, &dir, clock);

    let day = assembler
        .fetch_day(Exchange::Nse, "SBIN-EQ", TOKEN, date(2023, 1, 3))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(day.len(), 2);
    assert!(day.rows().iter().all(|c| c.trading_day() == date(2023, 1, 3)));

    // 같은 달의 다른 날은 캐시에서
    let holiday = assembler
        .fetch_day(Exchange::Nse, "SBIN-EQ", TOKEN, date(2023, 1, 26))
        .await
        .unwrap();
    assert!(holiday.is_none());
    assert_eq!(source.calls(), 1);
}
