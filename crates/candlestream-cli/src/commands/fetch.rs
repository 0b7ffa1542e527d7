//! 날짜 구간 캔들 조회 명령어.
//!
//! 구간이 걸친 각 달을 캐시 또는 제공자에서 가져와 이어 붙이고,
//! 요청 시 CSV 로 저장합니다.

use super::{print_summary, spinner};
use anyhow::{Context, Result};
use candlestream_core::{Candle, CandleTable, Exchange};
use candlestream_data::{CandleSource, RangeAssembler};
use chrono::NaiveDate;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// 구간 조회 설정.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub exchange: Exchange,
    pub symbol: String,
    pub token: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// CSV 출력 경로 (없으면 요약만 출력)
    pub output: Option<PathBuf>,
}

/// 구간을 조회하고 행 수를 반환합니다.
pub async fn run_fetch<S: CandleSource + ?Sized>(
    assembler: &RangeAssembler<S>,
    config: &FetchConfig,
) -> Result<usize> {
    let pb = spinner(format!(
        "{} {} ~ {} 조회 중...",
        config.symbol, config.start, config.end
    ));
    let result = assembler
        .fetch_range(
            config.exchange,
            &config.symbol,
            &config.token,
            config.start,
            config.end,
        )
        .await;
    pb.finish_and_clear();

    let table = result.with_context(|| {
        format!(
            "{} 구간 조회 실패 ({} ~ {})",
            config.symbol, config.start, config.end
        )
    })?;

    let Some(table) = table else {
        println!("\n{} 구간에 데이터가 없습니다", config.symbol);
        return Ok(0);
    };

    print_summary("구간 조회 완료", &table);

    if let Some(path) = &config.output {
        save_csv(path, &table)?;
        println!("저장 위치: {}", path.display());
    }

    Ok(table.len())
}

/// CSV 파일로 저장. 상위 디렉토리가 없으면 만듭니다.
pub fn save_csv(path: &Path, table: &CandleTable) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("출력 디렉토리 생성 실패: {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("출력 파일 생성 실패: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_csv(&mut writer, table)?;
    writer.flush()?;

    info!(path = %path.display(), rows = table.len(), "CSV 저장 완료");
    Ok(())
}

/// `timestamp,open,high,low,close,volume` 형식으로 기록.
pub fn write_csv<W: Write>(writer: &mut W, table: &CandleTable) -> std::io::Result<()> {
    writeln!(writer, "{}", Candle::COLUMNS.join(","))?;

    for candle in table.rows() {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            candle.timestamp.to_rfc3339(),
            candle.open,
            candle.high,
            candle.low,
            candle.close,
            candle.volume
        )?;
    }

    Ok(())
}
