//! CandleStream CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # SBIN-EQ 1분봉 구간 조회 후 CSV 저장
//! candlestream fetch -e NSE -s SBIN-EQ -t 3045 -f 2024-01-01 --to 2024-03-15 -o data/sbin.csv
//!
//! # 하루치 조회
//! candlestream day -e NSE -s SBIN-EQ -t 3045 -d 2024-02-14
//!
//! # 저장된 캐시 목록
//! candlestream --env-file ~/.broker.env cache ls
//! ```

use anyhow::Result;
use candlestream_cli::bootstrap::{self, ENV_FILE_VAR};
use candlestream_cli::commands::{cache, day, fetch};
use candlestream_core::{AppConfig, Exchange};
use candlestream_data::{ArtifactStore, CacheContext, RangeAssembler};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "candlestream")]
#[command(about = "월 단위 캐시를 거치는 과거 캔들 조회 도구", long_about = None)]
#[command(version)]
struct Cli {
    /// 환경 파일 경로 (지정했는데 없으면 시작 실패)
    #[arg(long, global = true, env = ENV_FILE_VAR)]
    env_file: Option<PathBuf>,

    /// 설정 파일 (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// 종목 식별 인자.
#[derive(Args, Debug, Clone)]
struct InstrumentArgs {
    /// 거래소 (NSE, BSE, NFO, BFO, MCX, CDS)
    #[arg(short, long)]
    exchange: Exchange,

    /// 거래 심볼 (예: SBIN-EQ)
    #[arg(short, long)]
    symbol: String,

    /// 제공자 심볼 토큰 (예: 3045)
    #[arg(short, long)]
    token: String,
}

#[derive(Subcommand)]
enum Commands {
    /// 날짜 구간 캔들 조회
    Fetch {
        #[command(flatten)]
        instrument: InstrumentArgs,

        /// 시작 날짜 (YYYY-MM-DD)
        #[arg(short = 'f', long)]
        from: NaiveDate,

        /// 종료 날짜 (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,

        /// CSV 출력 경로
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 하루치 캔들 조회
    Day {
        #[command(flatten)]
        instrument: InstrumentArgs,

        /// 조회 날짜 (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,
    },

    /// 날짜가 속한 달 전체 조회
    Month {
        #[command(flatten)]
        instrument: InstrumentArgs,

        /// 달 안의 아무 날짜 (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,
    },

    /// 캐시 관리
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// 저장된 아티팩트 목록
    Ls,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_file = bootstrap::load_env_file(cli.env_file.as_deref())?;
    let config = bootstrap::load_config(cli.config.as_deref(), cli.log_level.as_deref())?;
    bootstrap::init_tracing(&config)?;

    if let Some(path) = &env_file {
        info!(path = %path.display(), "환경 파일 로드 완료");
    }
    info!(
        root_dir = %config.cache.root_dir.display(),
        namespace = %config.cache.namespace,
        interval = %config.provider.interval,
        "CandleStream 시작"
    );

    let source = bootstrap::connect(&config).await?;
    let assembler = RangeAssembler::new(source, CacheContext::from_config(&config));

    match cli.command {
        Commands::Fetch {
            instrument,
            from,
            to,
            output,
        } => {
            let fetch_config = fetch::FetchConfig {
                exchange: instrument.exchange,
                symbol: instrument.symbol,
                token: instrument.token,
                start: from,
                end: to,
                output,
            };
            fetch::run_fetch(&assembler, &fetch_config).await?;
        }

        Commands::Day { instrument, date } => {
            day::run_day(
                &assembler,
                instrument.exchange,
                &instrument.symbol,
                &instrument.token,
                date,
            )
            .await?;
        }

        Commands::Month { instrument, date } => {
            day::run_month(
                &assembler,
                instrument.exchange,
                &instrument.symbol,
                &instrument.token,
                date,
            )
            .await?;
        }

        Commands::Cache {
            action: CacheAction::Ls,
        } => {
            cache::run_ls(&artifact_store(&config), &config.cache.namespace).await?;
        }
    }

    Ok(())
}

fn artifact_store(config: &AppConfig) -> ArtifactStore {
    ArtifactStore::new(config.cache.root_dir.clone())
}
