//! 프로세스 부트스트랩.
//!
//! 환경 파일 → 설정 로드/검증 → 로깅 → 제공자 연결 확인 순서로 진행하며,
//! 어느 단계든 실패하면 명령을 실행하지 않고 0이 아닌 코드로 종료합니다.

use anyhow::{anyhow, bail, Context, Result};
use candlestream_core::{init_logging, AppConfig, LogConfig};
use candlestream_data::{CandleSource, HttpCandleSource};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// 환경 파일 경로를 지정하는 환경 변수.
pub const ENV_FILE_VAR: &str = "BROKER_ENV_FILE_PATH";

/// 환경 파일을 로드합니다.
///
/// 경로가 지정되었는데 파일이 없으면 오류입니다. 지정되지 않았으면
/// 현재 디렉토리의 `.env` 를 있을 때만 로드합니다.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>> {
    match path {
        Some(path) => {
            if !path.is_file() {
                bail!("환경 파일을 찾을 수 없습니다: {}", path.display());
            }
            dotenvy::from_path(path)
                .with_context(|| format!("환경 파일 로드 실패: {}", path.display()))?;
            Ok(Some(path.to_path_buf()))
        }
        None => Ok(dotenvy::dotenv().ok()),
    }
}

/// 설정을 로드하고 검증합니다. `log_level` 이 주어지면 설정 값을 덮어씁니다.
pub fn load_config(path: Option<&Path>, log_level: Option<&str>) -> Result<AppConfig> {
    let mut config = AppConfig::load(path).context("설정 로드 실패")?;

    if let Some(level) = log_level {
        config.logging.level = level.to_string();
    }

    config.validate().context("설정 검증 실패")?;
    Ok(config)
}

/// 설정의 `[logging]` 섹션으로 전역 subscriber 를 설치합니다.
pub fn init_tracing(config: &AppConfig) -> Result<()> {
    init_logging(LogConfig::from_settings(&config.logging))
        .map_err(|e| anyhow!("로깅 초기화 실패: {}", e))
}

/// HTTP 제공자를 만들고 연결을 확인합니다.
pub async fn connect(config: &AppConfig) -> Result<Arc<HttpCandleSource>> {
    let source =
        HttpCandleSource::from_config(&config.provider).context("HTTP 클라이언트 생성 실패")?;

    source
        .check_connectivity()
        .await
        .with_context(|| format!("제공자 연결 확인 실패: {}", config.provider.base_url))?;

    info!(
        source = source.name(),
        client_code = source.client_code(),
        "제공자 연결 확인 완료"
    );
    Ok(Arc::new(source))
}
