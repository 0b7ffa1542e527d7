//! 설정 관리.
//!
//! 기본값 → (선택) TOML 파일 → `CANDLESTREAM__SECTION__KEY` 환경 변수 순으로
//! 병합합니다.

use crate::error::{CoreError, CoreResult};
use crate::types::Interval;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// 환경 변수 접두사.
pub const ENV_PREFIX: &str = "CANDLESTREAM";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 캐시 저장소 설정
    #[serde(default)]
    pub cache: CacheConfig,
    /// 데이터 제공자 설정
    #[serde(default)]
    pub provider: ProviderConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 캐시 저장소 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// 캐시 루트 디렉토리
    pub root_dir: PathBuf,
    /// 논리 데이터셋 하위 디렉토리
    pub namespace: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("cache"),
            namespace: "data".to_string(),
        }
    }
}

/// 데이터 제공자 접속 설정.
#[derive(Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// REST API 기본 URL
    pub base_url: String,
    /// API 키
    #[serde(default)]
    pub api_key: String,
    /// 클라이언트 코드
    #[serde(default)]
    pub client_code: String,
    /// 사전 발급된 액세스 토큰
    #[serde(default)]
    pub access_token: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// 수집 캔들 간격
    pub interval: Interval,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://apiconnect.angelbroking.com".to_string(),
            api_key: String::new(),
            client_code: String::new(),
            access_token: String::new(),
            timeout_secs: 30,
            interval: Interval::OneMinute,
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &redact(&self.api_key))
            .field("client_code", &self.client_code)
            .field("access_token", &redact(&self.access_token))
            .field("timeout_secs", &self.timeout_secs)
            .field("interval", &self.interval)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
    /// `#[instrument]` span 진입/종료 이벤트 출력 여부
    #[serde(default)]
    pub span_events: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            span_events: false,
        }
    }
}

impl AppConfig {
    /// 기본값, 파일(선택), 환경 변수에서 설정을 로드합니다.
    pub fn load(path: Option<&Path>) -> CoreResult<Self> {
        let defaults = AppConfig::default();

        let mut builder = config::Config::builder()
            .set_default(
                "cache.root_dir",
                defaults.cache.root_dir.to_string_lossy().to_string(),
            )?
            .set_default("cache.namespace", defaults.cache.namespace)?
            .set_default("provider.base_url", defaults.provider.base_url)?
            .set_default("provider.timeout_secs", defaults.provider.timeout_secs)?
            .set_default("provider.interval", defaults.provider.interval.as_wire_str())?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?;

        if let Some(path) = path {
            if !path.exists() {
                return Err(CoreError::Config(format!(
                    "설정 파일이 없습니다: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(config::File::from(path));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// 필수 접속 정보가 모두 채워졌는지 확인합니다.
    pub fn validate(&self) -> CoreResult<()> {
        let provider = &self.provider;
        let required = [
            ("provider.base_url", provider.base_url.as_str()),
            ("provider.api_key", provider.api_key.as_str()),
            ("provider.client_code", provider.client_code.as_str()),
            ("provider.access_token", provider.access_token.as_str()),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(key, _)| *key)
            .collect();

        if !missing.is_empty() {
            return Err(CoreError::Config(format!(
                "필수 설정이 비어 있습니다: {}",
                missing.join(", ")
            )));
        }

        if self.cache.namespace.trim().is_empty() {
            return Err(CoreError::Config("cache.namespace 가 비어 있습니다".to_string()));
        }

        Ok(())
    }
}
