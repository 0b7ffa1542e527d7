//! SmartAPI 호환 REST 캔들 제공자.
//!
//! 로그인/TOTP 세션 생성은 다루지 않으며, 설정으로 받은 액세스 토큰을
//! 그대로 Bearer 헤더에 싣습니다.

use super::{CandleSource, SourceError};
use async_trait::async_trait;
use candlestream_core::{Candle, CandleTable, Exchange, Interval, ProviderConfig};
use chrono::{DateTime, FixedOffset, NaiveDate};
use reqwest::{Client, Response, StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const CANDLE_PATH: &str = "/rest/secure/angelbroking/historical/v1/getCandleData";
const PROFILE_PATH: &str = "/rest/secure/angelbroking/user/v1/getProfile";

/// 캔들 조회 요청 본문.
#[derive(Debug, Serialize)]
struct CandleRequest<'a> {
    exchange: &'a str,
    symboltoken: &'a str,
    interval: &'a str,
    fromdate: String,
    todate: String,
}

/// 공통 응답 봉투.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: bool,
    #[serde(default)]
    message: String,
    #[serde(default)]
    errorcode: String,
    data: Option<T>,
}

/// `[timestamp, open, high, low, close, volume]`
type RawCandle = (DateTime<FixedOffset>, Decimal, Decimal, Decimal, Decimal, Decimal);

/// REST 기반 캔들 제공자.
#[derive(Debug, Clone)]
pub struct HttpCandleSource {
    client: Client,
    base_url: String,
    api_key: String,
    client_code: String,
    access_token: String,
}

impl HttpCandleSource {
    /// 함수 식별자. 캐시 파일 이름에 그대로 쓰입니다.
    pub const NAME: &'static str = "smartapi.historical_candles";

    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client_code: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client_code: client_code.into(),
            access_token: access_token.into(),
        })
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, SourceError> {
        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            config.client_code.clone(),
            config.access_token.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn client_code(&self) -> &str {
        &self.client_code
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .bearer_auth(&self.access_token)
            .header("Accept", "application/json")
            .header("X-PrivateKey", &self.api_key)
            .header("X-UserType", "USER")
            .header("X-SourceID", "WEB")
    }

    /// HTTP 상태 코드 → SourceError, 본문 → Envelope.
    async fn decode<T>(response: Response) -> Result<Envelope<T>, SourceError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    SourceError::Authentication(format!("{} - {}", status, body))
                }
                StatusCode::TOO_MANY_REQUESTS => SourceError::RateLimit(body),
                _ => SourceError::Api {
                    code: status.as_u16().to_string(),
                    message: body,
                },
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| SourceError::Parse(e.to_string()))
    }
}

fn format_bound(date: NaiveDate, time: &str) -> String {
    format!("{} {}", date.format("%Y-%m-%d"), time)
}

#[async_trait]
impl CandleSource for HttpCandleSource {
    fn name(&self) -> &str {
        Self::NAME
    }

    #[instrument(skip(self, token))]
    async fn fetch_candles(
        &self,
        exchange: Exchange,
        symbol: &str,
        token: &str,
        interval: Interval,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<CandleTable>, SourceError> {
        let request = CandleRequest {
            exchange: exchange.as_str(),
            symboltoken: token,
            interval: interval.as_wire_str(),
            // 종료일 당일 장중 데이터까지 포함
            fromdate: format_bound(start, "00:00"),
            todate: format_bound(end, "23:59"),
        };

        let response = self
            .authorized(self.client.post(format!("{}{}", self.base_url, CANDLE_PATH)))
            .json(&request)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let envelope: Envelope<Vec<RawCandle>> = Self::decode(response).await?;
        if !envelope.status {
            return Err(SourceError::Api {
                code: envelope.errorcode,
                message: envelope.message,
            });
        }

        let table: Option<CandleTable> = envelope.data.map(|rows| {
            rows.into_iter()
                .map(|(ts, o, h, l, c, v)| Candle::new(ts, o, h, l, c, v))
                .collect::<Vec<_>>()
                .into()
        });

        debug!(
            symbol = symbol,
            start = %start,
            end = %end,
            rows = table.as_ref().map(CandleTable::len).unwrap_or(0),
            "캔들 조회 응답"
        );

        Ok(table)
    }

    async fn check_connectivity(&self) -> Result<(), SourceError> {
        let response = self
            .authorized(self.client.get(format!("{}{}", self.base_url, PROFILE_PATH)))
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let envelope: Envelope<serde_json::Value> = Self::decode(response).await?;
        if !envelope.status {
            return Err(SourceError::Authentication(format!(
                "[{}] {}",
                envelope.errorcode, envelope.message
            )));
        }
        Ok(())
    }
}
