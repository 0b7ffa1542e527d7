//! 결정적 캐시 키 생성.
//!
//! 키 = `{심볼 슬러그}_{정규화 날짜}_{sha256(직렬화된 인자) hex}`.
//! 앞부분은 사람이 파일 목록을 읽을 때를 위한 것이고, 충돌 방지는 해시가 담당합니다.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

/// 제공자 호출에 딸린 추가 인자.
///
/// 키워드 인자는 `BTreeMap` 에 보관되므로 삽입 순서와 무관하게 항상 정렬된
/// 순서로 직렬화됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallArgs {
    positional: Vec<String>,
    keyword: BTreeMap<String, String>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// 위치 인자 추가.
    pub fn arg(mut self, value: impl ToString) -> Self {
        self.positional.push(value.to_string());
        self
    }

    /// 키워드 인자 추가. 같은 이름이면 덮어씁니다.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.keyword.insert(name.into(), value.to_string());
        self
    }

    /// 안정적인 텍스트 표현: `[위치 인자 JSON]:{키워드 인자 JSON}`.
    fn canonical(&self) -> String {
        let positional = Value::Array(
            self.positional
                .iter()
                .map(|v| Value::String(v.clone()))
                .collect(),
        );
        let keyword: Map<String, Value> = self
            .keyword
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();

        format!("{}:{}", positional, Value::Object(keyword))
    }
}

/// 파생된 캐시 키.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// 캐시 키 생성기.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyDeriver;

impl KeyDeriver {
    /// 함수 식별자, 심볼, 정규화 날짜, 추가 인자로부터 키를 만듭니다.
    ///
    /// 메모리 주소나 해시맵 순회 순서에 의존하지 않으므로 프로세스 재시작
    /// 후에도 같은 입력은 같은 키가 됩니다.
    pub fn derive_key(
        function: &str,
        symbol: &str,
        resolved: NaiveDate,
        args: &CallArgs,
    ) -> CacheKey {
        let date = resolved.format("%Y-%m-%d").to_string();
        let serialized = format!("{}:{}:{}:{}", function, symbol, date, args.canonical());
        let digest = hex::encode(Sha256::digest(serialized.as_bytes()));

        CacheKey(format!("{}_{}_{}", slug(symbol), date, digest))
    }
}

/// 파일 이름에 안전한 표현. `[A-Za-z0-9-]` 외 문자는 `-` 로 바뀝니다.
pub(crate) fn slug(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .collect()
}
