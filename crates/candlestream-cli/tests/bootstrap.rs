//! 부트스트랩 실패/성공 경로 테스트.

use candlestream_cli::bootstrap::{connect, load_config, load_env_file};
use std::io::Write;
use tempfile::TempDir;

#[test]
fn test_missing_env_file_fails_fast() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("broker.env");

    let err = load_env_file(Some(&missing)).unwrap_err();
    assert!(err.to_string().contains("broker.env"));
}

#[test]
fn test_missing_config_file_fails_fast() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("candlestream.toml");

    assert!(load_config(Some(&missing), None).is_err());
}

// 환경 변수를 건드리므로 한 테스트 안에서 순서대로 확인
#[test]
fn test_env_file_supplies_credentials() {
    std::env::remove_var("CANDLESTREAM__PROVIDER__API_KEY");
    std::env::remove_var("CANDLESTREAM__PROVIDER__CLIENT_CODE");
    std::env::remove_var("CANDLESTREAM__PROVIDER__ACCESS_TOKEN");

    let err = load_config(None, None).unwrap_err();
    assert!(format!("{:#}", err).contains("provider.api_key"));

    let dir = TempDir::new().unwrap();
    let env_path = dir.path().join("broker.env");
    let mut file = std::fs::File::create(&env_path).unwrap();
    writeln!(file, "CANDLESTREAM__PROVIDER__API_KEY=test-key").unwrap();
    writeln!(file, "CANDLESTREAM__PROVIDER__CLIENT_CODE=C123").unwrap();
    writeln!(file, "CANDLESTREAM__PROVIDER__ACCESS_TOKEN=s3cr3t-token").unwrap();
    drop(file);

    let loaded = load_env_file(Some(&env_path)).unwrap();
    assert_eq!(loaded.as_deref(), Some(env_path.as_path()));

    let config = load_config(None, Some("debug")).unwrap();
    assert_eq!(config.provider.api_key, "test-key");
    assert_eq!(config.provider.client_code, "C123");
    assert_eq!(config.logging.level, "debug");
    assert!(!format!("{:?}", config.provider).contains("s3cr3t-token"));
}

#[tokio::test]
async fn test_connect_fails_when_provider_unreachable() {
    let mut config = candlestream_core::AppConfig::default();
    config.provider.base_url = "http://127.0.0.1:1".to_string();
    config.provider.api_key = "key".to_string();
    config.provider.client_code = "C123".to_string();
    config.provider.access_token = "token".to_string();
    config.provider.timeout_secs = 2;

    let err = connect(&config).await.unwrap_err();
    assert!(err.to_string().contains("127.0.0.1:1"));
}
