//! CandleStream CLI.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 프로세스 부트스트랩 (환경 파일, 설정, 로깅, 제공자 연결 확인)
//! - 구간/일/월 캔들 조회 명령
//! - 캐시 아티팩트 조회 명령

pub mod bootstrap;
pub mod commands;
