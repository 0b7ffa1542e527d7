//! 캐시 시스템 전반에서 사용되는 공통 타입.

mod candle;
mod exchange;
mod interval;

pub use candle::*;
pub use exchange::*;
pub use interval::*;
