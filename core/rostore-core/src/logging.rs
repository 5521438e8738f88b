//! tracing 구독자 설정
//!
//! Store는 `tracing` 이벤트만 내보내고 구독자는 설치하지 않습니다.
//! 바이너리나 테스트가 이 헬퍼로 직접 설치합니다. `logging` feature가
//! 꺼져 있으면 모든 함수가 아무 일도 하지 않습니다.

#[cfg(feature = "logging")]
use tracing_subscriber::{EnvFilter, fmt};

/// `RUST_LOG`가 없으면 `info` 레벨로 구독자 설치
///
/// ```rust
/// rostore_core::logging::init();
/// ```
#[cfg(feature = "logging")]
pub fn init() {
    init_with_level("info")
}

/// `RUST_LOG`가 없을 때 `level`을 필터로 사용
///
/// 이미 구독자가 설치되어 있으면 조용히 무시됩니다.
#[cfg(feature = "logging")]
pub fn init_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .try_init();
}

/// 테스트용: `rostore_core` target의 debug 이상만, 테스트 출력 캡처로
///
/// compile 단계의 `trace!` 명령 로그는 걸러집니다.
#[cfg(feature = "logging")]
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("rostore_core=debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(not(feature = "logging"))]
pub fn init() {}

#[cfg(not(feature = "logging"))]
pub fn init_with_level(_level: &str) {}

#[cfg(not(feature = "logging"))]
pub fn init_test() {}
