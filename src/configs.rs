use std::env;
use std::fmt;
use std::fmt::Formatter;
use tracing_appender::non_blocking::WorkerGuard;

mod logging;

/// 로깅 설정 중 발생한 에러
#[derive(Debug)]
pub enum Error {
    InvalidLevel(String),
    InvalidRotation(String),
    InvalidKeep(String),

    /// 로그 파일 생성 실패
    AppenderFailed(String),

    /// 전역 subscriber가 이미 설정 되어 있음
    InitFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidLevel(s) => write!(
                f,
                "LOGGER_LEVEL must be one of \"TRACE\", \"DEBUG\", \"INFO\", \"WARN\", \"ERROR\": {}",
                s
            ),
            Error::InvalidRotation(s) => write!(
                f,
                "LOGGER_ROTATION must be one of \"DAILY\", \"HOURLY\", \"MINUTELY\", \"NEVER\": {}",
                s
            ),
            Error::InvalidKeep(s) => write!(f, "LOGGER_KEEP must be a positive number: {}", s),
            Error::AppenderFailed(s) => write!(f, "Cannot create log file: {}", s),
            Error::InitFailed(s) => write!(f, "Cannot initialize logger: {}", s),
        }
    }
}

impl std::error::Error for Error {}

/// 환경 변수로 로깅 옵션을 읽어 전역 로거를 설정한다.
///
/// # Description
/// `LOGGER_DIR`과 `LOGGER_FILE_NAME`이 모두 설정된 경우에만 파일 로그를 남기며,
/// 반환된 [`WorkerGuard`]는 프로그램 종료 시까지 유지 되어야 남은 로그가 파일에 기록 된다.
pub fn set_global_logging_config() -> Result<Option<WorkerGuard>, Error> {
    let keep = match env::var("LOGGER_KEEP") {
        Ok(v) => Some(v.parse::<usize>().map_err(|_| Error::InvalidKeep(v.clone()))?),
        Err(_) => None,
    };

    let options = logging::Config {
        dir: env::var("LOGGER_DIR").ok(),
        name: env::var("LOGGER_FILE_NAME").ok(),
        keep,
        level: env::var("LOGGER_LEVEL").ok(),
        rotation: env::var("LOGGER_ROTATION").ok(),
    };

    logging::set_global_logging_config(&options)
}
