use crate::configs::Error;
use time::macros::format_description;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::fmt::writer::MakeWriterExt;

#[derive(Debug, Default)]
pub struct Config {
    pub dir: Option<String>,
    pub name: Option<String>,

    /// 최대 로그 파일 개수로 로그 파일이 설정한 개수보다 커질 경우 기존의 로그파일들은 삭제 된다.
    /// 설정 되지 않을 시 로그 파일은 삭제 되지 않는다.
    pub keep: Option<usize>,

    /// 출력할 로그의 레벨로 지정된 로그 레벨 이상만 로깅된다.
    /// 설정하지 않을시 기본값은 WARN으로 설정 된다. 검색 결과가 stdout으로 출력 되므로 로그는 stderr로만 출력한다.
    pub level: Option<String>,

    /// 로깅 파일이 분리 되는 기간으로 .log 파일 하나 당 설정된 기간 동안 로그가 기록 된다.
    /// 설정 되지 않을시 기본값은 DAILY로 설정된다.
    pub rotation: Option<String>,
}

pub fn set_global_logging_config(c: &Config) -> Result<Option<WorkerGuard>, Error> {
    let level = match &c.level {
        Some(level) => parse_level(level)?,
        None => tracing::Level::WARN,
    };

    let (dir, name) = match (&c.dir, &c.name) {
        (Some(dir), Some(name)) => (dir, name),
        _ => {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| Error::InitFailed(e.to_string()))?;
            return Ok(None);
        }
    };

    let mut file_appender = rolling::RollingFileAppender::builder()
        .filename_prefix(name.clone())
        .filename_suffix("log");

    if let Some(rotation) = &c.rotation {
        file_appender = file_appender.rotation(parse_rotation(rotation)?);
    } else {
        file_appender = file_appender.rotation(rolling::Rotation::DAILY);
    }

    if let Some(keep) = c.keep {
        file_appender = file_appender.max_log_files(keep);
    }

    let file_appender = file_appender.build(dir)
        .map_err(|e| Error::AppenderFailed(e.to_string()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let writer = std::io::stderr.and(non_blocking);

    tracing_subscriber::fmt()
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_current_span(true)
        .with_span_list(true)
        .with_timer(LocalTime::new(format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]")))
        .with_max_level(level)
        .with_writer(writer)
        .try_init()
        .map_err(|e| Error::InitFailed(e.to_string()))?;

    Ok(Some(guard))
}

fn parse_rotation(s: &str) -> Result<rolling::Rotation, Error> {
    match s {
        "DAILY" => Ok(rolling::Rotation::DAILY),
        "HOURLY" => Ok(rolling::Rotation::HOURLY),
        "MINUTELY" => Ok(rolling::Rotation::MINUTELY),
        "NEVER" => Ok(rolling::Rotation::NEVER),
        _ => Err(Error::InvalidRotation(s.to_owned())),
    }
}

fn parse_level(l: &str) -> Result<tracing::Level, Error> {
    match l {
        "TRACE" => Ok(tracing::Level::TRACE),
        "DEBUG" => Ok(tracing::Level::DEBUG),
        "INFO" => Ok(tracing::Level::INFO),
        "WARN" => Ok(tracing::Level::WARN),
        "ERROR" => Ok(tracing::Level::ERROR),
        _ => Err(Error::InvalidLevel(l.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_levels_are_parsed() {
        assert_eq!(parse_level("TRACE").unwrap(), tracing::Level::TRACE);
        assert_eq!(parse_level("ERROR").unwrap(), tracing::Level::ERROR);
        assert!(matches!(parse_level("verbose"), Err(Error::InvalidLevel(_))));
    }

    #[test]
    fn known_rotations_are_parsed() {
        assert_eq!(parse_rotation("HOURLY").unwrap(), rolling::Rotation::HOURLY);
        assert_eq!(parse_rotation("NEVER").unwrap(), rolling::Rotation::NEVER);
        assert!(matches!(parse_rotation("WEEKLY"), Err(Error::InvalidRotation(_))));
    }

    #[test]
    fn invalid_level_fails_before_installing_subscriber() {
        let config = Config {
            level: Some("LOUD".to_string()),
            ..Config::default()
        };

        assert!(matches!(set_global_logging_config(&config), Err(Error::InvalidLevel(_))));
    }
}
