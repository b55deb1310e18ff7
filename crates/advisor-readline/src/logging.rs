//! Tracing subscriber setup.
//!
//! Logs go to a daily rolling file so they never interleave with the REPL.
//! When the log directory is unavailable, warnings and errors go to stderr.

use std::fs;
use std::path::PathBuf;

use advisor_infrastructure::{AdvisorPaths, load_dotenv};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive (e.g. `debug`).
pub const LOG_ENV: &str = "ADVISOR_LOG";

const LOG_FILE_PREFIX: &str = "advisor.log";

/// Seeds the environment from `.env`, then installs the subscriber.
///
/// `.env` is read first so an `ADVISOR_LOG` set there takes effect.
pub fn init_with_dotenv() -> Option<WorkerGuard> {
    let dotenv = load_dotenv();
    let guard = init_logging();
    dotenv.log();
    guard
}

/// Installs the global subscriber.
///
/// The returned guard must be held until exit so buffered lines are flushed.
fn init_logging() -> Option<WorkerGuard> {
    match prepare_logs_dir() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter_or("info"))
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter_or("warn"))
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

fn prepare_logs_dir() -> Option<PathBuf> {
    let dir = AdvisorPaths::logs_dir().ok()?;
    fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_infrastructure::{DotenvOutcome, load_dotenv_from};
    use tempfile::TempDir;

    #[test]
    fn test_log_filter_from_dotenv() {
        // A filter already exported by the caller wins over .env
        if std::env::var_os(LOG_ENV).is_some() {
            return;
        }
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        fs::write(&path, format!("{LOG_ENV}=debug\n")).unwrap();

        assert!(matches!(load_dotenv_from(&path), DotenvOutcome::Loaded(_)));
        assert_eq!(
            filter_or("info").max_level_hint(),
            Some(tracing::level_filters::LevelFilter::DEBUG)
        );
    }
}
