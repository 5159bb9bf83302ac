//! Tracing setup for the binaries.
//!
//! [`LogProfile::Production`] writes JSON to a daily rolling file and a
//! compact copy to stdout. [`LogProfile::Development`] prints pretty output
//! with span open/close events.

use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable selecting the log level when `RUST_LOG` is unset.
pub const LOG_LEVEL_ENV: &str = "ROUTEDOC_LOG_LEVEL";

/// Environment variable naming the deployment environment.
pub const ENVIRONMENT_ENV: &str = "ROUTEDOC_ENV";

const DEFAULT_LEVEL: &str = "info";
const LOG_FILE_PREFIX: &str = "routedoc";

// Dropping a guard stops its writer thread.
static GUARDS: OnceLock<Vec<WorkerGuard>> = OnceLock::new();

/// Which subscriber stack to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogProfile {
    /// Rolling JSON file plus compact stdout.
    Production,
    /// Pretty stdout only.
    Development,
}

impl LogProfile {
    /// `Production` when `ROUTEDOC_ENV` is `production` (any case).
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_environment_name(std::env::var(ENVIRONMENT_ENV).ok().as_deref())
    }

    fn from_environment_name(name: Option<&str>) -> Self {
        match name {
            Some(env) if env.eq_ignore_ascii_case("production") => Self::Production,
            _ => Self::Development,
        }
    }
}

/// Install the global subscriber for `profile`.
///
/// The filter comes from `RUST_LOG`, then `ROUTEDOC_LOG_LEVEL`, then `info`.
///
/// # Errors
///
/// Fails on an unparsable filter or, for production, when the log directory
/// cannot be created.
pub fn init(profile: LogProfile) -> anyhow::Result<()> {
    let filter = env_filter()?;
    match profile {
        LogProfile::Production => init_production(filter)?,
        LogProfile::Development => init_development(filter),
    }
    tracing::debug!(?profile, "logging initialized");
    Ok(())
}

fn env_filter() -> anyhow::Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| DEFAULT_LEVEL.to_string());
    Ok(EnvFilter::try_new(level)?)
}

fn init_production(filter: EnvFilter) -> anyhow::Result<()> {
    let dir = log_directory();
    std::fs::create_dir_all(&dir)?;

    let appender = RollingFileAppender::new(Rotation::DAILY, &dir, LOG_FILE_PREFIX);
    let (file_writer, file_guard) = tracing_appender::non_blocking(appender);
    let (stdout_writer, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(file_writer)
                .with_file(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(stdout_writer)
                .with_ansi(false),
        )
        .init();

    let _ = GUARDS.set(vec![file_guard, stdout_guard]);
    Ok(())
}

fn init_development(filter: EnvFilter) {
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE),
        )
        .init();
}

fn log_directory() -> PathBuf {
    if cfg!(target_os = "linux") {
        return PathBuf::from("/var/log").join(LOG_FILE_PREFIX);
    }
    directories::ProjectDirs::from("", "", LOG_FILE_PREFIX)
        .map_or_else(|| PathBuf::from("logs"), |dirs| dirs.data_dir().join("logs"))
}
