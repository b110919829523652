//! Tracing subscriber setup shared by the binary.
//!
//! Logs go to stdout; setting `LOG_DIR` additionally writes daily-rotated
//! files into that directory.

use std::{env, sync::OnceLock};

use tracing_appender::{
    non_blocking,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter,
    fmt::{fmt, time::ChronoLocal, writer::MakeWriterExt},
};

/// Keeps the non-blocking writer alive so buffered logs flush on shutdown.
static LOG_GUARD: OnceLock<non_blocking::WorkerGuard> = OnceLock::new();

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match env::var("LOG_DIR") {
        Ok(dir) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("riftwatch.log")
                .build(&dir)
                .expect("failed to create log file");
            let (file_writer, guard) = non_blocking(appender);
            LOG_GUARD.set(guard).expect("LOG_GUARD already set");

            let stdout = std::io::stdout.with_max_level(tracing::Level::INFO);
            fmt()
                .with_env_filter(filter)
                .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
                .with_target(false)
                .with_writer(stdout.and(file_writer))
                .init();
        }
        Err(_) => {
            fmt()
                .with_env_filter(filter)
                .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
                .with_target(false)
                .init();
        }
    }

    tracing::info!("logger initialized");
}
