//! Entry point: download a CSV object from S3 and print row counts per country.
//!
//! Takes no arguments. See [`s3_country_counts::config`] for the environment
//! variables it reads.

use anyhow::Result;
use s3_country_counts::{config::Config, fetch::S3Store, pipeline};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr, plus a JSON rolling log file when LOG_FILE_PATH is set.
    // Stdout is reserved for the report.
    let (json_layer, _file_guard) = match std::env::var("LOG_FILE_PATH") {
        Ok(log_file_path) if !log_file_path.is_empty() => {
            let log_dir = Path::new(&log_file_path)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("logs"));
            let log_file_name = Path::new(&log_file_path)
                .file_name()
                .unwrap_or(OsStr::new("s3_country_counts.log"));

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let config = Config::from_env();
    info!(
        bucket = %config.bucket,
        key = %config.key,
        static_credentials = config.credentials.is_some(),
        "Configuration resolved"
    );

    let store = S3Store::connect(config.credentials.as_ref()).await;

    let counts = pipeline::run(&store, &config)
        .await
        .inspect_err(|e| error!(error = %format!("{e:#}"), "Run failed"))?;

    println!("{counts}");

    Ok(())
}
