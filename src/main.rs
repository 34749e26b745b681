//! Camera Prototype - Main Entry Point

use camera_proto::app::application::{path_resolver, run_app};
use camera_proto::constants::LOG_FILE_NAME;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let resolver = path_resolver();

    // Rolling log file next to the image slot
    let log_dir = resolver.cache_dir()?.join("logs");
    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    tracing::info!("Starting camera prototype...");

    run_app(resolver.as_ref())
}
