use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer, Registry};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Bunyan JSON lines
    Json,
    #[default]
    Pretty,
}

/// Installs the global subscriber. Logs go to stderr so stdout only carries
/// the final report.
pub fn init_tracing_subscriber(format: LogFormat) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let output = match format {
        LogFormat::Json => JsonStorageLayer
            .and_then(BunyanFormattingLayer::new(
                env!("CARGO_PKG_NAME").into(),
                std::io::stderr,
            ))
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    let subscriber = Registry::default()
        .with(env_filter)
        .with(output)
        .with(sentry_tracing::layer());

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
