use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use caption_store::FsArtifactStore;
use clap::Parser;
use caption_pulse::{
    config::{ModelConfig, PipelineConfig},
    openai::ChatCompletionsClient,
    prompt::PromptBuilder,
    retry::RetryPolicy,
    stats::ProcessingStats,
    tracing::{init_tracing_subscriber, LogFormat},
    yt::{
        captions::YtDlpCaptions,
        scraper::{DurationFilter, SearchFilters, SearchScraper, SortBy},
    },
    DigestProcessorBuilder,
};

#[derive(Parser)]
#[command(
    name = "caption-pulse",
    about = "Search YouTube and summarize video captions with an LLM"
)]
struct Cli {
    /// Search keywords
    query: String,

    /// Number of videos to summarize successfully
    #[arg(short = 'n', long, default_value = "5", value_parser = clap::value_parser!(u64).range(1..))]
    count: u64,

    /// Result ordering
    #[arg(long, value_enum, default_value_t = SortBy::Views)]
    sort: SortBy,

    /// Restrict results by video length
    #[arg(long, value_enum)]
    duration: Option<DurationFilter>,

    /// Chat completion API key; without it only transcripts are stored
    #[arg(long, env = "SILICONFLOW_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, env = "CHAT_API_URL", default_value = ModelConfig::DEFAULT_API_URL)]
    api_url: String,

    #[arg(long, env = "CHAT_MODEL", default_value = ModelConfig::DEFAULT_MODEL)]
    model: String,

    /// Directory for raw caption tracks
    #[arg(long, default_value = "./captions")]
    captions_dir: PathBuf,

    /// Directory for markdown summaries
    #[arg(long, default_value = "./summaries")]
    summaries_dir: PathBuf,

    /// Minimum cleaned caption length in characters
    #[arg(long, default_value = "100")]
    min_caption_length: usize,

    /// Attempts per video
    #[arg(long, default_value = "2")]
    item_attempts: u32,

    /// Attempts per summarization request
    #[arg(long, default_value = "3")]
    summary_attempts: u32,

    #[arg(long, default_value = "2")]
    retry_delay_secs: u64,

    /// Timeout for response headers and for each streamed chunk
    #[arg(long, default_value = "60")]
    request_timeout_secs: u64,

    /// Path to the yt-dlp executable
    #[arg(long = "yt-dlp", env = "YT_DLP_PATH", default_value = YtDlpCaptions::DEFAULT_BINARY)]
    yt_dlp: PathBuf,

    /// Caption track language code
    #[arg(long, default_value = YtDlpCaptions::DEFAULT_LANGUAGE)]
    caption_lang: String,

    /// Scratch directory for downloaded caption tracks
    #[arg(long, default_value = "/var/tmp/caption-pulse")]
    workdir: PathBuf,

    /// Language the summary is written in
    #[arg(long, default_value = PromptBuilder::DEFAULT_LANGUAGE)]
    summary_language: String,

    /// Mirror the model output to stderr while it streams
    #[arg(long)]
    echo_stream: bool,

    #[arg(long, value_enum, env = "LOG_FORMAT", default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber(cli.log_format)?;

    let retry_delay = Duration::from_secs(cli.retry_delay_secs);
    let pipeline_config = PipelineConfig {
        min_caption_length: cli.min_caption_length,
        item_retry: RetryPolicy::new(cli.item_attempts, retry_delay),
        summary_retry: RetryPolicy::new(cli.summary_attempts, retry_delay),
        ..Default::default()
    };
    let model_config = ModelConfig {
        api_url: cli.api_url,
        model: cli.model,
        request_timeout: Duration::from_secs(cli.request_timeout_secs),
        ..Default::default()
    };

    let store = FsArtifactStore::init(&cli.captions_dir, &cli.summaries_dir)
        .await
        .context("Failed to prepare output directories")?;

    let chat_client = ChatCompletionsClient::new(model_config, cli.api_key)?
        .with_prompt(PromptBuilder::default().with_language(cli.summary_language))
        .with_echo(cli.echo_stream);
    if !chat_client.has_credentials() {
        tracing::warn!("SILICONFLOW_API_KEY is not set, summaries will be placeholders");
    }

    let captions = YtDlpCaptions::new(&cli.workdir)
        .with_binary(cli.yt_dlp)
        .with_language(cli.caption_lang);

    // the report covers the search too
    let stats = ProcessingStats::new();
    let filters = SearchFilters {
        sort_by: cli.sort,
        duration: cli.duration,
    };
    let videos = SearchScraper::default()
        .search(&cli.query, &filters)
        .await
        .context("Search failed")?;

    let processor = DigestProcessorBuilder::new(pipeline_config)
        .store(store)
        .captions(captions)
        .summarizer(chat_client)
        .build();

    let target = usize::try_from(cli.count).context("--count is too large")?;
    let outcome = processor
        .run_with_stats(futures::stream::iter(videos), target, stats)
        .await;
    tracing::info!(
        successes = outcome.successes,
        attempts = outcome.attempts,
        stop_reason = ?outcome.stop_reason,
        "Batch finished"
    );

    println!("{}", outcome.stats);

    Ok(())
}
