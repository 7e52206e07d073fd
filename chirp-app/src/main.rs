use anyhow::{Context, Result};
use chirp_common::observability::{LogConfig, init_logging};
use chirp_config::{ChirpConfig, ChirpConfigLoader, LoggingSettings};
use chirp_social::twitter::types::posts_from_json;
use clap::Parser;
use cli::Cli;
mod cli;
mod report;

fn log_config(settings: &LoggingSettings) -> LogConfig {
    LogConfig {
        log_dir: settings.dir.clone(),
        emit_file: settings.file,
        emit_stderr: settings.stderr,
        format: settings.format,
        default_filter: settings.level.clone(),
        ..LogConfig::default()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Config: user file, then --config, then CHIRP__ env
    let mut loader = ChirpConfigLoader::new().with_user_config();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    let cfg: ChirpConfig = loader.load().context("failed to load configuration")?;

    init_logging(log_config(&cfg.logging))?;

    let raw = std::fs::read_to_string(&cli.posts)
        .with_context(|| format!("failed to read {}", cli.posts.display()))?;
    let posts = posts_from_json(&raw)
        .with_context(|| format!("failed to parse {}", cli.posts.display()))?;
    tracing::info!(path = %cli.posts.display(), count = posts.len(), "loaded posts");

    let report = cli.command.run(&posts, &cfg.graph)?;
    let mut out = std::io::stdout().lock();
    report::write_report(&report, cli.output_format(), &mut out)
}
