use clap::Parser;
use seek::headless::{self, HeadlessQuery, OutputFormat};
use seek_core::config::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "seek", about = "Fuzzy search across an orchestration workspace")]
struct Cli {
    /// Write debug logs to /tmp/seek-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Workspace snapshot (JSON). Defaults to `[workspace] path`, then the
    /// built-in demo workspace.
    #[arg(long, value_name = "PATH")]
    workspace: Option<PathBuf>,

    /// Do not reload the snapshot when it changes on disk.
    #[arg(long)]
    no_watch: bool,

    /// Print results for this query and exit instead of starting the TUI.
    #[arg(long, value_name = "TEXT")]
    query: Option<String>,

    /// Output format for `--query`.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, requires = "query")]
    format: OutputFormat,

    /// Maximum number of results for `--query` (0 = unlimited). Defaults to
    /// `[search] max_results`.
    #[arg(long, value_name = "N", requires = "query")]
    limit: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/seek-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("seek debug log started — tail -f /tmp/seek-debug.log");
    }

    let Some(text) = cli.query else {
        return seek_tui::run(seek_tui::RunOptions {
            workspace: cli.workspace,
            no_watch: cli.no_watch,
        });
    };

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config unreadable, using defaults");
        Config::defaults()
    });
    let workspace = cli.workspace.or_else(|| config.workspace.snapshot_path());
    let index = seek_tui::load_index(workspace.as_deref())?;

    let query = HeadlessQuery {
        query: text,
        format: cli.format,
        case: config.search.case,
        limit: cli.limit.unwrap_or(config.search.max_results),
    };
    headless::run(&query, &index, &mut std::io::stdout().lock())?;
    Ok(())
}
