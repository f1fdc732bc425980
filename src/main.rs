mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Args, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Play {
            data_dir,
            content,
            fast,
            no_clear,
            seed,
        } => cli::handle_play(data_dir, content, fast, no_clear, seed).await,
        Commands::Validate { path } => cli::handle_validate(&path).await,
        Commands::Content { fallback, data_dir } => cli::handle_content(fallback, data_dir).await,
        Commands::Name { command, data_dir } => cli::handle_name(command, data_dir).await,
    }
}

/// Logs go to stderr so they never interleave with the game on stdout.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("hearts=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hearts=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
