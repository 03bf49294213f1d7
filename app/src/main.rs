use clap::Parser;
use tracing_subscriber::EnvFilter;

use cropgrid_lib::config::{self, Cli, Config};

fn main() -> anyhow::Result<()> {
    // .env must be loaded before parsing so CROPGRID_* variables apply.
    let dotenv = config::load_dotenv();
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match dotenv {
        Some(path) => tracing::info!("Loaded .env from: {path}"),
        None => tracing::debug!("No .env file found, using system environment variables"),
    }

    let config = Config::from(cli);
    let summary = cropgrid_lib::run(&config)?;

    tracing::info!(
        images = summary.images,
        columns = summary.columns,
        width = summary.canvas_width,
        height = summary.canvas_height,
        "Done: {}",
        summary.output.display()
    );
    Ok(())
}
