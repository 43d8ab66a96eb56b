use clap::Parser;

mod cli;
mod config;
mod editor;
mod error;
mod filename;
mod playlist;
mod reconcile;
mod runtime;
mod splice;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    runtime::run(cli)
}
