use clap::Parser;
use miette::Result;
use tracing::Level;

use scanboard::{
    cli::{Cli, Commands},
    commands, config,
};

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = config::discover(cli.config.as_deref())?.with_overrides(cli.api_url);

    match cli.command {
        Commands::Scan(args) => commands::scan::run(args, &config).await,
        Commands::Chat(args) => commands::chat::run(args, &config).await,
        Commands::Report(args) => commands::report::run(args, &config).await,
    }
}
