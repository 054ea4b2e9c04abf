use clap::Parser;

use social_downloader_lib::cli::Cli;
use social_downloader_lib::logging::{init_logging, DEFAULT_DIRECTIVE};

#[tokio::main]
async fn main() {
    init_logging(DEFAULT_DIRECTIVE);

    let cli = Cli::parse();

    if let Err(error) = social_downloader_lib::run(&cli.url, cli.target(), &cli.settings()).await {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
}
