use anyhow::Result;
use clap::Parser;
use skillpack::cli::{self, Cli};
use skillpack::config::Config;
use skillpack::logging;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    let config = Config::load()?;
    let output = cli::execute(&cli, &config)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
