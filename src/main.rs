use clap::Parser;
use nh3_drydep::cli::{run, Cli};
use nh3_drydep::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
