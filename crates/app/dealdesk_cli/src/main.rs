// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use clap::Parser;
use cli::Cli;

mod cli;
mod commands;
mod logging;
mod paths;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(e) = run().await {
        if e.is_unauthorized() {
            eprintln!("session expired, run `dealdesk login`");
        } else {
            log::error!("{}", e);
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    logging::init()?;

    let args = Cli::parse();

    commands::dispatch(args).await
}
