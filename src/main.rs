#![cfg(not(tarpaulin_include))]

use itemsheet::app;
use itemsheet::config::Config;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Positional arguments: data file, bind address, label set
    let config = Config::from_args(env::args());

    app::run(config).await
}
