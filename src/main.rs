use clap::Parser;
use meteo::core::config;
use meteo::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::io;

#[derive(Parser)]
#[command(
    name = "meteo",
    version,
    about = "Type a location, press Enter, see what the weather service says"
)]
struct Args {}

#[tokio::main]
async fn main() -> io::Result<()> {
    let _args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = config::load_config().map_err(io::Error::other)?;
    let resolved = config::resolve(&file_config);

    // Initialize file logger - writes to meteo.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("meteo.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "meteo starting up, probing {} (timeout {:?})",
        resolved.geocoding_url,
        resolved.probe_timeout
    );

    tui::run(resolved)
}
