use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use corpguide::core::config::{self, CliOverrides};
use corpguide::transport::HttpBackend;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "corpguide", about = "Chat client for the CorpGuide AI policy assistant")]
struct Args {
    /// Backend base URL (e.g. http://localhost:8000)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Request timeout in seconds (0 = wait indefinitely)
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Write the conversation as HTML to this file on exit
    #[arg(long)]
    transcript: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The TUI owns the terminal, so logs go to corpguide.log in the current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("corpguide.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Ignoring config file: {}", e);
            eprintln!("Warning: {e}; using defaults");
            config::CorpGuideConfig::default()
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url,
            timeout_secs: args.timeout,
        },
    );

    log::info!(
        "CorpGuide client starting: backend={}, timeout={:?}",
        resolved.base_url,
        resolved.timeout
    );

    let backend = Arc::new(HttpBackend::from_config(&resolved));
    corpguide::tui::run(resolved, backend, args.transcript)
}
