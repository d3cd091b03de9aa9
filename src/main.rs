use std::io;

mod cli;
use cli::{USAGE, parse_cli_mode, run};

#[tokio::main]
async fn main() -> Result<(), io::Error> {
    setup_logging();

    let options = match parse_cli_mode() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{USAGE}");
            return Ok(());
        }
    };

    run(options).await
}

fn setup_logging() {
    let log_dir = dirs::config_dir()
        .map(|d| d.join("teamcal"))
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "teamcal.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("teamcal started");
}
