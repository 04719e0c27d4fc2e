use clap::Parser;
use color_eyre::Result;

use trendboard::cli::CliArgs;
use trendboard::config::init_app_config;
use trendboard::logging::{self, LogTarget};
use trendboard::{event, terminal, App};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = init_app_config()?;
    let headless = args.headless || args.json || !is_terminal();

    // The dashboard owns the terminal, so it logs to a file
    let log_target = if headless || args.export_html.is_some() {
        LogTarget::Stderr
    } else {
        LogTarget::File(config.log_file.clone())
    };
    logging::init(&log_target, config.debug)?;
    tracing::debug!(data = %config.data_path.display(), "configuration loaded");

    let mut app = App::new(config);

    if let Some(output) = &args.export_html {
        return event::export_html(&app, output).await;
    }

    if headless {
        return event::run_headless(&app, args.json).await;
    }

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app).await;
    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
