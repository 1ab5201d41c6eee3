use std::io;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::Parser;
use log::{debug, LevelFilter};

use uaalert::{AlertsClient, HttpTransport};

mod app;
mod cli;

use cli::{Args, CliError};

fn main() {
    match uaalertctl() {
        Ok(()) => {}
        Err(cli_error) => cli_error.exit(),
    }
}

fn uaalertctl() -> Result<(), CliError> {
    // Parse options and start logging
    let args = Args::try_parse()?;
    log_setup(&args);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !args.command.needs_token() {
        app::print_regions(&mut out).context("unable to write output")?;
        return Ok(());
    }

    let token = args.token.clone().ok_or_else(|| {
        anyhow!(
            "an API token is required.

Pass --token or set ALERTS_IN_UA_TOKEN."
        )
    })?;

    let transport = HttpTransport::with_timeout(Duration::from_secs(args.timeout))
        .context("unable to create HTTP client")?;
    let client = AlertsClient::new(token, transport).with_base_url(args.base_url.as_str());
    debug!("polling {}", client.base_url());

    app::run(&args.command, &client, &mut out)?;
    Ok(())
}

fn log_setup(args: &Args) {
    if args.quiet {
        // no logging
        return;
    } else if std::env::var_os("RUST_LOG").is_none() {
        // parameter controls
        let log_filter = match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        pretty_env_logger::formatted_builder()
            .filter_module("uaalert", log_filter)
            .filter_module("uaalertctl", log_filter)
            .init();
    } else {
        // environment controls
        pretty_env_logger::init();
    }
}
