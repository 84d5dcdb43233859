//! Ls command implementation.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::{Cli, LsArgs};
use crate::device::discovery::{start_session, DiscoveryOptions};
use crate::error::CliError;
use crate::output::{get_formatter, OutputFormatter, NO_DEVICES_MESSAGE};

/// Run the ls command
pub async fn run_ls(args: LsArgs, cli: &Cli) -> Result<(), CliError> {
    let formatter = get_formatter(cli.json);
    let options = DiscoveryOptions::from_cli(cli);

    if args.wait {
        run_wait_mode(options, formatter.as_ref(), cli.json).await
    } else {
        run_stream_mode(options, formatter.as_ref()).await
    }
}

/// Print each device as soon as it is resolved.
async fn run_stream_mode(
    options: DiscoveryOptions,
    formatter: &dyn OutputFormatter,
) -> Result<(), CliError> {
    let mut session = start_session(&options)?;
    let mut count = 0;

    while let Some(device) = session.next_device().await {
        count += 1;
        println!("{}", formatter.format_device_line(count, &device));
    }

    if count == 0 {
        println!("{}", formatter.format_message(NO_DEVICES_MESSAGE));
    }

    session.join().await;
    Ok(())
}

/// Collect the whole session and print one listing.
async fn run_wait_mode(
    options: DiscoveryOptions,
    formatter: &dyn OutputFormatter,
    json: bool,
) -> Result<(), CliError> {
    let session = start_session(&options)?;

    let spinner = if json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!(
        "Discovering cast receivers for {} seconds...",
        options.duration.as_secs()
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let devices = session.collect().await;

    spinner.finish_and_clear();

    println!("{}", formatter.format_devices(&devices));
    Ok(())
}
