//! Play command implementation.

use std::net::SocketAddr;

use castlink_core::device::{play_on_device, play_with, CastController, LoadRequest};
use tracing::info;

use crate::cli::{Cli, PlayArgs};
use crate::device::discovery::{find_device, DiscoveryOptions};
use crate::error::CliError;
use crate::output::get_formatter;

/// Run the play command
pub async fn run_play(args: PlayArgs, cli: &Cli) -> Result<(), CliError> {
    let formatter = get_formatter(cli.json);

    let request = LoadRequest::new(args.media.clone())
        .with_content_type(args.content_type.clone())
        .detached(args.detach);

    // Reject bad media before spending the discovery timeout
    request.resolve_content_type()?;

    let target = match args.addr {
        Some(ip) => {
            let addr = SocketAddr::new(ip, args.port);
            play_with(CastController::new(), addr, request).await?;
            addr.to_string()
        }
        None => {
            let selector = args.selector();
            let options = DiscoveryOptions::from_cli(cli);
            let device = find_device(&options, &selector).await?;

            info!("Selected {} for {}", device.display_name(), selector.describe());

            let name = device.display_name().to_string();
            play_on_device(CastController::new(), &device, request).await?;
            name
        }
    };

    println!("{}", formatter.format_play_result(&target, &args.media));
    Ok(())
}
