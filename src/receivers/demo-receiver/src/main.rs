use anyhow::Result;
use avremote_core::{init_logging, AppDirs, Config};
use avremote_plugin::{LogRelay, ReceiverService};
use clap::Parser;
use demo_receiver::{DemoReceiver, Preferences};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "demo-receiver",
    version,
    about = "Sample audio/video receiver plugin served over stdio"
)]
struct Cli {
    /// Preferences file override (defaults to the data directory)
    #[arg(long)]
    preferences: Option<PathBuf>,
    /// Drop host-bound log records instead of mirroring them to stderr
    #[arg(long)]
    quiet_relay: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let dirs = AppDirs::discover()?;
    let config = Config::load_or_default(&dirs)?;
    let _guard = init_logging(&config.logging, &dirs)?;

    let preferences_path = cli
        .preferences
        .unwrap_or_else(|| dirs.data_dir().join("demo-receiver.json"));
    let preferences = Preferences::load(preferences_path)?;

    // No host log endpoint exists in the demo; stderr stands in for it.
    let relay = if cli.quiet_relay {
        LogRelay::disconnected()
    } else {
        LogRelay::new(Box::new(std::io::stderr()))
    };

    let plugin = DemoReceiver::new(preferences, relay);
    let mut service = ReceiverService::new(plugin);

    tracing::info!("serving receiver plugin over stdio");
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    service.serve(stdin.lock(), &mut stdout)?;
    Ok(())
}
