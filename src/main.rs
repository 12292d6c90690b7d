//! ice-rendezvous: connect two peers with ICE and exchange greetings
//!
//! Run one side with `send` and the other with `receive` in the same
//! directory:
//!
//! ```text
//! ice-rendezvous receive &
//! ice-rendezvous send
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use ice_rendezvous::{exit_code, session, Role, SessionConfig};

#[derive(Parser)]
#[command(name = "ice-rendezvous")]
#[command(about = "Establish a direct peer-to-peer connection using ICE")]
#[command(version)]
struct Cli {
    /// `send` to dial as initiator; any other value accepts as responder
    role: String,

    /// Directory shared with the peer for descriptor exchange
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// STUN server URL (can be specified multiple times)
    #[arg(long, value_name = "URL")]
    stun: Vec<String>,

    /// Maximum time to let candidate gathering settle, in milliseconds
    #[arg(long, default_value_t = 100)]
    settle_ms: u64,

    /// Interval between checks for the peer's descriptor, in milliseconds
    #[arg(long, default_value_t = 100)]
    poll_ms: u64,

    /// Give up if the peer's descriptor has not appeared after this many seconds
    #[arg(long, default_value_t = 300)]
    wait_secs: u64,

    /// Deadline for ICE negotiation, in seconds
    #[arg(long, default_value_t = 30)]
    connect_secs: u64,

    /// Deadline for each inbound message, in seconds
    #[arg(long, default_value_t = 30)]
    read_secs: u64,

    /// Use verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> SessionConfig {
        SessionConfig {
            role: Role::from_arg(&self.role),
            rendezvous_dir: self.dir,
            stun_urls: self.stun,
            settle: Duration::from_millis(self.settle_ms),
            poll_interval: Duration::from_millis(self.poll_ms),
            rendezvous_timeout: Duration::from_secs(self.wait_secs),
            connect_timeout: Duration::from_secs(self.connect_secs),
            read_timeout: Duration::from_secs(self.read_secs),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging with filters for noisy internal modules
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = format!("{},webrtc_ice=error", log_level);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&filter)).init();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create Tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(async_main(cli)) {
        eprintln!("Error: {:?}", e);
        std::process::exit(exit_code(&e));
    }
}

async fn async_main(cli: Cli) -> Result<()> {
    let report = session::run(cli.into_config()).await?;
    log::info!(
        "Exchange complete: sent {}, received {}",
        report.sent.len(),
        report.received.len()
    );
    Ok(())
}
