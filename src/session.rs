//! End-to-end session: gather, exchange descriptors, connect, exchange messages.

use anyhow::{Context, Result};
use tokio::time::Instant;

use crate::config::SessionConfig;
use crate::ice::{
    run_exchange, CandidateCollector, ExchangeReport, FileRendezvous, IceTransport,
    SessionDescriptor,
};

/// Run one side of the session to completion.
pub async fn run(config: SessionConfig) -> Result<ExchangeReport> {
    let role = config.role;
    log::info!("Starting ICE session as {}", role);

    let collector = CandidateCollector::new();
    let ice = IceTransport::with_stun_servers(&config.stun_urls, collector.sink())
        .await
        .context("Failed to set up ICE transport")?;

    let result = run_with_transport(&ice, collector, &config).await;
    ice.close().await;
    result
}

async fn run_with_transport(
    ice: &IceTransport,
    mut collector: CandidateCollector,
    config: &SessionConfig,
) -> Result<ExchangeReport> {
    let role = config.role;
    let local_creds = ice
        .local_credentials()
        .await
        .context("Failed to read local ICE credentials")?;

    ice.gather_candidates()
        .context("Failed to start candidate gathering")?;

    if !collector.wait_settled(config.settle).await {
        log::debug!(
            "Gathering not complete after {:?}, publishing what we have",
            config.settle
        );
    }
    let candidates = collector.seal().await;
    if candidates.is_empty() {
        log::warn!("No local ICE candidates gathered");
    }

    let local = SessionDescriptor::new(&local_creds, candidates);
    let rendezvous =
        FileRendezvous::new(&config.rendezvous_dir).with_poll_interval(config.poll_interval);
    let path = rendezvous
        .publish(&local, role)
        .await
        .context("Failed to publish session descriptor")?;
    log::debug!("Published descriptor to {}", path.display());

    let deadline = Instant::now() + config.rendezvous_timeout;
    let remote = rendezvous
        .retrieve(role, deadline)
        .await
        .context("Failed to retrieve peer session descriptor")?;

    for candidate in &remote.candidates {
        println!("Received remote candidate: {}", candidate);
        ice.add_remote_candidate(candidate)
            .context("Failed to add remote candidate")?;
    }

    let conn = ice
        .connect(role, &remote.credentials(), config.connect_timeout)
        .await
        .context("Failed to establish ICE connection")?;

    let report = run_exchange(conn.clone(), role, config.read_timeout)
        .await
        .context("Message exchange failed")?;
    conn.close().await;

    Ok(report)
}
