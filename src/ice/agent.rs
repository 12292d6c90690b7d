//! ICE Agent wrapper for UDP/IPv4 connectivity.
//!
//! Wraps the webrtc-ice Agent, feeding discovered candidates into a
//! [`CandidateSink`] and exposing a single role-driven `connect`.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use webrtc_ice::agent::agent_config::AgentConfig;
use webrtc_ice::agent::Agent;
use webrtc_ice::candidate::candidate_base::unmarshal_candidate;
use webrtc_ice::candidate::Candidate;
use webrtc_ice::mdns::MulticastDnsMode;
use webrtc_ice::network_type::NetworkType;
use webrtc_ice::state::ConnectionState;
use webrtc_ice::url::Url;
use webrtc_util::Conn;

use super::collector::CandidateSink;
use super::descriptor::IceCredentials;
use super::role::Role;
use super::IceConn;
use crate::error::IceError;

/// Only network type the agent gathers or accepts.
const NETWORK_TYPE: NetworkType = NetworkType::Udp4;

/// ICE agent wrapper restricted to UDP over IPv4.
pub struct IceTransport {
    agent: Agent,
}

impl IceTransport {
    /// Create a transport, gathering server-reflexive candidates from the
    /// given STUN servers in addition to host candidates.
    ///
    /// Unparseable STUN URLs are skipped with a warning.
    pub async fn with_stun_servers(
        stun_urls: &[String],
        sink: CandidateSink,
    ) -> Result<Self, IceError> {
        let urls: Vec<Url> = stun_urls
            .iter()
            .filter_map(|s| match Url::parse_url(s) {
                Ok(url) => Some(url),
                Err(e) => {
                    log::warn!("Ignoring invalid STUN URL '{}': {}", s, e);
                    None
                }
            })
            .collect();

        let config = AgentConfig {
            urls,
            network_types: vec![NETWORK_TYPE],
            multicast_dns_mode: MulticastDnsMode::Disabled,
            ..Default::default()
        };

        let agent = Agent::new(config).await.map_err(IceError::EngineInit)?;

        agent.on_candidate(Box::new(move |c| {
            let sink = sink.clone();
            Box::pin(async move {
                match c {
                    Some(candidate) => {
                        let line = candidate.marshal();
                        println!("candidate: ({})", line);
                        sink.add(line).await;
                    }
                    // Gathering complete
                    None => sink.mark_complete(),
                }
            })
        }));

        agent.on_connection_state_change(Box::new(|state: ConnectionState| {
            println!("ICE Connection State has changed: {}", state);
            if state == ConnectionState::Failed {
                log::error!("ICE connection failed");
            }
            Box::pin(async {})
        }));

        Ok(Self { agent })
    }

    /// Local credentials generated by the agent.
    pub async fn local_credentials(&self) -> Result<IceCredentials, IceError> {
        let (ufrag, pwd) = self.agent.get_local_user_credentials().await;
        if ufrag.is_empty() || pwd.is_empty() {
            return Err(IceError::CredentialUnavailable);
        }
        Ok(IceCredentials { ufrag, pwd })
    }

    /// Start gathering candidates.
    ///
    /// Returns immediately; candidates are delivered to the sink.
    pub fn gather_candidates(&self) -> Result<(), IceError> {
        self.agent
            .gather_candidates()
            .map_err(IceError::GatherFailed)
    }

    /// Register one serialized remote candidate with the agent.
    ///
    /// Candidates outside UDP/IPv4 are rejected, since no local candidate
    /// could ever pair with them.
    pub fn add_remote_candidate(&self, serialized: &str) -> Result<(), IceError> {
        let candidate =
            unmarshal_candidate(serialized).map_err(|source| IceError::CandidateParse {
                candidate: serialized.to_string(),
                source,
            })?;

        let network_type = candidate.network_type();
        if network_type != NETWORK_TYPE {
            return Err(IceError::CandidateRejected {
                candidate: serialized.to_string(),
                reason: format!("unsupported network type {}", network_type),
            });
        }

        let candidate: Arc<dyn Candidate + Send + Sync> = Arc::new(candidate);
        self.agent
            .add_remote_candidate(&candidate)
            .map_err(|e| IceError::CandidateRejected {
                candidate: serialized.to_string(),
                reason: e.to_string(),
            })
    }

    /// Run the role's half of the handshake against the remote credentials.
    ///
    /// The initiator dials as the controlling agent, the responder accepts
    /// as the controlled agent. Fails with `TimedOut` if no pair succeeds
    /// within `timeout`.
    pub async fn connect(
        &self,
        role: Role,
        remote: &IceCredentials,
        timeout: Duration,
    ) -> Result<IceConn, IceError> {
        // Dropping cancel_tx cancels the handshake, so it lives until we return
        let (_cancel_tx, cancel_rx) = mpsc::channel(1);
        let ufrag = remote.ufrag.clone();
        let pwd = remote.pwd.clone();

        // dial and accept return distinct opaque conn types
        let handshake = async {
            if role.is_controlling() {
                self.agent
                    .dial(cancel_rx, ufrag, pwd)
                    .await
                    .map(|c| c as Arc<dyn Conn + Send + Sync>)
            } else {
                self.agent
                    .accept(cancel_rx, ufrag, pwd)
                    .await
                    .map(|c| c as Arc<dyn Conn + Send + Sync>)
            }
        };

        let conn = tokio::time::timeout(timeout, handshake)
            .await
            .map_err(|_| IceError::TimedOut {
                stage: "ICE negotiation",
                after: timeout,
            })?
            .map_err(|e| IceError::NegotiationFailed(e.to_string()))?;

        Ok(IceConn::new(conn))
    }

    /// Shut down the agent and its sockets.
    pub async fn close(&self) {
        if let Err(e) = self.agent.close().await {
            log::debug!("ICE agent close error: {}", e);
        }
    }
}
