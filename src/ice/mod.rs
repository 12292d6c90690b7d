//! ICE transport module.
//!
//! Uses webrtc-ice for NAT traversal with UDP/IPv4 candidates, exchanges
//! session descriptors through a shared directory, then runs a fixed
//! three-message exchange on top.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │              IceTransport (agent.rs)                     │
//! │  - Owns the webrtc-ice Agent (UDP4 only)                │
//! │  - Candidate callback feeds CandidateSink               │
//! └─────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │      CandidateCollector (collector.rs)                   │
//! │  - Settles, seals, becomes SessionDescriptor            │
//! └─────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │           FileRendezvous (rendezvous.rs)                 │
//! │  - Writes <role>.json, polls for the peer's file        │
//! └─────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │  IceTransport::connect → IceConn (conn.rs)               │
//! │  - Initiator dials, Responder accepts                   │
//! └─────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │           run_exchange (exchange.rs)                     │
//! │  - Three messages each way, writer joined               │
//! └─────────────────────────────────────────────────────────┘
//! ```

mod agent;
mod collector;
mod conn;
mod descriptor;
mod exchange;
mod rendezvous;
mod role;

pub use agent::IceTransport;
pub use collector::{CandidateCollector, CandidateSink};
pub use conn::{IceConn, RECV_BUFFER_SIZE};
pub use descriptor::{IceCredentials, SessionDescriptor};
pub use exchange::{run_exchange, ExchangeReport};
pub use rendezvous::{FileRendezvous, DEFAULT_POLL_INTERVAL};
pub use role::{Role, MESSAGE_COUNT};
