//! ice-rendezvous: direct peer-to-peer connectivity over ICE
//!
//! Two processes gather UDP/IPv4 candidates, swap session descriptors
//! through a shared directory, negotiate a connection with webrtc-ice and
//! exchange three messages each way.

pub mod config;
pub mod error;
pub mod ice;
pub mod session;

pub use config::SessionConfig;
pub use error::{exit_code, IceError};
pub use ice::Role;
