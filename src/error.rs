//! Error taxonomy and process exit statuses.

use thiserror::Error;

/// Errors raised while establishing and exercising the peer connection.
///
/// Every variant is fatal; the binary maps each one to its own exit status
/// through [`exit_code`].
#[derive(Debug, Error)]
pub enum IceError {
    #[error("failed to create ICE agent: {0}")]
    EngineInit(#[source] webrtc_ice::Error),

    #[error("local ICE credentials unavailable")]
    CredentialUnavailable,

    #[error("candidate gathering failed: {0}")]
    GatherFailed(#[source] webrtc_ice::Error),

    #[error("failed to parse candidate '{candidate}': {source}")]
    CandidateParse {
        candidate: String,
        #[source]
        source: webrtc_ice::Error,
    },

    #[error("ICE agent rejected candidate '{candidate}': {reason}")]
    CandidateRejected { candidate: String, reason: String },

    #[error("malformed session descriptor: {0}")]
    MalformedDescriptor(#[source] serde_json::Error),

    #[error("failed to encode session descriptor: {0}")]
    DescriptorEncode(#[source] serde_json::Error),

    #[error("ICE negotiation failed: {0}")]
    NegotiationFailed(String),

    #[error("transport read failed: {0}")]
    TransportRead(#[source] webrtc_util::Error),

    #[error("transport write failed: {0}")]
    TransportWrite(#[source] webrtc_util::Error),

    #[error("rendezvous I/O on {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("peer descriptor {path} did not appear before the deadline")]
    RendezvousTimedOut { path: String },

    #[error("{stage} timed out after {after:?}")]
    TimedOut {
        stage: &'static str,
        after: std::time::Duration,
    },
}

impl IceError {
    pub(crate) fn file_io(path: &std::path::Path, source: std::io::Error) -> Self {
        IceError::FileIo {
            path: path.display().to_string(),
            source,
        }
    }

    /// Exit status reported by the binary for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            IceError::EngineInit(_) => 10,
            IceError::CredentialUnavailable => 11,
            IceError::GatherFailed(_) => 12,
            IceError::CandidateParse { .. } => 13,
            IceError::CandidateRejected { .. } => 14,
            IceError::MalformedDescriptor(_) => 15,
            IceError::NegotiationFailed(_) => 16,
            IceError::TransportRead(_) => 17,
            IceError::TransportWrite(_) => 18,
            IceError::FileIo { .. } => 19,
            IceError::RendezvousTimedOut { .. } => 20,
            IceError::TimedOut { .. } => 21,
            IceError::DescriptorEncode(_) => 22,
        }
    }
}

/// Map an error chain to the process exit status.
///
/// Errors that did not originate as an [`IceError`] exit with 1.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<IceError>()
        .map(IceError::exit_code)
        .unwrap_or(1)
}
