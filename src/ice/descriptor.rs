//! Session descriptor exchanged between peers.
//!
//! Carries the ICE credentials and the serialized local candidates. It is
//! written once, after gathering has settled, and read once by the peer.

use serde::{Deserialize, Serialize};

use crate::error::IceError;

/// ICE credentials used to authenticate connectivity checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IceCredentials {
    /// Username fragment (ufrag)
    pub ufrag: String,
    /// Password
    pub pwd: String,
}

/// Credentials plus candidate list, serialized as one JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescriptor {
    pub username: String,
    pub password: String,
    /// Candidates in the engine's textual format, in discovery order.
    pub candidates: Vec<String>,
}

impl SessionDescriptor {
    pub fn new(creds: &IceCredentials, candidates: Vec<String>) -> Self {
        Self {
            username: creds.ufrag.clone(),
            password: creds.pwd.clone(),
            candidates,
        }
    }

    pub fn credentials(&self) -> IceCredentials {
        IceCredentials {
            ufrag: self.username.clone(),
            pwd: self.password.clone(),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, IceError> {
        serde_json::to_vec(self).map_err(IceError::DescriptorEncode)
    }

    /// Parse a descriptor; never yields a partially populated value.
    pub fn from_json(bytes: &[u8]) -> Result<Self, IceError> {
        serde_json::from_slice(bytes).map_err(IceError::MalformedDescriptor)
    }
}
