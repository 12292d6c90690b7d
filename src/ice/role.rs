//! Local role in the connection handshake.

use std::fmt;

/// Number of messages each side sends and expects during the exchange.
pub const MESSAGE_COUNT: usize = 3;

/// Which half of the ICE handshake this process runs.
///
/// The initiator is the controlling agent and dials; the responder is the
/// controlled agent and accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Initiator,
    Responder,
}

impl Role {
    /// Parse the command-line role argument.
    ///
    /// `send` selects the initiator; any other value selects the responder.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "send" {
            Role::Initiator
        } else {
            Role::Responder
        }
    }

    /// Identifier used to key this role's rendezvous location.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Initiator => "send",
            Role::Responder => "receive",
        }
    }

    /// The role the peer plays.
    pub fn peer(&self) -> Role {
        match self {
            Role::Initiator => Role::Responder,
            Role::Responder => Role::Initiator,
        }
    }

    pub fn is_controlling(&self) -> bool {
        matches!(self, Role::Initiator)
    }

    /// The `index`-th message this role sends during the exchange.
    pub fn message(&self, index: usize) -> String {
        match self {
            Role::Initiator => format!("hello {}", index),
            Role::Responder => format!("world {}", index),
        }
    }

    /// Full ordered message set this role sends.
    pub fn messages(&self) -> Vec<String> {
        (0..MESSAGE_COUNT).map(|i| self.message(i)).collect()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Initiator => write!(f, "initiator"),
            Role::Responder => write!(f, "responder"),
        }
    }
}
