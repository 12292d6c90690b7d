//! Exchange session proving bidirectional flow over the ICE connection.
//!
//! A writer task sends the role's three messages while the caller reads
//! three inbound messages. The first failure on either side ends the
//! exchange. A successful report means the writer was joined and every local
//! message was handed to the transport.

use std::time::Duration;

use super::conn::{IceConn, RECV_BUFFER_SIZE};
use super::role::{Role, MESSAGE_COUNT};
use crate::error::IceError;

/// Outcome of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeReport {
    pub sent: Vec<String>,
    pub received: Vec<String>,
}

/// Send the role's messages and read the same number from the peer.
///
/// Each read is bounded by `read_timeout`.
pub async fn run_exchange(
    conn: IceConn,
    role: Role,
    read_timeout: Duration,
) -> Result<ExchangeReport, IceError> {
    if let Some(addr) = conn.remote_addr() {
        println!("Started communication with {}", addr);
    }

    let writer_conn = conn.clone();
    let mut writer = tokio::spawn(async move {
        let mut sent = Vec::with_capacity(MESSAGE_COUNT);
        for msg in role.messages() {
            writer_conn.send(msg.as_bytes()).await?;
            println!("Sent: {}", msg);
            sent.push(msg);
        }
        Ok::<_, IceError>(sent)
    });

    let reader = read_messages(&conn, read_timeout);
    tokio::pin!(reader);

    // Whichever path fails first decides the error
    let (sent, received) = tokio::select! {
        joined = &mut writer => {
            let sent = flatten_writer(joined)?;
            (sent, (&mut reader).await?)
        }
        read = &mut reader => match read {
            Ok(received) => (flatten_writer(writer.await)?, received),
            Err(e) => {
                writer.abort();
                return Err(e);
            }
        },
    };

    Ok(ExchangeReport { sent, received })
}

fn flatten_writer(
    joined: Result<Result<Vec<String>, IceError>, tokio::task::JoinError>,
) -> Result<Vec<String>, IceError> {
    joined.map_err(|e| IceError::TransportWrite(webrtc_util::Error::Other(e.to_string())))?
}

async fn read_messages(conn: &IceConn, read_timeout: Duration) -> Result<Vec<String>, IceError> {
    let mut buf = vec![0u8; RECV_BUFFER_SIZE];
    let mut received = Vec::with_capacity(MESSAGE_COUNT);

    for _ in 0..MESSAGE_COUNT {
        let n = tokio::time::timeout(read_timeout, conn.recv(&mut buf))
            .await
            .map_err(|_| IceError::TimedOut {
                stage: "transport read",
                after: read_timeout,
            })??;
        let msg = String::from_utf8_lossy(&buf[..n]).into_owned();
        println!("Received: '{}'", msg);
        received.push(msg);
    }

    Ok(received)
}
