//! IceConn: message-oriented handle over an established ICE connection.
//!
//! The selected candidate pair is UDP, so every `send` is one datagram and
//! every `recv` returns exactly one. The handle is cheap to clone; the
//! underlying conn supports a reader and a writer running concurrently.

use std::net::SocketAddr;
use std::sync::Arc;
use webrtc_util::Conn;

use crate::error::IceError;

/// Largest datagram read in one `recv`.
pub const RECV_BUFFER_SIZE: usize = 1500;

/// Established transport returned by the ICE agent.
#[derive(Clone)]
pub struct IceConn {
    conn: Arc<dyn Conn + Send + Sync>,
}

impl IceConn {
    /// Wrap any webrtc-util connection.
    pub fn new(conn: Arc<dyn Conn + Send + Sync>) -> Self {
        Self { conn }
    }

    pub fn remote_addr(&self) -> Option<SocketAddr> {
        self.conn.remote_addr()
    }

    /// Send one message.
    pub async fn send(&self, data: &[u8]) -> Result<usize, IceError> {
        self.conn.send(data).await.map_err(IceError::TransportWrite)
    }

    /// Receive one message into `buf`, returning its length.
    pub async fn recv(&self, buf: &mut [u8]) -> Result<usize, IceError> {
        self.conn.recv(buf).await.map_err(IceError::TransportRead)
    }

    pub async fn close(&self) {
        if let Err(e) = self.conn.close().await {
            log::debug!("IceConn close error: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::UdpSocket;

    async fn socket_pair() -> (IceConn, IceConn) {
        let a = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let b = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        a.connect(b.local_addr().unwrap()).await.unwrap();
        b.connect(a.local_addr().unwrap()).await.unwrap();
        (IceConn::new(Arc::new(a)), IceConn::new(Arc::new(b)))
    }

    #[tokio::test]
    async fn test_message_boundaries_preserved() {
        let (a, b) = socket_pair().await;
        a.send(b"first").await.unwrap();
        a.send(b"second").await.unwrap();

        let mut buf = [0u8; RECV_BUFFER_SIZE];
        let n = b.recv(&mut buf).await.unwrap();
        assert_eq!(&buf[..n], b"first");
        let n = b.recv(&mut buf).await.unwrap();
        assert_eq!(&buf[..n], b"second");
    }

    #[tokio::test]
    async fn test_concurrent_send_and_recv_on_clones() {
        let (a, b) = socket_pair().await;
        let writer = a.clone();
        let send = tokio::spawn(async move { writer.send(b"ping").await });

        let b_writer = b.clone();
        b_writer.send(b"pong").await.unwrap();

        let mut buf = [0u8; RECV_BUFFER_SIZE];
        let n = a.recv(&mut buf).await.unwrap();
        assert_eq!(&buf[..n], b"pong");
        let n = b.recv(&mut buf).await.unwrap();
        assert_eq!(&buf[..n], b"ping");
        send.await.unwrap().unwrap();
    }
}
