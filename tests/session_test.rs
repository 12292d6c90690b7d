use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::UdpSocket;
use tokio::time::Instant;

use ice_rendezvous::ice::{run_exchange, FileRendezvous, IceConn, SessionDescriptor};
use ice_rendezvous::{session, Role, SessionConfig};

fn descriptor_for(role: Role, addr: std::net::SocketAddr) -> SessionDescriptor {
    SessionDescriptor {
        username: format!("{}-ufrag", role.as_str()),
        password: format!("{}-password-0123456789", role.as_str()),
        candidates: vec![format!(
            "1 1 udp 2130706431 {} {} typ host",
            addr.ip(),
            addr.port()
        )],
    }
}

/// One side of the scenario with the ICE negotiation replaced by a
/// pre-seeded loopback socket: publish, retrieve, then exchange.
async fn run_side(
    role: Role,
    dir: std::path::PathBuf,
    socket: UdpSocket,
) -> (SessionDescriptor, ice_rendezvous::ice::ExchangeReport) {
    let rendezvous = FileRendezvous::new(dir).with_poll_interval(Duration::from_millis(10));
    let local = descriptor_for(role, socket.local_addr().unwrap());
    rendezvous.publish(&local, role).await.unwrap();

    let remote = rendezvous
        .retrieve(role, Instant::now() + Duration::from_secs(10))
        .await
        .unwrap();

    let peer_addr = remote.candidates[0]
        .split_whitespace()
        .skip(4)
        .take(2)
        .collect::<Vec<_>>()
        .join(":");
    socket.connect(&peer_addr).await.unwrap();

    let report = run_exchange(
        IceConn::new(Arc::new(socket)),
        role,
        Duration::from_secs(5),
    )
    .await
    .unwrap();
    (remote, report)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_rendezvous_then_exchange_both_roles() {
    let dir = TempDir::new().unwrap();
    let send_socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let recv_socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let send_addr = send_socket.local_addr().unwrap();
    let recv_addr = recv_socket.local_addr().unwrap();

    let responder = tokio::spawn(run_side(
        Role::Responder,
        dir.path().to_path_buf(),
        recv_socket,
    ));
    // Initiator starts later; the responder keeps polling meanwhile
    tokio::time::sleep(Duration::from_millis(100)).await;
    let initiator = tokio::spawn(run_side(
        Role::Initiator,
        dir.path().to_path_buf(),
        send_socket,
    ));

    let (init_remote, init_report) = initiator.await.unwrap();
    let (resp_remote, resp_report) = responder.await.unwrap();

    assert_eq!(init_remote, descriptor_for(Role::Responder, recv_addr));
    assert_eq!(resp_remote, descriptor_for(Role::Initiator, send_addr));

    let mut init_received = init_report.received.clone();
    init_received.sort();
    let mut resp_received = resp_report.received.clone();
    resp_received.sort();

    assert_eq!(init_report.sent, Role::Initiator.messages());
    assert_eq!(resp_report.sent, Role::Responder.messages());
    assert_eq!(init_received, Role::Responder.messages());
    assert_eq!(resp_received, Role::Initiator.messages());

    assert!(dir.path().join("send.json").exists());
    assert!(dir.path().join("receive.json").exists());
}

#[tokio::test]
async fn test_session_fails_on_malformed_peer_descriptor() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("receive.json"), b"[not a descriptor]").unwrap();

    let mut config = SessionConfig::new(Role::Initiator);
    config.rendezvous_dir = dir.path().to_path_buf();
    config.settle = Duration::from_millis(50);

    let err = session::run(config).await.unwrap_err();
    assert_eq!(ice_rendezvous::exit_code(&err), 15);
    assert!(dir.path().join("send.json").exists());
}

#[tokio::test]
async fn test_session_times_out_without_peer() {
    let dir = TempDir::new().unwrap();

    let mut config = SessionConfig::new(Role::Responder);
    config.rendezvous_dir = dir.path().to_path_buf();
    config.settle = Duration::from_millis(50);
    config.poll_interval = Duration::from_millis(10);
    config.rendezvous_timeout = Duration::from_millis(200);

    let err = session::run(config).await.unwrap_err();
    assert_eq!(ice_rendezvous::exit_code(&err), 20);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_full_ice_session_between_two_agents() {
    let dir = TempDir::new().unwrap();

    let config_for = |role| {
        let mut config = SessionConfig::new(role);
        config.rendezvous_dir = dir.path().to_path_buf();
        config.settle = Duration::from_millis(500);
        config.poll_interval = Duration::from_millis(20);
        config.rendezvous_timeout = Duration::from_secs(20);
        config.connect_timeout = Duration::from_secs(20);
        config.read_timeout = Duration::from_secs(10);
        config
    };

    let initiator = tokio::spawn(session::run(config_for(Role::Initiator)));
    let responder = tokio::spawn(session::run(config_for(Role::Responder)));

    let init_report = initiator.await.unwrap().unwrap();
    let resp_report = responder.await.unwrap().unwrap();

    let mut init_received = init_report.received;
    init_received.sort();
    let mut resp_received = resp_report.received;
    resp_received.sort();

    assert_eq!(init_received, Role::Responder.messages());
    assert_eq!(resp_received, Role::Initiator.messages());
}
