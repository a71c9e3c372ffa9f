// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use std::net::SocketAddr;
use std::time::Duration;

use network_time::protocol::{TimestampFormat, WriteBytes};
use network_time::{fetch_time_with, Config, Error, Instant};
use tokio::net::UdpSocket;

const SHORT_TIMEOUT: Duration = Duration::from_millis(500);

/// Spawn a UDP server on an ephemeral localhost port that answers every datagram with `reply`.
async fn spawn_reply_server(reply: Vec<u8>) -> SocketAddr {
    let sock = UdpSocket::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock server");
    let addr = sock.local_addr().expect("mock server has no local addr");
    tokio::spawn(async move {
        let mut buf = [0u8; 1024];
        loop {
            if let Ok((_, src)) = sock.recv_from(&mut buf).await {
                let _ = sock.send_to(&reply, src).await;
            }
        }
    });
    addr
}

/// Bind a UDP socket that accepts datagrams but never answers them.
async fn bind_silent_server() -> (UdpSocket, SocketAddr) {
    let sock = UdpSocket::bind("127.0.0.1:0")
        .await
        .expect("failed to bind silent server");
    let addr = sock.local_addr().expect("silent server has no local addr");
    (sock, addr)
}

fn config_for(addr: SocketAddr) -> Config {
    Config::default()
        .server(addr.ip().to_string())
        .port(addr.port())
        .timeout(SHORT_TIMEOUT)
}

/// A well-formed 48-byte server reply carrying the given transmit timestamp.
fn server_reply(seconds: u32, fraction: u32) -> Vec<u8> {
    let mut reply = vec![0u8; 48];
    reply[0] = 0x24; // LI=0, VN=4, Mode=4 (Server)
    reply[1] = 2; // stratum
    let transmit = TimestampFormat { seconds, fraction };
    (&mut reply[40..48]).write_bytes(transmit).unwrap();
    reply
}

#[tokio::test]
async fn test_fetch_decodes_the_transmit_timestamp() {
    // 3_913_056_000 s after the NTP prime epoch is 2024-01-01T00:00:00Z.
    let addr = spawn_reply_server(server_reply(3_913_056_000, 0x8000_0000)).await;

    let time = fetch_time_with(&config_for(addr))
        .await
        .expect("fetch against the mock server failed");
    assert_eq!(time, Instant::new(1_704_067_200, 500_000_000));
    assert_eq!(time.unix_millis(), 1_704_067_200_500);
}

#[tokio::test]
async fn test_silent_server_times_out() {
    let (_sock, addr) = bind_silent_server().await;

    let err = fetch_time_with(&config_for(addr))
        .await
        .expect_err("fetch against a silent server should time out");
    assert!(matches!(err, Error::Timeout { .. }));
    let msg = err.to_string();
    assert!(msg.contains("Timeout"), "unexpected message: {msg}");
    assert!(
        msg.contains(&format!("{}:{}", addr.ip(), addr.port())),
        "unexpected message: {msg}"
    );
}

#[tokio::test]
async fn test_short_reply_of_10_bytes_is_rejected() {
    let addr = spawn_reply_server(vec![0u8; 10]).await;

    let err = fetch_time_with(&config_for(addr))
        .await
        .expect_err("a 10-byte reply should be rejected");
    assert!(matches!(err, Error::MalformedReply { len: 10, .. }));
    assert!(err.to_string().contains("too short: 10"));
}

#[tokio::test]
async fn test_short_reply_of_5_bytes_is_rejected() {
    let addr = spawn_reply_server(vec![0u8; 5]).await;

    let err = fetch_time_with(&config_for(addr))
        .await
        .expect_err("a 5-byte reply should be rejected");
    assert!(matches!(err, Error::MalformedReply { len: 5, .. }));
    assert!(err.to_string().contains("too short: 5"));
}

#[tokio::test]
async fn test_47_byte_reply_is_rejected() {
    let addr = spawn_reply_server(vec![0u8; 47]).await;

    let err = fetch_time_with(&config_for(addr))
        .await
        .expect_err("a 47-byte reply should be rejected");
    assert!(matches!(err, Error::MalformedReply { len: 47, .. }));
}

#[tokio::test]
async fn test_unresolvable_host_is_a_transport_error() {
    let config = Config::default()
        .server("this.hostname.definitely.does.not.exist.invalid")
        .timeout(SHORT_TIMEOUT);

    let err = fetch_time_with(&config)
        .await
        .expect_err("fetch against an unresolvable host should fail");
    assert!(matches!(err, Error::Transport(_) | Error::Timeout { .. }));
}

#[tokio::test]
async fn test_sequential_calls_release_their_sockets() {
    let (_sock, addr) = bind_silent_server().await;
    let config = config_for(addr).timeout(Duration::from_millis(50));

    // Every call binds its own socket; if one leaked per call this would exhaust
    // descriptors long before finishing.
    for _ in 0..20 {
        let err = fetch_time_with(&config).await.expect_err("should time out");
        assert!(matches!(err, Error::Timeout { .. }));
    }
}

#[tokio::test]
async fn test_concurrent_fetches_are_independent() {
    let good = spawn_reply_server(server_reply(3_913_056_000, 0)).await;
    let broken = spawn_reply_server(vec![0u8; 10]).await;

    let good_config = config_for(good);
    let broken_config = config_for(broken);
    let (good_res, broken_res) = tokio::join!(
        fetch_time_with(&good_config),
        fetch_time_with(&broken_config),
    );

    assert_eq!(
        good_res.expect("fetch against the good server failed"),
        Instant::new(1_704_067_200, 0)
    );
    assert!(matches!(
        broken_res.expect_err("fetch against the broken server should fail"),
        Error::MalformedReply { len: 10, .. }
    ));
}

#[tokio::test]
#[ignore = "hits the public NTP pool"]
async fn test_live_pool_ntp_org() {
    let time = network_time::fetch_time()
        .await
        .expect("failed to fetch time from pool.ntp.org");
    // Any live answer is well after 2020-01-01.
    assert!(time.secs() > 1_577_836_800);
}

#[tokio::test]
#[ignore = "hits the public NTP pool"]
async fn test_live_google_time() {
    let config = Config::default().server("time.google.com");
    let time = fetch_time_with(&config)
        .await
        .expect("failed to fetch time from time.google.com");
    assert!(time.secs() > 1_577_836_800);
}
