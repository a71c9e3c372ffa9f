// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Async NTP fetch using the Tokio runtime.
//!
//! One call sends one client-mode request over UDP and races the reply against the configured
//! timeout with [`tokio::time::timeout`]. Whichever of {transport failure, timeout, reply}
//! resolves first wins; the losing future is dropped, so the operation settles exactly once and
//! the socket is closed before the call returns on every path.
//!
//! # Runtime Requirements
//!
//! These functions must be called from within a Tokio runtime context.
//! The library does **not** create a runtime — you must provide one.
//!
//! # Examples
//!
//! ```no_run
//! # async fn example() -> Result<(), network_time::Error> {
//! let time = network_time::fetch_time().await?;
//! println!("Unix millis: {}", time.unix_millis());
//! # Ok(())
//! # }
//! ```

use log::debug;
use std::io;
use std::net::SocketAddr;
use tokio::net::UdpSocket;

use crate::config::Config;
use crate::error::Error;
use crate::protocol;
use crate::unix_time::Instant;

/// Fetch the current time from the default NTP server.
///
/// Equivalent to [`fetch_time_with`] called with [`Config::default()`], i.e. the process-wide
/// defaults seeded from the environment.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> Result<(), network_time::Error> {
/// let time = network_time::fetch_time().await?;
/// println!("Seconds since the Unix epoch: {}", time.secs());
/// # Ok(())
/// # }
/// ```
pub async fn fetch_time() -> Result<Instant, Error> {
    fetch_time_with(&Config::default()).await
}

/// Fetch the current time from the server named by `config`.
///
/// Sends a single 48-byte client-mode request and waits for the first of three outcomes:
/// a reply datagram, a socket-level error, or the timeout. The timer covers the whole
/// exchange including DNS resolution and the send itself, so an immediate reply is never
/// missed and the timeout measures from call start.
///
/// A reply shorter than the 48-byte header fails with [`Error::MalformedReply`]; otherwise
/// the transmit timestamp in its final 8 bytes is decoded and returned as a Unix-epoch
/// [`Instant`]. Exactly one inbound datagram is consumed; the socket is closed when the call
/// returns, regardless of outcome.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> Result<(), network_time::Error> {
/// use std::time::Duration;
/// use network_time::Config;
///
/// let config = Config::default()
///     .server("time.google.com")
///     .timeout(Duration::from_secs(2));
/// let time = network_time::fetch_time_with(&config).await?;
/// println!("Unix millis: {}", time.unix_millis());
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - [`Error::Transport`] if DNS resolution, binding, sending or receiving fails,
///   including asynchronous socket errors such as ICMP port-unreachable.
/// - [`Error::Timeout`] if nothing arrives within `config.timeout`.
/// - [`Error::MalformedReply`] if the reply is shorter than 48 bytes.
pub async fn fetch_time_with(config: &Config) -> Result<Instant, Error> {
    match tokio::time::timeout(config.timeout, exchange(config)).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout {
            server: config.server.clone(),
            port: config.port,
        }),
    }
}

/// Select the appropriate bind address based on the target address family.
///
/// Returns `"0.0.0.0:0"` for IPv4 targets and `"[::]:0"` for IPv6 targets.
fn bind_addr_for(target: &SocketAddr) -> &'static str {
    match target {
        SocketAddr::V4(_) => "0.0.0.0:0",
        SocketAddr::V6(_) => "[::]:0",
    }
}

/// Inner async implementation without the timeout wrapping.
async fn exchange(config: &Config) -> Result<Instant, Error> {
    // Async DNS resolution via tokio. The first resolved address is the target.
    let resolved: Vec<SocketAddr> =
        tokio::net::lookup_host((config.server.as_str(), config.port))
            .await?
            .collect();
    let target = match resolved.first() {
        Some(&addr) => addr,
        None => {
            return Err(Error::Transport(io::Error::new(
                io::ErrorKind::InvalidInput,
                "address resolved to no socket addresses",
            )))
        }
    };

    // One ephemeral socket per call, connected so that asynchronous socket errors (e.g. ICMP
    // port-unreachable) surface on the pending recv and datagrams from other peers are
    // filtered by the kernel.
    let sock = UdpSocket::bind(bind_addr_for(&target)).await?;
    sock.connect(target).await?;

    let request = protocol::client_request()?;
    let sent = sock.send(&request).await?;
    debug!("{:?}", sock.local_addr());
    debug!("sent: {} bytes to {}", sent, target);

    // Accept exactly one reply. The buffer is larger than the header to accommodate
    // extension fields, which are ignored.
    let mut reply = [0u8; 1024];
    let len = sock.recv(&mut reply[..]).await?;
    debug!("recv: {} bytes from {}", len, target);

    if len < protocol::PACKET_SIZE_BYTES {
        return Err(Error::MalformedReply {
            server: config.server.clone(),
            port: config.port,
            len,
        });
    }

    let transmit = protocol::transmit_timestamp(&reply[..len])?;
    Ok(Instant::from(transmit))
}
