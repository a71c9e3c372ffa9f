// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Error types for the NTP fetch operation.

use std::fmt;
use std::io;

/// The ways a time fetch can fail.
///
/// Exactly one of these is reported per call; whichever of {transport failure, timeout, reply}
/// happens first wins and any later signal on the same socket is never observed.
#[derive(Debug)]
pub enum Error {
    /// Sending the request or receiving the reply failed at the socket level.
    ///
    /// Covers DNS resolution failures, unreachable networks and asynchronous socket errors
    /// such as an ICMP port-unreachable surfaced on the pending receive.
    Transport(io::Error),
    /// No reply and no socket error arrived within the configured timeout.
    Timeout {
        /// The server that did not respond.
        server: String,
        /// The port the request was sent to.
        port: u16,
    },
    /// The reply was shorter than the 48-byte NTP header and cannot contain a transmit
    /// timestamp at the expected offset.
    MalformedReply {
        /// The server the reply came from.
        server: String,
        /// The port the request was sent to.
        port: u16,
        /// The actual length of the reply in bytes.
        len: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(err) => {
                write!(f, "NTP transport failed: {err}")
            }
            Error::Timeout { server, port } => {
                write!(f, "Timeout waiting for NTP response from {server}:{port}")
            }
            Error::MalformedReply { server, port, len } => {
                write!(
                    f,
                    "Received NTP response from {server}:{port} is too short: {len}"
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Transport(err)
    }
}
