// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Configuration for the NTP fetch operation.
//!
//! Process-wide defaults are read from the environment once, the first time they are needed,
//! and are immutable afterwards. Explicit values set on a [`Config`] always win over the
//! environment.

use std::env;
use std::sync::OnceLock;
use std::time::Duration;

use crate::protocol;

/// The NTP server queried when neither the environment nor the caller names one.
pub const DEFAULT_SERVER: &str = "pool.ntp.org";

/// Amount of acceptable time to await a response from the remote server.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

const SERVER_VAR: &str = "NTP_SERVER";
const PORT_VAR: &str = "NTP_PORT";
const TIMEOUT_VAR: &str = "NTP_REPLY_TIMEOUT";

/// Configuration for a single fetch: which server to ask and how long to wait.
///
/// `Config::default()` starts from the process-wide defaults; the builder-style setters
/// override any subset.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use network_time::Config;
///
/// let config = Config::default()
///     .server("time.google.com")
///     .timeout(Duration::from_secs(2));
/// assert_eq!(config.port, 123);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Host name or IP literal of the NTP server.
    pub server: String,
    /// UDP port the server listens on.
    pub port: u16,
    /// Maximum duration to wait for the exchange, measured from call start.
    pub timeout: Duration,
}

impl Config {
    /// Set the server host name or IP literal.
    pub fn server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    /// Set the server port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the reply timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        env_defaults().clone()
    }
}

/// The process-wide defaults, read from `NTP_SERVER`, `NTP_PORT` and `NTP_REPLY_TIMEOUT`
/// (milliseconds) exactly once. Unset or unparseable variables fall back to the built-in
/// defaults.
fn env_defaults() -> &'static Config {
    static DEFAULTS: OnceLock<Config> = OnceLock::new();
    DEFAULTS.get_or_init(|| Config {
        server: env::var(SERVER_VAR).unwrap_or_else(|_| DEFAULT_SERVER.to_owned()),
        port: env::var(PORT_VAR)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(protocol::PORT),
        timeout: env::var(TIMEOUT_VAR)
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TIMEOUT),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_override_any_subset() {
        let config = Config {
            server: DEFAULT_SERVER.to_owned(),
            port: protocol::PORT,
            timeout: DEFAULT_TIMEOUT,
        };
        let config = config
            .server("time.google.com")
            .timeout(Duration::from_secs(2));
        assert_eq!(config.server, "time.google.com");
        assert_eq!(config.port, 123);
        assert_eq!(config.timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_built_in_defaults() {
        assert_eq!(DEFAULT_SERVER, "pool.ntp.org");
        assert_eq!(protocol::PORT, 123);
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_millis(10_000));
    }
}
