/*!
# Example
Shows how to use the library to fetch the current time according to the
requested NTP server.

```rust,no_run
use chrono::TimeZone;

#[tokio::main]
async fn main() {
    let time = network_time::fetch_time().await.unwrap();
    let utc = chrono::Utc
        .timestamp_opt(time.secs(), time.subsec_nanos())
        .unwrap();
    println!("{utc}");
}
```

One call performs one UDP exchange: the 48-byte client-mode request goes out, and the first
of {reply, socket error, timeout} decides the outcome. There are no retries and no state
shared between calls, so concurrent fetches against different servers are fully independent.
*/

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// The async fetch operation: one request, one reply, raced against a timeout.
pub mod client;
/// Configuration with environment-seeded, read-once process defaults.
pub mod config;
/// Error types for the NTP fetch operation.
pub mod error;
pub mod protocol;
/// Conversion between NTP timestamps (epoch 1900) and Unix time (epoch 1970).
pub mod unix_time;

pub use client::{fetch_time, fetch_time_with};
pub use config::{Config, DEFAULT_SERVER, DEFAULT_TIMEOUT};
pub use error::Error;
pub use unix_time::Instant;
