//! How to fetch the current time from an NTP server.

use chrono::TimeZone;

fn utc_time(instant: network_time::Instant) -> chrono::DateTime<chrono::Utc> {
    chrono::Utc
        .timestamp_opt(instant.secs(), instant.subsec_nanos())
        .unwrap()
}

#[tokio::main]
async fn main() {
    let time = network_time::fetch_time().await.unwrap();
    println!("Server time (UTC):   {}", utc_time(time));
    println!(
        "Server time (local): {}",
        utc_time(time).with_timezone(&chrono::Local)
    );
    println!("Unix milliseconds:   {}", time.unix_millis());
}
