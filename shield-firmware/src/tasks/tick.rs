//! Minute tick task
//!
//! Waits for the next whole minute on the RTC, then posts a tick every
//! minute from there on.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker, Timer};

use shield_core::HostEvent;

use crate::channels::EVENT_CHANNEL;

/// Tick interval in seconds
pub const TICK_INTERVAL_S: u64 = 60;

/// Tick task - posts `HostEvent::Tick` once a minute
#[embassy_executor::task]
pub async fn tick_task(first_tick_in_s: u32) {
    info!("Tick task started, first tick in {}s", first_tick_in_s);

    Timer::after_secs(u64::from(first_tick_in_s)).await;
    let mut ticker = Ticker::every(Duration::from_secs(TICK_INTERVAL_S));

    loop {
        let timestamp_s = Instant::now().as_secs() as u32;

        // A full channel means the controller is far behind; this tick is stale
        if EVENT_CHANNEL
            .try_send(HostEvent::Tick { timestamp_s })
            .is_err()
        {
            warn!("Event channel full, tick at {}s lost", timestamp_s);
        }

        ticker.next().await;
    }
}
