//! Shield Face - Animated Watchface Firmware
//!
//! Main firmware binary for RP2040-based watch boards. Once a minute two
//! shield panels slide over the time text, the text is rewritten while it is
//! hidden, and the shield opens again after a pause.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::rtc::{self, Rtc};
use {defmt_rtt as _, panic_probe as _};

use shield_core::config::parse_config;
use shield_core::FaceConfig;

use crate::clock::RtcClock;

/// Embedded face configuration (compiled into firmware)
/// Edit face.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../face.toml");

mod channels;
mod clock;
mod display;
mod tasks;

bind_interrupts!(struct Irqs {
    RTC_IRQ => rtc::InterruptHandler;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Shield face firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    info!(
        "Face config: {}ms {:?}, completion={:?}, overlap={:?}",
        config.duration_ms, config.curve, config.completion, config.overlap
    );

    let mut clock = RtcClock::new(Rtc::new(p.RTC, Irqs), config.clock_style);
    let first_tick_in_s = clock.seconds_to_next_minute();
    info!("RTC initialized");

    spawner.spawn(tasks::tick_task(first_tick_in_s)).unwrap();
    spawner.spawn(tasks::controller_task(config, clock)).unwrap();

    info!("All tasks spawned, face running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Parse the embedded face.toml
///
/// build.rs has already validated the file; the fallback only guards
/// against the two parsers disagreeing.
fn load_config() -> FaceConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse face.toml line {}: {:?}", e.line, e.kind);
            warn!("Using built-in face defaults");
            FaceConfig::default()
        }
    }
}
