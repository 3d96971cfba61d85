//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use shield_core::HostEvent;

/// Channel capacity for host events
const EVENT_CHANNEL_SIZE: usize = 8;

/// Host events for the face sequencer (minute ticks)
///
/// Animation stop notifications do not pass through here; the controller
/// collects them directly from the surface it steps.
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, HostEvent, EVENT_CHANNEL_SIZE> =
    Channel::new();
