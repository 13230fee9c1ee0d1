//! Channel-backed event feed.
//!
//! Forwards every [`AppEvent`] into a bounded `embassy-sync` channel so a
//! subscriber (a dashboard bridge, a test) can drain them at its own
//! pace.  The sink never blocks the engine: when the channel is full the
//! event is dropped with a warning.
//!
//! ```text
//! ┌───────────────┐  AppEvent  ┌──────────────┐
//! │ MonitorService│──────────▶│  Subscriber   │
//! │  (tick/reset) │ try_send   │  (try_recv)   │
//! └───────────────┘            └──────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::warn;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Channel depth for the event feed.
pub const FEED_DEPTH: usize = 32;

/// Bounded MPMC event channel.
pub type FeedChannel = Channel<CriticalSectionRawMutex, AppEvent, FEED_DEPTH>;

/// Process-wide feed for callers that do not need their own channel.
pub static EVENT_FEED: FeedChannel = Channel::new();

/// [`EventSink`] that publishes into a [`FeedChannel`].
///
/// Cheap to clone; every clone talks to the same channel, so one copy
/// can go into the monitor and another can stay with the subscriber.
#[derive(Clone)]
pub struct ChannelSink {
    channel: &'static FeedChannel,
    dropped: u64,
    overflowing: bool,
}

impl ChannelSink {
    pub fn new(channel: &'static FeedChannel) -> Self {
        Self {
            channel,
            dropped: 0,
            overflowing: false,
        }
    }

    /// Sink bound to [`EVENT_FEED`].
    pub fn global() -> Self {
        Self::new(&EVENT_FEED)
    }

    /// Next queued event, if any.
    pub fn try_recv(&self) -> Option<AppEvent> {
        self.channel.try_receive().ok()
    }

    /// Take everything currently queued, oldest first.
    pub fn drain(&self) -> Vec<AppEvent> {
        core::iter::from_fn(|| self.try_recv()).collect()
    }

    /// Events this sink had to drop because the channel was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl EventSink for ChannelSink {
    fn emit(&mut self, event: &AppEvent) {
        if self.channel.try_send(event.clone()).is_ok() {
            self.overflowing = false;
            return;
        }
        self.dropped += 1;
        // One warning per overflow streak.
        if !self.overflowing {
            self.overflowing = true;
            warn!("Event feed full, dropping events ({} so far)", self.dropped);
        }
    }
}
