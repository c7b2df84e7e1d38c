//! Application-level configuration.
//!
//! Controls how the live session is set up at boot.

/// Default capacity of each subscriber's delivery queue.
pub const DEFAULT_SUBSCRIBER_BUFFER: usize = 8;

/// Session behavior configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Start the session as soon as the process is up.
    pub auto_start: bool,
    /// Pending snapshots kept per subscriber before the oldest is dropped.
    pub subscriber_buffer: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_start: false,
            subscriber_buffer: DEFAULT_SUBSCRIBER_BUFFER,
        }
    }
}

impl SessionConfig {
    /// Set the per-subscriber buffer, clamped to at least one slot.
    pub fn with_subscriber_buffer(mut self, size: usize) -> Self {
        self.subscriber_buffer = size.max(1);
        self
    }

    pub fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }
}
