//! Connection state and reconnection backoff.

use std::time::Duration;

use super::config::BackoffConfig;

/// Current state of the socket connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Attempting to open a connection.
    Connecting,
    /// Connected and ready to send/receive envelopes.
    Open,
    /// No live connection. Either waiting out the backoff delay before the
    /// next attempt, or terminally closed.
    #[default]
    Closed,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connecting => write!(f, "Connecting"),
            Self::Open => write!(f, "Open"),
            Self::Closed => write!(f, "Closed"),
        }
    }
}

/// Reconnection delay tracker.
///
/// `delay()` is the wait before the next attempt; `advance()` doubles it up
/// to the configured ceiling, and `reset()` is called on every successful
/// open. Kept free of timers so the schedule is testable without a
/// transport or a clock.
#[derive(Clone, Debug)]
pub(crate) struct Backoff {
    config: BackoffConfig,
    current: Duration,
}

impl Backoff {
    pub(crate) fn new(config: BackoffConfig) -> Self {
        let current = config.base;
        Self { config, current }
    }

    /// The delay to wait before the next reconnect attempt.
    pub(crate) fn delay(&self) -> Duration {
        self.current
    }

    /// Double the delay, capped at the ceiling.
    pub(crate) fn advance(&mut self) {
        self.current = (self.current * 2).min(self.config.max);
    }

    /// Back to the base delay. Called when a connection opens.
    pub(crate) fn reset(&mut self) {
        self.current = self.config.base;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backoff_ms(base: u64, max: u64) -> Backoff {
        Backoff::new(BackoffConfig {
            base: Duration::from_millis(base),
            max: Duration::from_millis(max),
        })
    }

    #[test]
    fn starts_at_base() {
        let backoff = backoff_ms(2000, 8000);
        assert_eq!(backoff.delay(), Duration::from_millis(2000));
    }

    #[test]
    fn doubles_up_to_the_ceiling() {
        let mut backoff = backoff_ms(2000, 8000);

        backoff.advance();
        assert_eq!(backoff.delay(), Duration::from_millis(4000));
        backoff.advance();
        assert_eq!(backoff.delay(), Duration::from_millis(8000));
        backoff.advance();
        assert_eq!(backoff.delay(), Duration::from_millis(8000));
    }

    #[test]
    fn reset_returns_to_base() {
        let mut backoff = backoff_ms(100, 800);
        backoff.advance();
        backoff.advance();
        assert_eq!(backoff.delay(), Duration::from_millis(400));

        backoff.reset();
        assert_eq!(backoff.delay(), Duration::from_millis(100));
    }

    #[test]
    fn ceiling_below_base_clamps_immediately() {
        let mut backoff = backoff_ms(500, 300);
        backoff.advance();
        assert_eq!(backoff.delay(), Duration::from_millis(300));
    }

    #[test]
    fn default_state_is_closed() {
        assert_eq!(ConnectionState::default(), ConnectionState::Closed);
        assert_eq!(ConnectionState::Open.to_string(), "Open");
    }
}
