use std::time::Duration;

/// What a scheduled callback is meant to do once it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Present the next loading quote.
    NextQuote,
    /// Make the loading skip affordance available.
    RevealSkip,
}

/// Handle carried by a scheduled callback back into the controller.
///
/// Only tokens issued under the current epoch are honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    epoch: u64,
    pub kind: TimerKind,
}

impl TimerToken {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Request to the driver: deliver `token` back after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    pub token: TimerToken,
    pub delay: Duration,
}

/// Generation counter that invalidates every outstanding timer when bumped.
#[derive(Debug, Clone, Default)]
pub struct TimerEpoch {
    current: u64,
}

impl TimerEpoch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn bump(&mut self) {
        self.current += 1;
    }

    pub fn schedule(&self, kind: TimerKind, delay: Duration) -> TimerRequest {
        TimerRequest {
            token: TimerToken {
                epoch: self.current,
                kind,
            },
            delay,
        }
    }

    pub fn is_current(&self, token: &TimerToken) -> bool {
        token.epoch == self.current
    }
}
