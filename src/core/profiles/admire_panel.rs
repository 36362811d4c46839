use std::time::{Duration, Instant};

/// How long the toggle button stays live after the profile is sent.
pub const PANEL_TIMEOUT: Duration = Duration::from_millis(300_000);

/// Accepted clicks before the panel closes itself.
pub const MAX_TOGGLES: u32 = 4;

pub const EXPIRED_NOTICE: &str = "This message has expired, please try again";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Active { accepted: u32 },
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Not the invoker, or the panel is already closed. Does not count.
    Ignored,
    /// Apply the toggle, then report it with `record_toggle` if it went through.
    Accepted,
}

/// Lifecycle of the "Toggle Admire Opt-In" button on a self profile.
///
/// Time is passed in rather than read so the transitions can be driven from tests.
#[derive(Debug, Clone)]
pub struct AdmirePanel {
    invoker_id: u64,
    deadline: Instant,
    state: PanelState,
}

impl AdmirePanel {
    pub fn open(invoker_id: u64, now: Instant) -> Self {
        Self {
            invoker_id,
            deadline: now + PANEL_TIMEOUT,
            state: PanelState::Active { accepted: 0 },
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_expired(&self) -> bool {
        self.state == PanelState::Expired
    }

    /// Time left to wait for the next click, or `None` once the panel is closed.
    pub fn remaining(&mut self, now: Instant) -> Option<Duration> {
        if let PanelState::Active { .. } = self.state {
            if now >= self.deadline {
                self.state = PanelState::Expired;
            }
        }

        match self.state {
            PanelState::Active { .. } => Some(self.deadline - now),
            PanelState::Expired => None,
        }
    }

    /// Decide whether a press should be served. Nothing is counted here.
    pub fn click(&mut self, user_id: u64, now: Instant) -> ClickOutcome {
        if user_id != self.invoker_id || self.remaining(now).is_none() {
            return ClickOutcome::Ignored;
        }
        ClickOutcome::Accepted
    }

    /// Count a toggle that was stored. Closes the panel on the last allowed one.
    pub fn record_toggle(&mut self) {
        if let PanelState::Active { accepted } = self.state {
            let accepted = accepted + 1;
            self.state = if accepted >= MAX_TOGGLES {
                PanelState::Expired
            } else {
                PanelState::Active { accepted }
            };
        }
    }

    /// Close the panel early, e.g. when the collector stream ends.
    pub fn expire(&mut self) {
        self.state = PanelState::Expired;
    }
}
