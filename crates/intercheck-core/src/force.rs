// ── Force-test state machine ──
//
// Pure transition logic, no I/O. The dashboard feeds it status sets and
// request outcomes; it answers whether a transition happened.

use thiserror::Error;

use crate::model::StatusSet;

/// Whether a user-requested speed test is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForceState {
    #[default]
    Idle,
    /// The server accepted a force request and the test has not been
    /// observed to finish yet.
    Forcing,
}

/// Why a force request was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ForceRefusal {
    #[error("a forced speed test is already pending")]
    AlreadyForcing,
    #[error("a force request is already in flight")]
    RequestOutstanding,
    #[error("a speed test is already running")]
    TestInProgress,
}

#[derive(Debug, Default)]
pub struct ForceController {
    state: ForceState,
    outstanding: bool,
    /// Number of status polls dispatched when `Forcing` was entered.
    forced_after_poll: u64,
}

impl ForceController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ForceState {
        self.state
    }

    pub fn is_request_outstanding(&self) -> bool {
        self.outstanding
    }

    /// Guard a new force request against the latest known status.
    ///
    /// On success the request counts as outstanding until one of
    /// [`accept`](Self::accept), [`reject`](Self::reject) or
    /// [`fail`](Self::fail) is called.
    pub fn try_begin(&mut self, last_status: &StatusSet) -> Result<(), ForceRefusal> {
        if self.state == ForceState::Forcing {
            return Err(ForceRefusal::AlreadyForcing);
        }
        if self.outstanding {
            return Err(ForceRefusal::RequestOutstanding);
        }
        if last_status.test_in_progress() {
            return Err(ForceRefusal::TestInProgress);
        }
        self.outstanding = true;
        Ok(())
    }

    /// The server scheduled the test. `polls_dispatched` is the poll
    /// counter at acknowledgment time; only later polls may release.
    pub fn accept(&mut self, polls_dispatched: u64) {
        self.outstanding = false;
        self.state = ForceState::Forcing;
        self.forced_after_poll = polls_dispatched;
    }

    /// The server answered but declined.
    pub fn reject(&mut self) {
        self.outstanding = false;
        self.state = ForceState::Idle;
    }

    /// The request never got a usable answer.
    pub fn fail(&mut self) {
        self.outstanding = false;
        self.state = ForceState::Idle;
    }

    /// Feed the result of status poll number `poll_seq`.
    ///
    /// Returns `true` when this poll released `Forcing`.
    pub fn observe(&mut self, status: &StatusSet, poll_seq: u64) -> bool {
        if self.state != ForceState::Forcing
            || poll_seq <= self.forced_after_poll
            || status.test_in_progress()
        {
            return false;
        }
        self.state = ForceState::Idle;
        true
    }
}
