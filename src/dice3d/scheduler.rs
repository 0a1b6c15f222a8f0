//! Deferred resolve callbacks
//!
//! A one-shot timer per started roll, measured in wall-clock time rather than
//! frames. Timers cannot be cancelled: they always fire, and the receiver uses
//! the ticket to decide whether the roll they belong to is still alive.

use std::time::Duration;

use crate::dice3d::engine::RollTicket;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingResolve {
    ticket: RollTicket,
    remaining: Duration,
}

/// Pending resolve timers, fired in the order they come due
#[derive(Clone, Debug, Default)]
pub struct RollScheduler {
    pending: Vec<PendingResolve>,
}

impl RollScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, ticket: RollTicket, delay: Duration) {
        self.pending.push(PendingResolve {
            ticket,
            remaining: delay,
        });
    }

    /// Advance every timer by `dt` and return the tickets that came due.
    pub fn advance(&mut self, dt: Duration) -> Vec<RollTicket> {
        let mut due = Vec::new();
        self.pending.retain_mut(|pending| {
            pending.remaining = pending.remaining.saturating_sub(dt);
            if pending.remaining.is_zero() {
                due.push(pending.ticket);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Time left before `ticket` fires, if it is still pending.
    pub fn remaining(&self, ticket: RollTicket) -> Option<Duration> {
        self.pending
            .iter()
            .find(|p| p.ticket == ticket)
            .map(|p| p.remaining)
    }
}
