//! Clean-check debounce timers.
//!
//! A dirty field re-checks itself a short while after its last dirty check.
//! Each field has at most one pending check; scheduling again replaces it.
//! Timers are plain deadlines: the owner polls them, nothing runs on its own.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::field::FieldId;

/// Handle to a scheduled clean check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

#[derive(Debug, Clone, Copy)]
struct Pending {
    token: TimerToken,
    deadline: Instant,
}

/// Pending clean checks, at most one per field.
#[derive(Debug, Default)]
pub struct CleanCheckTimers {
    pending: HashMap<FieldId, Pending>,
    next_token: u64,
}

impl CleanCheckTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a check for `field` after `delay`, replacing any pending one.
    pub fn schedule(&mut self, field: FieldId, now: Instant, delay: Duration) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.pending.insert(
            field,
            Pending {
                token,
                deadline: now + delay,
            },
        );
        token
    }

    /// Cancel the pending check of `field`. Returns its token if one existed.
    pub fn cancel(&mut self, field: FieldId) -> Option<TimerToken> {
        self.pending.remove(&field).map(|p| p.token)
    }

    /// Cancel by token. Stale tokens are ignored.
    pub fn cancel_token(&mut self, token: TimerToken) -> bool {
        let field = self
            .pending
            .iter()
            .find_map(|(field, p)| (p.token == token).then_some(*field));
        field.is_some_and(|field| self.pending.remove(&field).is_some())
    }

    pub fn is_pending(&self, field: FieldId) -> bool {
        self.pending.contains_key(&field)
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|p| p.deadline).min()
    }

    /// Remove and return every field whose deadline is at or before `now`,
    /// earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<FieldId> {
        let mut due: Vec<(Instant, TimerToken, FieldId)> = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .map(|(field, p)| (p.deadline, p.token, *field))
            .collect();
        due.sort_by_key(|(deadline, token, _)| (*deadline, token.0));

        for (_, _, field) in &due {
            self.pending.remove(field);
        }
        due.into_iter().map(|(_, _, field)| field).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
