//! Known-name lookup sequencing
//!
//! Refreshing the known-name pool is slow relative to a keystroke, so the
//! session coalesces edits (debounce) and only applies the response of the
//! most recently issued request. Time is passed in explicitly so the policy
//! stays testable without sleeping.

use std::time::{Duration, Instant};

use tracing::debug;

/// Default quiet period before a lookup is issued
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Identifies one issued lookup request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LookupTicket(u64);

impl LookupTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Debounce + last-write-wins bookkeeping for asynchronous lookups
#[derive(Debug, Clone)]
pub struct LookupSequencer {
    debounce: Duration,
    /// When the pending request becomes due
    due: Option<Instant>,
    /// Id of the latest issued ticket (0 = none)
    issued: u64,
    /// Id of the latest applied response (0 = none)
    applied: u64,
}

impl Default for LookupSequencer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl LookupSequencer {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            due: None,
            issued: 0,
            applied: 0,
        }
    }

    /// Record an edit: the next lookup waits for a quiet period after `now`
    pub fn touch(&mut self, now: Instant) {
        self.due = Some(now + self.debounce);
    }

    /// Request a lookup without waiting (e.g. at session start)
    pub fn request_now(&mut self, now: Instant) {
        self.due = Some(now);
    }

    /// True while an edit is waiting for its quiet period to pass
    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Time left until the pending lookup is due
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.due.map(|due| due.saturating_duration_since(now))
    }

    /// Issue a ticket once the quiet period has passed
    pub fn poll(&mut self, now: Instant) -> Option<LookupTicket> {
        match self.due {
            Some(due) if due <= now => {
                self.due = None;
                self.issued += 1;
                debug!(ticket = self.issued, "issuing lookup");
                Some(LookupTicket(self.issued))
            }
            _ => None,
        }
    }

    /// Decide whether the response for `ticket` may be applied.
    ///
    /// Only the newest issued ticket is accepted, and never after a newer
    /// response was already applied.
    pub fn accept(&mut self, ticket: LookupTicket) -> bool {
        if ticket.0 != self.issued || ticket.0 <= self.applied {
            debug!(ticket = ticket.0, latest = self.issued, "discarding stale lookup");
            return false;
        }
        self.applied = ticket.0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_debounce_coalesces_edits() {
        let start = Instant::now();
        let mut seq = LookupSequencer::new(ms(300));

        seq.touch(start);
        seq.touch(start + ms(100));
        seq.touch(start + ms(200));
        assert!(seq.poll(start + ms(450)).is_none());
        assert_eq!(seq.time_until_due(start + ms(450)), Some(ms(50)));

        let ticket = seq.poll(start + ms(500));
        assert_eq!(ticket.map(LookupTicket::id), Some(1));
        assert!(!seq.is_pending());
        assert!(seq.poll(start + ms(900)).is_none());
    }

    #[test]
    fn test_stale_response_discarded() {
        let start = Instant::now();
        let mut seq = LookupSequencer::new(ms(0));

        seq.request_now(start);
        let first = seq.poll(start).expect("first ticket");
        seq.touch(start);
        let second = seq.poll(start).expect("second ticket");

        // The older request completes last: it must not be applied
        assert!(seq.accept(second));
        assert!(!seq.accept(first));
    }

    #[test]
    fn test_older_response_rejected_while_newer_in_flight() {
        let start = Instant::now();
        let mut seq = LookupSequencer::new(ms(0));

        seq.request_now(start);
        let first = seq.poll(start).expect("first ticket");
        seq.request_now(start);
        let _second = seq.poll(start).expect("second ticket");

        assert!(!seq.accept(first));
    }

    #[test]
    fn test_same_ticket_applied_once() {
        let start = Instant::now();
        let mut seq = LookupSequencer::default();
        seq.request_now(start);
        let ticket = seq.poll(start).expect("ticket");
        assert!(seq.accept(ticket));
        assert!(!seq.accept(ticket));
    }
}
