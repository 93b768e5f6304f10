//! Per-slot request sequencing.
//!
//! Requests are never cancelled once issued; instead every completion
//! handler checks that its ticket is still the latest issued for the slot
//! and discards stale results. This is what prevents an overlapping, slower
//! response from reverting state a newer response already wrote.

/// Monotonic sequence for one request slot.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sequence {
    issued: u64,
}

impl Sequence {
    /// Creates a sequence with no issued tickets.
    #[must_use]
    pub const fn new() -> Self {
        Self { issued: 0 }
    }

    /// Issues the next ticket, superseding all earlier ones.
    pub const fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Returns `true` if `ticket` is the latest issued for this slot.
    #[must_use]
    pub const fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }
}

/// Ticket identifying one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);
