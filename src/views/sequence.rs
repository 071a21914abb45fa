/// Handle for one issued request. Only the newest ticket of a sequence may
/// apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Ticket {
    pub fn number(&self) -> u64 {
        self.0
    }
}

/// Monotonic request counter for one piece of view state.
#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    issued: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }

    /// Retire every outstanding ticket without issuing a new one.
    pub fn invalidate(&mut self) {
        self.issued += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_newest_ticket_is_current() {
        let mut seq = RequestSequence::default();
        let first = seq.issue();
        assert!(seq.is_current(first));
        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
        assert_eq!(second.number(), 2);
    }

    #[test]
    fn invalidate_retires_outstanding_tickets() {
        let mut seq = RequestSequence::default();
        let ticket = seq.issue();
        seq.invalidate();
        assert!(!seq.is_current(ticket));
        let next = seq.issue();
        assert!(seq.is_current(next));
    }
}
