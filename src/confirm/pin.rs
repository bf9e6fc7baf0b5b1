//! PIN handoff primitives
//!
//! The coordinator does not own PIN entry. It hands the gate a one-shot
//! ticket; the gate settles it by approving or declining, each of which
//! consumes the ticket. A ticket dropped without a decision resolves the
//! awaiting side to `Abandoned` (user navigated away mid-entry).

use tokio::sync::oneshot;

/// Exhaustive outcome of one PIN handoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinDecision {
    Approved,
    Declined,
    /// The gate went away without deciding; treated as a decline
    Abandoned,
}

/// Settable side of a PIN handoff, given to the gate.
///
/// `approve` and `decline` take `self` by value, so at most one of them
/// can ever fire per handoff.
pub struct PinTicket {
    tx: oneshot::Sender<PinDecision>,
}

impl PinTicket {
    pub fn new() -> (PinTicket, PinReceiver) {
        let (tx, rx) = oneshot::channel();
        (PinTicket { tx }, PinReceiver { rx })
    }

    pub fn approve(self) {
        // Receiver gone means the flow was torn down; nothing to apply the
        // decision to, so the send result is irrelevant.
        let _ = self.tx.send(PinDecision::Approved);
    }

    pub fn decline(self) {
        let _ = self.tx.send(PinDecision::Declined);
    }
}

/// Awaitable side of a PIN handoff, kept by the coordinator.
pub struct PinReceiver {
    rx: oneshot::Receiver<PinDecision>,
}

impl PinReceiver {
    /// Resolve the handoff. A dropped ticket maps to `Abandoned`, so the
    /// coordinator can never be left stuck in a processing state.
    pub async fn decision(self) -> PinDecision {
        self.rx.await.unwrap_or(PinDecision::Abandoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_approve_resolves_once() {
        let (ticket, rx) = PinTicket::new();
        ticket.approve();
        assert_eq!(rx.decision().await, PinDecision::Approved);
    }

    #[tokio::test]
    async fn test_decline_resolves_once() {
        let (ticket, rx) = PinTicket::new();
        ticket.decline();
        assert_eq!(rx.decision().await, PinDecision::Declined);
    }

    #[tokio::test]
    async fn test_dropped_ticket_is_abandonment() {
        let (ticket, rx) = PinTicket::new();
        drop(ticket);
        assert_eq!(rx.decision().await, PinDecision::Abandoned);
    }

    #[tokio::test]
    async fn test_decision_after_flow_teardown_is_harmless() {
        let (ticket, rx) = PinTicket::new();
        drop(rx);
        // Must not panic even though nobody is listening
        ticket.approve();
    }
}
