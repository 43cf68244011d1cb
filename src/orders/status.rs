//! Order status state machine
//!
//! The transition table lives in exactly one place: [`OrderStatus::allowed_next`].
//! Everything else (lifecycle service, API layer) asks this function instead
//! of scattering status checks.
//!
//! ```text
//! pending → confirmed → preparing → ready → completed
//!    └─────────┴────────────┴─────────┴──→ cancelled
//! ```
//!
//! `completed` and `cancelled` are terminal.

use serde::{Deserialize, Serialize};

/// Order status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed by a diner, not yet confirmed by the restaurant
    Pending,
    /// Confirmed by restaurant staff
    Confirmed,
    /// Being prepared in the kitchen
    Preparing,
    /// Ready for pickup/serving
    Ready,
    /// Served — terminal
    Completed,
    /// Cancelled — terminal, reachable from any non-terminal state
    Cancelled,
}

impl OrderStatus {
    /// Statuses reachable from `self` in a single transition
    pub fn allowed_next(self) -> &'static [OrderStatus] {
        use OrderStatus::*;
        match self {
            Pending => &[Confirmed, Cancelled],
            Confirmed => &[Preparing, Cancelled],
            Preparing => &[Ready, Cancelled],
            Ready => &[Completed, Cancelled],
            Completed | Cancelled => &[],
        }
    }

    /// Whether `target` is a legal single-step transition from `self`
    pub fn can_transition_to(self, target: OrderStatus) -> bool {
        self.allowed_next().contains(&target)
    }

    /// Terminal statuses reject every further transition
    pub fn is_terminal(self) -> bool {
        self.allowed_next().is_empty()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::OrderStatus::*;

    #[test]
    fn happy_path_edges() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Preparing));
        assert!(Preparing.can_transition_to(Ready));
        assert!(Ready.can_transition_to(Completed));
    }

    #[test]
    fn cancel_from_any_non_terminal() {
        for status in [Pending, Confirmed, Preparing, Ready] {
            assert!(status.can_transition_to(Cancelled), "{status} → cancelled");
        }
    }

    #[test]
    fn skipping_stages_is_illegal() {
        assert!(!Pending.can_transition_to(Ready));
        assert!(!Pending.can_transition_to(Preparing));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Confirmed.can_transition_to(Completed));
        assert!(!Preparing.can_transition_to(Completed));
    }

    #[test]
    fn no_backwards_edges() {
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Ready.can_transition_to(Preparing));
    }

    #[test]
    fn terminal_states_reject_everything() {
        for terminal in [Completed, Cancelled] {
            assert!(terminal.is_terminal());
            for target in [Pending, Confirmed, Preparing, Ready, Completed, Cancelled] {
                assert!(!terminal.can_transition_to(target));
            }
        }
        // Re-triggering the same terminal state is also rejected
        assert!(!Completed.can_transition_to(Completed));
        assert!(!Cancelled.can_transition_to(Cancelled));
    }
}
