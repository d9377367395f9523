//! Risk port for order screening.
//!
//! This module defines the trait for the risk authority that must approve
//! every order before it is logged or sent to the marketplace.

use crate::domain::Order;

/// Risk authority consulted once per order, in batch order.
///
/// The session owns batch policy: the first `false` abandons the whole
/// batch. Implementations only answer for a single order.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `approve` has no side effects visible to the session
/// - Wiring decides whether one instance is shared process-wide
pub trait RiskGate: Send + Sync {
    /// Return `true` if the order may proceed.
    fn approve(&self, order: &Order) -> bool;

    /// Name used in logs.
    fn name(&self) -> &'static str {
        "risk"
    }
}

impl<T: RiskGate + ?Sized> RiskGate for std::sync::Arc<T> {
    fn approve(&self, order: &Order) -> bool {
        (**self).approve(order)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
