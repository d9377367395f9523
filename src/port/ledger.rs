//! Persistence port for the order ledger.

use async_trait::async_trait;

use crate::domain::{Acknowledgment, BatchId, ClientId, OrderRecord, RecordId, ReconcileReport};
use crate::error::Result;
use crate::port::marketplace::OrderRequest;

/// Durable record of every order's intent and outcome.
///
/// Each method is its own transaction. Rows are never deleted.
#[async_trait]
pub trait OrderLedger: Send + Sync {
    /// Insert one unresolved row per order, atomically for the whole batch.
    ///
    /// Returns the generated row keys in batch order. If any insert fails,
    /// nothing from the batch is committed.
    async fn record_intent(
        &self,
        batch_id: BatchId,
        client_id: &ClientId,
        orders: &[OrderRequest],
    ) -> Result<Vec<RecordId>>;

    /// Resolve intent rows from an acknowledgment, atomically.
    ///
    /// Each confirmation resolves at most one row: the most recent row with
    /// the same loan id and requested amount whose execution code is still
    /// empty, restricted to `scope` when given. Confirmations with no such
    /// row are reported with zero affected rows. Every status name is
    /// decoded before anything is written; an unknown name aborts the
    /// whole acknowledgment.
    async fn record_outcome(
        &self,
        ack: &Acknowledgment,
        scope: Option<BatchId>,
    ) -> Result<ReconcileReport>;

    /// Intent rows still awaiting an outcome, oldest first.
    async fn unresolved(&self) -> Result<Vec<OrderRecord>>;

    /// Rows written for one batch, in insertion order.
    async fn batch(&self, batch_id: BatchId) -> Result<Vec<OrderRecord>>;

    /// Load a single row.
    async fn find(&self, id: RecordId) -> Result<Option<OrderRecord>>;
}
