//! SQLite order ledger implementation.
//!
//! Persists the pre-submission intent and post-acknowledgment outcome of
//! every order using SQLite and Diesel ORM. Amounts are stored as
//! normalized decimal text so `25`, `25.0` and `25.00` share one match key.
//! Writes use `BEGIN IMMEDIATE` so concurrent sessions queue on the write
//! lock instead of failing on upgrade.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use super::database::connection::{configure_sqlite_connection, DbPool};
use super::database::model::{NewOrderRow, OrderRow};
use super::database::schema::orders;
use crate::domain::{
    Acknowledgment, BatchId, ClientId, ConfirmationMatch, ExecutionCode, InstructId, LoanId,
    OrderConfirmation, OrderRecord, PortfolioId, RecordId, ReconcileReport,
};
use crate::error::{LedgerError, Result};
use crate::port::{OrderLedger, OrderRequest};

type Conn = PooledConnection<ConnectionManager<SqliteConnection>>;

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    id: i64,
}

/// Canonical text form of an amount used for storage and matching.
fn amount_key(amount: Decimal) -> String {
    amount.normalize().to_string()
}

fn parse_timestamp(raw: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|ts| ts.with_timezone(&Utc))
}

/// SQLite-backed order ledger.
///
/// Implements the [`OrderLedger`] trait. Each operation checks out one
/// pooled connection and runs inside a single transaction.
pub struct SqliteOrderLedger {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteOrderLedger {
    /// Create a new ledger with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn connection(&self) -> std::result::Result<Conn, LedgerError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| LedgerError::Pool(e.to_string()))?;
        if let Err(e) = configure_sqlite_connection(&mut conn) {
            warn!(error = %e, "Failed to configure SQLite connection");
        }
        Ok(conn)
    }

    fn insert_intent(
        &self,
        batch_id: BatchId,
        client_id: &ClientId,
        requests: &[OrderRequest],
    ) -> std::result::Result<Vec<RecordId>, LedgerError> {
        let created_at = Utc::now().to_rfc3339();
        let rows: Vec<NewOrderRow<'_>> = requests
            .iter()
            .map(|request| NewOrderRow {
                batch_id: batch_id.to_string(),
                loan_id: request.loan_id.get(),
                client_id: client_id.as_str(),
                requested_amount: amount_key(request.requested_amount),
                portfolio_id: request.portfolio_id.map(PortfolioId::get),
                created_at: created_at.clone(),
            })
            .collect();

        let mut conn = self.connection()?;
        conn.immediate_transaction::<_, LedgerError, _>(|conn| {
            let mut ids = Vec::with_capacity(rows.len());
            for row in &rows {
                diesel::insert_into(orders::table)
                    .values(row)
                    .execute(conn)?;

                let id = diesel::sql_query("SELECT last_insert_rowid() AS id")
                    .get_result::<LastInsertRowId>(conn)?
                    .id;
                ids.push(RecordId::new(id));
            }
            Ok(ids)
        })
    }

    fn apply_outcome(
        &self,
        instruct_id: &InstructId,
        decoded: &[(&OrderConfirmation, ExecutionCode)],
        scope: Option<BatchId>,
    ) -> std::result::Result<Vec<ConfirmationMatch>, LedgerError> {
        let acknowledged_at = Utc::now().to_rfc3339();
        let scope = scope.map(|batch| batch.to_string());

        let mut conn = self.connection()?;
        conn.immediate_transaction::<_, LedgerError, _>(|conn| {
            let mut matches = Vec::with_capacity(decoded.len());
            for (confirmation, code) in decoded {
                let requested = amount_key(confirmation.requested_amount);

                let mut query = orders::table
                    .select(orders::id)
                    .filter(orders::loan_id.eq(confirmation.loan_id.get()))
                    .filter(orders::requested_amount.eq(requested.as_str()))
                    .filter(orders::execution_code.is_null())
                    .into_boxed();
                if let Some(batch) = scope.as_deref() {
                    query = query.filter(orders::batch_id.eq(batch));
                }
                let target: Option<i64> = query
                    .order(orders::id.desc())
                    .first(conn)
                    .optional()?;

                // The IS NULL guard is repeated on the update so a row can
                // only ever be resolved once.
                let rows_affected = match target {
                    Some(id) => diesel::update(
                        orders::table
                            .filter(orders::id.eq(id))
                            .filter(orders::execution_code.is_null()),
                    )
                    .set((
                        orders::invested_amount.eq(amount_key(confirmation.invested_amount)),
                        orders::ex_order_id.eq(instruct_id.as_str()),
                        orders::time_acknowledged.eq(acknowledged_at.as_str()),
                        orders::execution_code.eq(code.bits() as i32),
                    ))
                    .execute(conn)?,
                    None => 0,
                };

                matches.push(ConfirmationMatch {
                    loan_id: confirmation.loan_id,
                    requested_amount: confirmation.requested_amount,
                    execution_code: *code,
                    record_id: target.filter(|_| rows_affected > 0).map(RecordId::new),
                    rows_affected,
                });
            }
            Ok(matches)
        })
    }

    fn from_row(row: OrderRow) -> std::result::Result<OrderRecord, LedgerError> {
        let id = row.id;
        let corrupt = |reason: String| LedgerError::Corrupt { id, reason };

        Ok(OrderRecord {
            id: RecordId::new(row.id),
            batch_id: row
                .batch_id
                .parse::<BatchId>()
                .map_err(|e| corrupt(e.to_string()))?,
            loan_id: LoanId::try_new(row.loan_id).map_err(|e| corrupt(e.to_string()))?,
            client_id: ClientId::try_new(row.client_id).map_err(|e| corrupt(e.to_string()))?,
            requested_amount: Decimal::from_str(&row.requested_amount)
                .map_err(|e| corrupt(e.to_string()))?,
            portfolio_id: row
                .portfolio_id
                .map(PortfolioId::try_new)
                .transpose()
                .map_err(|e| corrupt(e.to_string()))?,
            invested_amount: row
                .invested_amount
                .as_deref()
                .map(Decimal::from_str)
                .transpose()
                .map_err(|e| corrupt(e.to_string()))?,
            external_order_id: row.ex_order_id.map(InstructId::from),
            acknowledged_at: row
                .time_acknowledged
                .as_deref()
                .map(parse_timestamp)
                .transpose()
                .map_err(|e| corrupt(e.to_string()))?,
            execution_code: row
                .execution_code
                .map(|bits| u32::try_from(bits).map(ExecutionCode::from_bits))
                .transpose()
                .map_err(|e| corrupt(e.to_string()))?,
            created_at: parse_timestamp(&row.created_at).map_err(|e| corrupt(e.to_string()))?,
        })
    }

    fn load_rows(rows: Vec<OrderRow>) -> std::result::Result<Vec<OrderRecord>, LedgerError> {
        rows.into_iter().map(Self::from_row).collect()
    }
}

#[async_trait]
impl OrderLedger for SqliteOrderLedger {
    async fn record_intent(
        &self,
        batch_id: BatchId,
        client_id: &ClientId,
        orders: &[OrderRequest],
    ) -> Result<Vec<RecordId>> {
        let ids = self.insert_intent(batch_id, client_id, orders)?;
        debug!(batch_id = %batch_id, rows = ids.len(), "Recorded order intent");
        Ok(ids)
    }

    async fn record_outcome(
        &self,
        ack: &Acknowledgment,
        scope: Option<BatchId>,
    ) -> Result<ReconcileReport> {
        let decoded = ack
            .confirmations
            .iter()
            .map(|confirmation| confirmation.execution_code().map(|code| (confirmation, code)))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| {
                error!(
                    instruct_id = %ack.instruct_id,
                    error = %e,
                    "Acknowledgment not recorded: undecodable execution status"
                );
                e
            })?;

        let matches = self.apply_outcome(&ack.instruct_id, &decoded, scope)?;
        let report = ReconcileReport {
            instruct_id: ack.instruct_id.clone(),
            matches,
        };

        for unmatched in report.unmatched() {
            warn!(
                instruct_id = %report.instruct_id,
                loan_id = %unmatched.loan_id,
                requested_amount = %unmatched.requested_amount,
                "Confirmation matched no unresolved intent row"
            );
        }
        info!(
            instruct_id = %report.instruct_id,
            confirmations = report.matches.len(),
            resolved = report.resolved(),
            "Recorded order outcome"
        );

        Ok(report)
    }

    async fn unresolved(&self) -> Result<Vec<OrderRecord>> {
        let mut conn = self.connection()?;
        let rows: Vec<OrderRow> = orders::table
            .filter(orders::execution_code.is_null())
            .order(orders::id.asc())
            .select(OrderRow::as_select())
            .load(&mut conn)
            .map_err(LedgerError::from)?;
        Ok(Self::load_rows(rows)?)
    }

    async fn batch(&self, batch_id: BatchId) -> Result<Vec<OrderRecord>> {
        let mut conn = self.connection()?;
        let rows: Vec<OrderRow> = orders::table
            .filter(orders::batch_id.eq(batch_id.to_string()))
            .order(orders::id.asc())
            .select(OrderRow::as_select())
            .load(&mut conn)
            .map_err(LedgerError::from)?;
        Ok(Self::load_rows(rows)?)
    }

    async fn find(&self, id: RecordId) -> Result<Option<OrderRecord>> {
        let mut conn = self.connection()?;
        let row: Option<OrderRow> = orders::table
            .find(id.get())
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(LedgerError::from)?;
        Ok(row.map(Self::from_row).transpose()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::database::connection::{
        create_pool_with_size, run_migrations,
    };
    use crate::domain::ExecutionStatus;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    fn setup_ledger() -> (SqliteOrderLedger, DbPool) {
        let pool = create_pool_with_size(":memory:", 1).unwrap();
        run_migrations(&pool).unwrap();
        (SqliteOrderLedger::new(pool.clone()), pool)
    }

    fn request(loan: i64, amount: Decimal) -> OrderRequest {
        OrderRequest {
            loan_id: LoanId::try_new(loan).unwrap(),
            requested_amount: amount,
            portfolio_id: None,
        }
    }

    fn confirmation(loan: i64, amount: Decimal, statuses: &[&str]) -> OrderConfirmation {
        OrderConfirmation {
            loan_id: LoanId::try_new(loan).unwrap(),
            requested_amount: amount,
            invested_amount: amount,
            execution_status: statuses.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn client() -> ClientId {
        ClientId::try_new("desk-1").unwrap()
    }

    fn execute_sql(pool: &DbPool, sql: &str) {
        let mut conn = pool.get().unwrap();
        diesel::sql_query(sql).execute(&mut conn).unwrap();
    }

    #[tokio::test]
    async fn record_intent_inserts_unresolved_rows_in_order() {
        let (ledger, _pool) = setup_ledger();
        let batch = BatchId::generate();

        let ids = ledger
            .record_intent(
                batch,
                &client(),
                &[request(1, dec!(25)), request(2, dec!(50))],
            )
            .await
            .unwrap();

        assert_eq!(ids.len(), 2);
        assert!(ids[0] < ids[1]);

        let rows = ledger.batch(batch).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].loan_id.get(), 1);
        assert_eq!(rows[1].requested_amount, dec!(50));
        for row in &rows {
            assert!(!row.is_resolved());
            assert!(row.invested_amount.is_none());
            assert!(row.external_order_id.is_none());
            assert!(row.acknowledged_at.is_none());
            assert_eq!(row.client_id.as_str(), "desk-1");
        }
    }

    #[tokio::test]
    async fn record_intent_is_batch_atomic() {
        let (ledger, pool) = setup_ledger();
        execute_sql(
            &pool,
            "CREATE TRIGGER reject_loan BEFORE INSERT ON orders \
             WHEN NEW.loan_id = 999 BEGIN SELECT RAISE(ABORT, 'rejected'); END",
        );

        let result = ledger
            .record_intent(
                BatchId::generate(),
                &client(),
                &[request(1, dec!(25)), request(999, dec!(25))],
            )
            .await;

        assert!(matches!(result, Err(Error::Ledger(_))));
        assert!(ledger.unresolved().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn record_outcome_fills_matching_row() {
        let (ledger, _pool) = setup_ledger();
        let batch = BatchId::generate();
        let ids = ledger
            .record_intent(batch, &client(), &[request(12345, dec!(25.0))])
            .await
            .unwrap();

        let ack = Acknowledgment::new(
            "X1",
            vec![confirmation(12345, dec!(25.0), &["ORDER_FULFILLED"])],
        );
        let report = ledger.record_outcome(&ack, Some(batch)).await.unwrap();

        assert_eq!(report.resolved(), 1);
        assert_eq!(report.matches[0].record_id, Some(ids[0]));

        let row = ledger.find(ids[0]).await.unwrap().unwrap();
        assert_eq!(row.invested_amount, Some(dec!(25)));
        assert_eq!(row.external_order_id, Some(InstructId::from("X1")));
        assert_eq!(row.execution_code, Some(ExecutionCode::from_bits(1)));
        assert!(row.acknowledged_at.is_some());
    }

    #[tokio::test]
    async fn redelivered_acknowledgment_matches_zero_rows() {
        let (ledger, _pool) = setup_ledger();
        let batch = BatchId::generate();
        ledger
            .record_intent(batch, &client(), &[request(7, dec!(25))])
            .await
            .unwrap();
        let ack = Acknowledgment::new("X1", vec![confirmation(7, dec!(25), &["ORDER_FULFILLED"])]);

        let first = ledger.record_outcome(&ack, None).await.unwrap();
        let second = ledger.record_outcome(&ack, None).await.unwrap();

        assert_eq!(first.resolved(), 1);
        assert_eq!(second.resolved(), 0);
        assert_eq!(second.unmatched().count(), 1);
    }

    #[tokio::test]
    async fn amounts_match_regardless_of_scale() {
        let (ledger, _pool) = setup_ledger();
        ledger
            .record_intent(BatchId::generate(), &client(), &[request(3, dec!(25.00))])
            .await
            .unwrap();

        let ack = Acknowledgment::new("X2", vec![confirmation(3, dec!(25), &["ORDER_FULFILLED"])]);
        let report = ledger.record_outcome(&ack, None).await.unwrap();

        assert_eq!(report.resolved(), 1);
    }

    #[tokio::test]
    async fn unknown_status_aborts_whole_acknowledgment() {
        let (ledger, _pool) = setup_ledger();
        ledger
            .record_intent(
                BatchId::generate(),
                &client(),
                &[request(1, dec!(25)), request(2, dec!(25))],
            )
            .await
            .unwrap();

        let ack = Acknowledgment::new(
            "X3",
            vec![
                confirmation(1, dec!(25), &["ORDER_FULFILLED"]),
                confirmation(2, dec!(25), &["NOT_A_REAL_STATUS"]),
            ],
        );
        let result = ledger.record_outcome(&ack, None).await;

        assert!(matches!(result, Err(Error::Decode(_))));
        assert_eq!(ledger.unresolved().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn record_outcome_is_batch_atomic() {
        let (ledger, pool) = setup_ledger();
        ledger
            .record_intent(
                BatchId::generate(),
                &client(),
                &[request(1, dec!(25)), request(999, dec!(25))],
            )
            .await
            .unwrap();
        execute_sql(
            &pool,
            "CREATE TRIGGER reject_update BEFORE UPDATE ON orders \
             WHEN NEW.loan_id = 999 BEGIN SELECT RAISE(ABORT, 'rejected'); END",
        );

        let ack = Acknowledgment::new(
            "X4",
            vec![
                confirmation(1, dec!(25), &["ORDER_FULFILLED"]),
                confirmation(999, dec!(25), &["ORDER_FULFILLED"]),
            ],
        );
        let result = ledger.record_outcome(&ack, None).await;

        assert!(matches!(result, Err(Error::Ledger(_))));
        assert_eq!(ledger.unresolved().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn scoped_outcome_only_touches_its_batch() {
        let (ledger, _pool) = setup_ledger();
        let first = BatchId::generate();
        let second = BatchId::generate();
        let first_ids = ledger
            .record_intent(first, &client(), &[request(5, dec!(25))])
            .await
            .unwrap();
        let second_ids = ledger
            .record_intent(second, &client(), &[request(5, dec!(25))])
            .await
            .unwrap();

        let ack = Acknowledgment::new("X5", vec![confirmation(5, dec!(25), &["ORDER_FULFILLED"])]);
        let report = ledger.record_outcome(&ack, Some(first)).await.unwrap();

        assert_eq!(report.matches[0].record_id, Some(first_ids[0]));
        let untouched = ledger.find(second_ids[0]).await.unwrap().unwrap();
        assert!(!untouched.is_resolved());
    }

    #[tokio::test]
    async fn unscoped_outcome_resolves_most_recent_row() {
        let (ledger, _pool) = setup_ledger();
        let older = ledger
            .record_intent(BatchId::generate(), &client(), &[request(6, dec!(25))])
            .await
            .unwrap();
        let newer = ledger
            .record_intent(BatchId::generate(), &client(), &[request(6, dec!(25))])
            .await
            .unwrap();

        let ack = Acknowledgment::new("X6", vec![confirmation(6, dec!(25), &["ORDER_FULFILLED"])]);
        let report = ledger.record_outcome(&ack, None).await.unwrap();

        assert_eq!(report.matches[0].record_id, Some(newer[0]));
        assert!(!ledger.find(older[0]).await.unwrap().unwrap().is_resolved());
    }

    #[tokio::test]
    async fn duplicate_pairs_in_one_batch_resolve_one_row_each() {
        let (ledger, _pool) = setup_ledger();
        let batch = BatchId::generate();
        ledger
            .record_intent(batch, &client(), &[request(8, dec!(25)), request(8, dec!(25))])
            .await
            .unwrap();

        let ack = Acknowledgment::new(
            "X7",
            vec![
                confirmation(8, dec!(25), &["ORDER_FULFILLED"]),
                confirmation(8, dec!(25), &["LOAN_AMNT_EXCEEDED"]),
            ],
        );
        let report = ledger.record_outcome(&ack, Some(batch)).await.unwrap();

        assert_eq!(report.resolved(), 2);
        assert!(ledger.unresolved().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn multi_flag_code_is_persisted() {
        let (ledger, _pool) = setup_ledger();
        let ids = ledger
            .record_intent(BatchId::generate(), &client(), &[request(9, dec!(30))])
            .await
            .unwrap();
        let ack = Acknowledgment::new(
            "X8",
            vec![confirmation(
                9,
                dec!(30),
                &["ORDER_FULFILLED", "REQUESTED_AMNT_ROUNDED"],
            )],
        );
        ledger.record_outcome(&ack, None).await.unwrap();

        let row = ledger.find(ids[0]).await.unwrap().unwrap();
        let code = row.execution_code.unwrap();
        assert_eq!(code.bits(), 17);
        assert!(code.contains(ExecutionStatus::RequestedAmountRounded));
    }

    #[tokio::test]
    async fn row_ids_beyond_32_bits_round_trip() {
        let (ledger, pool) = setup_ledger();
        execute_sql(
            &pool,
            "INSERT INTO orders (id, batch_id, loan_id, client_id, requested_amount, created_at) \
             VALUES (3000000000, 'seed', 1, 'seed', '1', '2026-01-01T00:00:00Z')",
        );
        let batch = BatchId::generate();

        let ids = ledger
            .record_intent(batch, &client(), &[request(7, dec!(25))])
            .await
            .unwrap();
        assert_eq!(ids[0].get(), 3_000_000_001);

        let ack = Acknowledgment::new(
            "X64",
            vec![confirmation(7, dec!(25), &["ORDER_FULFILLED"])],
        );
        let report = ledger.record_outcome(&ack, Some(batch)).await.unwrap();
        assert_eq!(report.matches[0].record_id, Some(ids[0]));

        let row = ledger.find(ids[0]).await.unwrap().unwrap();
        assert!(row.is_resolved());
    }

    #[tokio::test]
    async fn find_missing_row_returns_none() {
        let (ledger, _pool) = setup_ledger();
        assert!(ledger.find(RecordId::new(42)).await.unwrap().is_none());
    }
}
