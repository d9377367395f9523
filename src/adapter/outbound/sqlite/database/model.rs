//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::orders;

/// Intent row written before submission (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = orders)]
pub struct NewOrderRow<'a> {
    pub batch_id: String,
    pub loan_id: i64,
    pub client_id: &'a str,
    pub requested_amount: String,
    pub portfolio_id: Option<i64>,
    pub created_at: String,
}

/// Database row for an order (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrderRow {
    pub id: i64,
    pub batch_id: String,
    pub loan_id: i64,
    pub client_id: String,
    pub requested_amount: String,
    pub portfolio_id: Option<i64>,
    pub invested_amount: Option<String>,
    pub ex_order_id: Option<String>,
    pub time_acknowledged: Option<String>,
    pub execution_code: Option<i32>,
    pub created_at: String,
}
