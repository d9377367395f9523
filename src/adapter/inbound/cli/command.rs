//! Command-line interface definitions.
//!
//! Defines the CLI structure for the noteorder binary using `clap`.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use crate::domain::{DomainError, LoanId, Order, PortfolioId};

/// Risk-gated order submission for fractional loan notes
#[derive(Parser, Debug)]
#[command(name = "noteorder")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file [default: config.toml when present]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Gate, log, submit and reconcile one batch of orders
    Submit(SubmitArgs),

    /// List intent rows still awaiting an outcome
    Pending,

    /// Apply a saved marketplace acknowledgment to the ledger
    Reconcile(ReconcileArgs),

    /// Create or update the ledger schema
    Migrate,

    /// Combine execution status names into a numeric code
    Decode(DecodeArgs),
}

/// Arguments for `noteorder submit`.
///
/// Either a single `--loan`/`--amount` pair or one or more `--order`
/// specs; both forms may be combined, single order first.
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Investor account id
    #[arg(long)]
    pub investor: i64,

    /// Client id recorded on every intent row
    #[arg(long)]
    pub client: String,

    /// Loan id of a single order
    #[arg(long, requires = "amount")]
    pub loan: Option<i64>,

    /// Amount of a single order
    #[arg(long, requires = "loan")]
    pub amount: Option<Decimal>,

    /// Portfolio for a single order
    #[arg(long, requires = "loan")]
    pub portfolio: Option<i64>,

    /// Batch order as LOAN:AMOUNT[:PORTFOLIO] (repeatable)
    #[arg(long = "order", value_name = "LOAN:AMOUNT[:PORTFOLIO]")]
    pub orders: Vec<OrderSpec>,
}

impl SubmitArgs {
    /// Collect the orders named on the command line, in order.
    ///
    /// # Errors
    /// Returns the [`DomainError`] of the first invalid order.
    pub fn orders(&self) -> Result<Vec<Order>, DomainError> {
        let mut orders = Vec::with_capacity(self.orders.len() + 1);
        if let (Some(loan), Some(amount)) = (self.loan, self.amount) {
            orders.push(
                OrderSpec {
                    loan,
                    amount,
                    portfolio: self.portfolio,
                }
                .to_order()?,
            );
        }
        for spec in &self.orders {
            orders.push(spec.to_order()?);
        }
        Ok(orders)
    }
}

/// One `--order` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
    pub loan: i64,
    pub amount: Decimal,
    pub portfolio: Option<i64>,
}

impl OrderSpec {
    fn to_order(&self) -> Result<Order, DomainError> {
        let loan = LoanId::try_new(self.loan)?;
        let portfolio = self.portfolio.map(PortfolioId::try_new).transpose()?;
        Order::try_new(loan, self.amount, portfolio)
    }
}

impl FromStr for OrderSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let (Some(loan), Some(amount)) = (parts.next(), parts.next()) else {
            return Err(format!("expected LOAN:AMOUNT[:PORTFOLIO], got '{s}'"));
        };
        let portfolio = parts.next();
        if parts.next().is_some() {
            return Err(format!("too many fields in '{s}'"));
        }

        Ok(Self {
            loan: loan
                .trim()
                .parse()
                .map_err(|_| format!("invalid loan id '{loan}'"))?,
            amount: Decimal::from_str(amount.trim())
                .map_err(|_| format!("invalid amount '{amount}'"))?,
            portfolio: portfolio
                .map(|p| p.trim().parse().map_err(|_| format!("invalid portfolio id '{p}'")))
                .transpose()?,
        })
    }
}

/// Arguments for `noteorder reconcile`.
#[derive(Args, Debug)]
pub struct ReconcileArgs {
    /// Acknowledgment JSON as returned by the marketplace
    #[arg(short, long)]
    pub file: PathBuf,
}

/// Arguments for `noteorder decode`.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Execution status names, e.g. ORDER_FULFILLED
    #[arg(required = true)]
    pub statuses: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rust_decimal_macros::dec;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn order_spec_parses_with_and_without_portfolio() {
        assert_eq!(
            "12345:25".parse::<OrderSpec>().unwrap(),
            OrderSpec {
                loan: 12345,
                amount: dec!(25),
                portfolio: None
            }
        );
        assert_eq!("1:50.00:7".parse::<OrderSpec>().unwrap().portfolio, Some(7));
    }

    #[test]
    fn order_spec_rejects_garbage() {
        assert!("12345".parse::<OrderSpec>().is_err());
        assert!("a:25".parse::<OrderSpec>().is_err());
        assert!("1:x".parse::<OrderSpec>().is_err());
        assert!("1:2:3:4".parse::<OrderSpec>().is_err());
    }

    #[test]
    fn submit_collects_single_and_batch_orders() {
        let cli = Cli::parse_from([
            "noteorder", "submit", "--investor", "9", "--client", "desk", "--loan", "1",
            "--amount", "25", "--order", "2:50", "--order", "3:75:4",
        ]);
        let Commands::Submit(args) = cli.command else {
            panic!("expected submit");
        };
        let orders = args.orders().unwrap();
        assert_eq!(orders.len(), 3);
        assert_eq!(orders[0].loan_id().get(), 1);
        assert_eq!(orders[2].portfolio_id().map(PortfolioId::get), Some(4));
    }

    #[test]
    fn non_positive_amount_is_reported() {
        let cli = Cli::parse_from([
            "noteorder", "submit", "--investor", "9", "--client", "desk", "--order", "2:0",
        ]);
        let Commands::Submit(args) = cli.command else {
            panic!("expected submit");
        };
        let err = args.orders().unwrap_err();
        assert!(matches!(err, DomainError::NonPositiveAmount { .. }));
        assert!(crate::error::Error::from(err).is_validation());
    }
}
