//! Core transaction domain types.

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::category::CategoryId;

/// Database identifier for a transaction.
pub type TransactionId = i64;

/// Whether a transaction records money earned or money spent.
///
/// Stored in the database as the text `INCOME` or `EXPENSE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Money coming in, e.g. a salary payment.
    Income,
    /// Money going out, e.g. a grocery run.
    Expense,
}

impl TransactionKind {
    /// The text stored in the database for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "INCOME",
            TransactionKind::Expense => "EXPENSE",
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "INCOME" => Ok(TransactionKind::Income),
            "EXPENSE" => Ok(TransactionKind::Expense),
            other => Err(FromSqlError::Other(
                format!("unknown transaction kind '{other}'").into(),
            )),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A short label for what the transaction was (e.g. 'Lunch').
    pub name: String,
    /// The amount of money spent or earned in this transaction.
    ///
    /// Amounts are taken as entered. Whether the money came in or went out
    /// is recorded by [Transaction::kind], not by the sign.
    pub amount: f64,
    /// When the transaction happened.
    ///
    /// Stored in the database as milliseconds since the Unix epoch.
    pub date: OffsetDateTime,
    /// Optional free text with more detail than the name.
    pub description: Option<String>,
    /// The ID of the category the transaction belongs to.
    ///
    /// Cleared, not cascaded, when the category is deleted.
    pub category_id: Option<CategoryId>,
    /// Whether this transaction is income or an expense.
    pub kind: TransactionKind,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        name: &str,
        amount: f64,
        date: OffsetDateTime,
        kind: TransactionKind,
    ) -> TransactionBuilder {
        TransactionBuilder {
            name: name.to_owned(),
            amount,
            date,
            description: None,
            category_id: None,
            kind,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The optional fields default to `None`. Pass the finished builder to
/// [crate::transaction::create_transaction] to insert the row and get back
/// the [Transaction] with its database-assigned id.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// A short label for what the transaction was.
    pub name: String,
    /// The amount of money spent or earned.
    pub amount: f64,
    /// When the transaction happened.
    pub date: OffsetDateTime,
    /// Optional free text with more detail than the name.
    pub description: Option<String>,
    /// The ID of the category the transaction belongs to, if any.
    pub category_id: Option<CategoryId>,
    /// Whether this transaction is income or an expense.
    pub kind: TransactionKind,
}

impl TransactionBuilder {
    /// Set the description for the transaction.
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Set the category id for the transaction.
    pub fn category_id(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }
}
