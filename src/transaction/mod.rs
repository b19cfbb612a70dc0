//! Transaction management for the wallet application.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Database functions for storing, querying, and managing transactions
//! - View handlers for the transaction pages and fragments

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod form;
mod sheet;

pub use create::{TransactionForm, create_transaction_endpoint, get_new_transaction_page};
pub use db::{
    count_transactions, create_transaction, create_transaction_table, delete_transaction,
    get_all_transactions, get_transaction, map_transaction_row, update_transaction,
};
pub use delete::delete_transaction_endpoint;
pub use domain::{Transaction, TransactionBuilder, TransactionId, TransactionKind};
pub use edit::{get_edit_transaction_page, update_transaction_endpoint};
pub use sheet::{dismiss_transaction_sheet, get_transaction_sheet};
