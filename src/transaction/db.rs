//! Database operations for transactions.
//!
//! Dates are stored as milliseconds since the Unix epoch, matching the
//! integer `date` column.

use rusqlite::{Connection, Row, params, types::Type};
use time::OffsetDateTime;

use crate::{
    Error,
    transaction::{Transaction, TransactionBuilder, TransactionId},
};

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCategory] if the specified category ID does not refer to a real category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (name, amount, date, description, category_id, kind)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, name, amount, date, description, category_id, kind",
        )?
        .query_row(
            (
                builder.name,
                builder.amount,
                to_epoch_ms(builder.date),
                builder.description,
                builder.category_id,
                builder.kind,
            ),
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidCategory(builder.category_id),
            error => error.into(),
        })?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, name, amount, date, description, category_id, kind
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Retrieve all transactions, newest first.
///
/// Rows sharing the same instant are ordered by descending id so the order
/// is deterministic.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, name, amount, date, description, category_id, kind
             FROM \"transaction\" ORDER BY date DESC, id DESC;",
        )?
        .query_map([], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Overwrite the stored row for `transaction.id` with the given fields.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingTransaction] if the id does not refer to a stored transaction,
/// - [Error::InvalidCategory] if the category ID does not refer to a real category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(transaction: &Transaction, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection
        .execute(
            "UPDATE \"transaction\"
             SET name = ?2, amount = ?3, date = ?4, description = ?5, category_id = ?6, kind = ?7
             WHERE id = ?1;",
            params![
                transaction.id,
                transaction.name,
                transaction.amount,
                to_epoch_ms(transaction.date),
                transaction.description,
                transaction.category_id,
                transaction.kind,
            ],
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidCategory(transaction.category_id),
            error => error.into(),
        })?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingTransaction);
    }

    Ok(())
}

/// Delete a transaction by ID and return the number of rows removed.
pub fn delete_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<usize, Error> {
    connection
        .execute("DELETE FROM \"transaction\" WHERE id = ?1", [id])
        .map_err(|error| error.into())
}

/// Get the total number of transactions in the database.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                amount REAL NOT NULL,
                date INTEGER NOT NULL,
                description TEXT,
                category_id INTEGER,
                kind TEXT NOT NULL,
                FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE SET NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    // Index used by the date-ordered feed query.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// An epoch-ms value outside the range of [OffsetDateTime] surfaces as a
/// column conversion error rather than a panic.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let name = row.get(1)?;
    let amount = row.get(2)?;
    let date_ms: i64 = row.get(3)?;
    let date = OffsetDateTime::from_unix_timestamp_nanos(date_ms as i128 * 1_000_000)
        .map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(3, Type::Integer, Box::new(error))
        })?;
    let description = row.get(4)?;
    let category_id = row.get(5)?;
    let kind = row.get(6)?;

    Ok(Transaction {
        id,
        name,
        amount,
        date,
        description,
        category_id,
        kind,
    })
}

fn to_epoch_ms(date: OffsetDateTime) -> i64 {
    (date.unix_timestamp_nanos() / 1_000_000) as i64
}
