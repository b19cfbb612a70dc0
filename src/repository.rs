//! The reactive data facade between the database and the web handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;
use tokio::sync::watch;

use crate::{
    Error,
    category::{
        Category, CategoryBuilder, CategoryId, delete_category, get_all_categories,
        upsert_category,
    },
    transaction::{
        Transaction, TransactionBuilder, TransactionId, create_transaction, delete_transaction,
        get_all_transactions, get_transaction, update_transaction,
    },
};

/// The single data facade the web handlers read from and write through.
///
/// Each entity is published on a [watch](tokio::sync::watch) channel carrying
/// the full current snapshot. Every write refreshes the affected snapshots
/// before returning, so once a write call resolves, subscribed receivers
/// observe the new state.
///
/// Cloning is cheap: clones share the underlying connection and channels.
#[derive(Debug, Clone)]
pub struct FinanceRepository {
    connection: Arc<Mutex<Connection>>,
    transactions: watch::Sender<Vec<Transaction>>,
    categories: watch::Sender<Vec<Category>>,
}

impl FinanceRepository {
    /// Wrap `connection` and take the initial snapshots.
    ///
    /// The connection must already hold the application schema, see
    /// [initialize](crate::db::initialize).
    ///
    /// # Errors
    /// Returns an error if the initial snapshots cannot be read.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        let transactions = get_all_transactions(&connection)?;
        let categories = get_all_categories(&connection)?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
            transactions: watch::Sender::new(transactions),
            categories: watch::Sender::new(categories),
        })
    }

    /// Subscribe to the transaction snapshot, ordered newest first.
    pub fn transactions(&self) -> watch::Receiver<Vec<Transaction>> {
        self.transactions.subscribe()
    }

    /// Subscribe to the category snapshot, ordered by id.
    pub fn categories(&self) -> watch::Receiver<Vec<Category>> {
        self.categories.subscribe()
    }

    /// Store a new transaction and publish the updated snapshot.
    ///
    /// # Errors
    /// Returns an error if the builder references a missing category or if
    /// there is an SQL error.
    pub async fn add_transaction(&self, builder: TransactionBuilder) -> Result<(), Error> {
        let connection = self.lock_connection()?;
        create_transaction(builder, &connection)?;

        self.refresh_transactions(&connection)
    }

    /// Insert or replace a category and publish the updated snapshot.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    pub async fn add_category(&self, builder: CategoryBuilder) -> Result<(), Error> {
        let connection = self.lock_connection()?;
        upsert_category(builder, &connection)?;

        self.refresh_categories(&connection)
    }

    /// Replace a stored transaction and publish the updated snapshot.
    ///
    /// # Errors
    /// Returns [Error::UpdateMissingTransaction] if the id does not refer to
    /// a stored transaction.
    pub async fn update_transaction(&self, transaction: Transaction) -> Result<(), Error> {
        let connection = self.lock_connection()?;
        update_transaction(&transaction, &connection)?;

        self.refresh_transactions(&connection)
    }

    /// Delete a transaction and publish the updated snapshot.
    ///
    /// # Errors
    /// Returns [Error::DeleteMissingTransaction] if the id does not refer to
    /// a stored transaction.
    pub async fn delete_transaction(&self, id: TransactionId) -> Result<(), Error> {
        let connection = self.lock_connection()?;
        let rows_affected = delete_transaction(id, &connection)?;

        if rows_affected == 0 {
            return Err(Error::DeleteMissingTransaction);
        }

        self.refresh_transactions(&connection)
    }

    /// Delete a category and publish the updated snapshots.
    ///
    /// Transactions referencing the category get their reference cleared by
    /// the foreign key action, so both snapshots are republished.
    ///
    /// # Errors
    /// Returns [Error::DeleteMissingCategory] if the id does not refer to a
    /// stored category.
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), Error> {
        let connection = self.lock_connection()?;
        let rows_affected = delete_category(id, &connection)?;

        if rows_affected == 0 {
            return Err(Error::DeleteMissingCategory);
        }

        self.refresh_categories(&connection)?;
        self.refresh_transactions(&connection)
    }

    /// Fetch a single transaction by its id.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the id does not refer to a stored
    /// transaction.
    pub fn get_transaction(&self, id: TransactionId) -> Result<Transaction, Error> {
        let connection = self.lock_connection()?;

        get_transaction(id, &connection)
    }

    fn lock_connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("Could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }

    fn refresh_transactions(&self, connection: &Connection) -> Result<(), Error> {
        let transactions = get_all_transactions(connection)?;
        self.transactions.send_replace(transactions);

        Ok(())
    }

    fn refresh_categories(&self, connection: &Connection) -> Result<(), Error> {
        let categories = get_all_categories(connection)?;
        self.categories.send_replace(categories);

        Ok(())
    }
}
