/*! Database initialization, schema versioning and seeding. */

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error,
    category::{Category, CategoryKind, create_category_table, upsert_category},
    transaction::create_transaction_table,
};

/// The schema version stamped into `PRAGMA user_version`.
const SCHEMA_VERSION: i64 = 1;

/// Create the application tables and, on a fresh database, seed the starter
/// categories.
///
/// Runs inside an exclusive transaction so that two processes opening the
/// same database file cannot both seed it. Re-running against an already
/// initialized database changes nothing.
///
/// # Errors
/// Returns an error if the database was written by an unknown schema version,
/// or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    let version: i64 = transaction.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    match version {
        0 => {
            create_category_table(&transaction)?;
            create_transaction_table(&transaction)?;
            seed_categories(&transaction)?;
            transaction.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        }
        SCHEMA_VERSION => {
            create_category_table(&transaction)?;
            create_transaction_table(&transaction)?;
        }
        version => return Err(Error::UnsupportedSchemaVersion(version)),
    }

    transaction.commit()?;

    Ok(())
}

/// Insert the categories a fresh wallet starts with.
///
/// Only called for a version 0 database, so categories the user later renames
/// or deletes are never brought back.
fn seed_categories(connection: &Connection) -> Result<(), Error> {
    let starter_categories = [
        ("Food & Drink", CategoryKind::Expense),
        ("Shopping", CategoryKind::Expense),
        ("Entertainment", CategoryKind::Expense),
        ("Savings", CategoryKind::Income),
    ];

    for (name, kind) in starter_categories {
        upsert_category(Category::build(name, kind), connection)?;
    }

    Ok(())
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        category::{CategoryKind, count_categories, delete_category, get_all_categories},
    };

    use super::initialize;

    #[test]
    fn fresh_database_gets_starter_categories() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();

        let categories = get_all_categories(&connection).unwrap();
        let got = categories
            .iter()
            .map(|category| (category.name.as_str(), category.kind))
            .collect::<Vec<_>>();
        assert_eq!(
            got,
            vec![
                ("Food & Drink", CategoryKind::Expense),
                ("Shopping", CategoryKind::Expense),
                ("Entertainment", CategoryKind::Expense),
                ("Savings", CategoryKind::Income),
            ]
        );
    }

    #[test]
    fn initialize_twice_seeds_once() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();
        initialize(&connection).unwrap();

        assert_eq!(count_categories(&connection), Ok(4));
    }

    #[test]
    fn deleted_seed_category_stays_deleted() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let savings = get_all_categories(&connection)
            .unwrap()
            .into_iter()
            .find(|category| category.name == "Savings")
            .expect("seed category missing");
        delete_category(savings.id, &connection).unwrap();

        initialize(&connection).unwrap();

        let names = get_all_categories(&connection)
            .unwrap()
            .into_iter()
            .map(|category| category.name)
            .collect::<Vec<_>>();
        assert!(
            !names.contains(&"Savings".to_owned()),
            "want the deleted seed category to stay deleted, got {names:?}"
        );
    }

    #[test]
    fn unknown_schema_version_is_rejected() {
        let connection = Connection::open_in_memory().unwrap();
        connection.pragma_update(None, "user_version", 99).unwrap();

        let result = initialize(&connection);

        assert_eq!(result, Err(Error::UnsupportedSchemaVersion(99)));
    }
}
