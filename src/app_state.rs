//! Implements a struct that holds the state of the web server.

use rusqlite::Connection;

use crate::{Error, db::initialize, repository::FinanceRepository, timezone::get_local_offset};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The data facade shared by all request handlers.
    pub repository: FinanceRepository,

    /// The local timezone as a canonical timezone name, e.g. "Asia/Jakarta".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function initializes the database (tables, schema version and
    /// starter categories) and takes the initial snapshots. `local_timezone`
    /// should be a valid, canonical timezone name, e.g. "Asia/Jakarta".
    ///
    /// # Errors
    /// Returns an error if `local_timezone` is not a known timezone or if the
    /// database cannot be initialized.
    pub fn new(db_connection: Connection, local_timezone: &str) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        initialize(&db_connection)?;

        Ok(Self {
            repository: FinanceRepository::new(db_connection)?,
            local_timezone: local_timezone.to_owned(),
        })
    }
}

#[cfg(test)]
mod app_state_tests {
    use rusqlite::Connection;

    use crate::Error;

    use super::AppState;

    #[test]
    fn new_prepares_database_and_snapshots() {
        let connection = Connection::open_in_memory().unwrap();

        let state = AppState::new(connection, "Asia/Jakarta").unwrap();

        let categories = state.repository.categories().borrow().clone();
        assert!(
            !categories.is_empty(),
            "want the starter categories in the initial snapshot"
        );
    }

    #[test]
    fn new_rejects_unknown_timezone() {
        let connection = Connection::open_in_memory().unwrap();

        let got = AppState::new(connection, "Not/AZone");

        assert_eq!(
            got.unwrap_err(),
            Error::InvalidTimezoneError("Not/AZone".to_owned())
        );
    }
}
