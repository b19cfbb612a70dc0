//! Database operations for categories.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryBuilder, CategoryId},
};

/// Insert a category, or replace the row in place when the builder carries
/// an id that already exists.
///
/// The replace is last-writer-wins: the existing row keeps its id and gets
/// the builder's name and kind, so transactions referencing the id are left
/// untouched. A builder without an id lets the database assign one.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn upsert_category(
    builder: CategoryBuilder,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare(
            "INSERT INTO category (id, name, kind)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name, kind = excluded.kind
             RETURNING id, name, kind",
        )?
        .query_row((builder.id, builder.name, builder.kind), map_category_row)
        .map_err(|error| error.into())
}

/// Retrieve a single category by ID.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `category_id` does not refer to a valid category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, kind FROM category WHERE id = :id;")?
        .query_row(&[(":id", &category_id)], map_category_row)
        .map_err(|error| error.into())
}

/// Retrieve all categories in insertion (id) order.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name, kind FROM category ORDER BY id ASC;")?
        .query_map([], map_category_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Delete a category by ID and return the number of rows removed.
///
/// Transactions referencing the category are kept and get their
/// `category_id` cleared by the foreign key action.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<usize, Error> {
    connection
        .execute("DELETE FROM category WHERE id = ?1", [category_id])
        .map_err(|error| error.into())
}

/// Get the total number of categories in the database.
pub fn count_categories(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM category;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the category table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            kind TEXT NOT NULL
        );",
    )?;

    Ok(())
}

fn map_category_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let name = row.get(1)?;
    let kind = row.get(2)?;

    Ok(Category { id, name, kind })
}
