//! Core category domain types.

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

/// Database identifier for a category.
pub type CategoryId = i64;

/// Whether a category groups money spent or money earned.
///
/// Stored in the database as the text `EXPENSE` or `INCOME`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryKind {
    /// Groups money going out.
    Expense,
    /// Groups money coming in.
    Income,
}

impl CategoryKind {
    /// The text stored in the database for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKind::Expense => "EXPENSE",
            CategoryKind::Income => "INCOME",
        }
    }
}

impl ToSql for CategoryKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for CategoryKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "EXPENSE" => Ok(CategoryKind::Expense),
            "INCOME" => Ok(CategoryKind::Income),
            other => Err(FromSqlError::Other(
                format!("unknown category kind '{other}'").into(),
            )),
        }
    }
}

/// A category for grouping transactions (e.g., 'Food & Drink', 'Savings').
///
/// To create a new `Category`, use [Category::build].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The display name (e.g. 'Food & Drink').
    pub name: String,
    /// Whether this category groups income or expenses.
    pub kind: CategoryKind,
}

impl Category {
    /// Create a new category.
    ///
    /// Shortcut for [CategoryBuilder] for discoverability.
    pub fn build(name: &str, kind: CategoryKind) -> CategoryBuilder {
        CategoryBuilder {
            id: None,
            name: name.to_owned(),
            kind,
        }
    }
}

/// A builder for creating [Category] instances.
///
/// Leave `id` unset to let the database assign one. Setting an explicit id
/// makes [crate::category::upsert_category] replace the row with that id
/// instead of inserting a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBuilder {
    /// An explicit id, or `None` to let the database assign one.
    pub id: Option<CategoryId>,
    /// The display name.
    pub name: String,
    /// Whether this category groups income or expenses.
    pub kind: CategoryKind,
}

impl CategoryBuilder {
    /// Set an explicit id for the category.
    pub fn id(mut self, id: CategoryId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Form data for category creation.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryFormData {
    pub name: String,
    pub kind: CategoryKind,
}
