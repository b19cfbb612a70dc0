//! Category management for classifying transactions as income or expenses.

mod create;
mod db;
mod delete;
mod domain;
mod list;

pub use create::{create_category_endpoint, get_new_category_page};
pub use db::{
    count_categories, create_category_table, delete_category, get_all_categories, get_category,
    upsert_category,
};
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryBuilder, CategoryFormData, CategoryId, CategoryKind};
pub use list::get_categories_page;
