//! The home page: a monthly summary and a feed of all transactions grouped
//! by calendar day.

mod grouping;
mod page;
mod view;

pub use page::get_home_page;
pub(crate) use page::render_home_content;
