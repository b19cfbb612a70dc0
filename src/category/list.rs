//! Categories listing page.

use std::collections::HashMap;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState,
    category::{Category, CategoryId, CategoryKind},
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
    },
    navigation::NavBar,
    repository::FinanceRepository,
    transaction::Transaction,
};

/// The state needed for the categories listing page.
#[derive(Debug, Clone)]
pub struct CategoriesPageState {
    pub repository: FinanceRepository,
}

impl FromRef<AppState> for CategoriesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            repository: state.repository.clone(),
        }
    }
}

/// A category with the rendering context for its table row.
#[derive(Debug, Clone)]
struct CategoryRow {
    category: Category,
    delete_url: String,
    transaction_count: u32,
}

/// Render the categories listing page with transaction counts.
pub async fn get_categories_page(State(state): State<CategoriesPageState>) -> Response {
    let categories = state.repository.categories().borrow().clone();
    let transactions = state.repository.transactions().borrow().clone();
    let transactions_per_category = count_transactions_per_category(&transactions);

    let rows = categories
        .into_iter()
        .map(|category| {
            let transaction_count = *transactions_per_category
                .get(&category.id)
                .unwrap_or(&0);

            CategoryRow {
                delete_url: endpoints::format_endpoint(endpoints::DELETE_CATEGORY, category.id),
                category,
                transaction_count,
            }
        })
        .collect::<Vec<_>>();

    categories_view(&rows).into_response()
}

fn count_transactions_per_category(transactions: &[Transaction]) -> HashMap<CategoryId, u32> {
    let mut counts = HashMap::new();

    for transaction in transactions {
        if let Some(category_id) = transaction.category_id {
            *counts.entry(category_id).or_insert(0) += 1;
        }
    }

    counts
}

fn kind_badge(kind: CategoryKind) -> Markup {
    let (badge_style, label) = match kind {
        CategoryKind::Expense => (
            "inline-flex items-center px-2.5 py-0.5 text-xs font-semibold \
             text-red-800 bg-red-100 rounded-full dark:bg-red-900 dark:text-red-300",
            "Expense",
        ),
        CategoryKind::Income => (
            "inline-flex items-center px-2.5 py-0.5 text-xs font-semibold \
             text-green-800 bg-green-100 rounded-full dark:bg-green-900 dark:text-green-300",
            "Income",
        ),
    };

    html! {
        span class=(badge_style) { (label) }
    }
}

fn delete_button(row: &CategoryRow) -> Markup {
    html! {
        button
            hx-delete=(row.delete_url)
            hx-confirm={
                "Are you sure you want to delete '"
                (row.category.name) "'? This will remove it from "
                (row.transaction_count) " transaction(s)."
            }
            hx-target="closest tr"
            hx-target-error="#alert-container"
            hx-swap="delete"
            class=(BUTTON_DELETE_STYLE)
        {
            "Delete"
        }
    }
}

fn categories_view(rows: &[CategoryRow]) -> Markup {
    let new_category_route = endpoints::NEW_CATEGORY_VIEW;
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let table_row = |row: &CategoryRow| {
        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    span class="font-medium text-gray-900 dark:text-white"
                    {
                        (row.category.name)
                    }
                }

                td class=(TABLE_CELL_STYLE)
                {
                    (kind_badge(row.category.kind))
                }

                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        (delete_button(row))
                    }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Categories" }

                    a href=(new_category_route) class=(LINK_STYLE)
                    {
                        "Create Category"
                    }
                }

                section class="dark:bg-gray-800 lg:max-w-5xl lg:w-full lg:mx-auto"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Name"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Kind"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Actions"
                                }
                            }
                        }

                        tbody
                        {
                            @for row in rows {
                                (table_row(row))
                            }

                            @if rows.is_empty() {
                                tr
                                {
                                    td
                                        colspan="3"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No categories created yet. "
                                        a href=(new_category_route) class=(LINK_STYLE)
                                        {
                                            "Create your first category"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Categories", &[], &content)
}
