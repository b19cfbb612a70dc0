//! Route handler for the home page.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::OffsetDateTime;

use crate::{
    AppState, Error, endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    repository::FinanceRepository,
    timezone::get_local_offset,
};

use super::{
    grouping::{group_by_day, monthly_net},
    view::home_content_view,
};

/// The state needed for the home page.
#[derive(Debug, Clone)]
pub struct HomePageState {
    /// The data facade for reading the transaction and category snapshots.
    pub repository: FinanceRepository,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Jakarta".
    pub local_timezone: String,
}

impl FromRef<AppState> for HomePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            repository: state.repository.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the home page: the monthly summary and the feed of all
/// transactions grouped by local calendar day.
pub async fn get_home_page(State(state): State<HomePageState>) -> Result<Response, Error> {
    let content = render_home_content(&state.repository, &state.local_timezone)?;
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();

    Ok(base(
        "Home",
        &[],
        &html! {
            (nav_bar)

            main class=(PAGE_CONTAINER_STYLE)
            {
                (content)
            }
        },
    )
    .into_response())
}

/// Render the `#home-content` section from the current snapshots.
///
/// Shared with the transaction delete endpoint, which swaps the refreshed
/// feed in place of the stale one.
pub(crate) fn render_home_content(
    repository: &FinanceRepository,
    local_timezone: &str,
) -> Result<Markup, Error> {
    let local_offset = get_local_offset(local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", local_timezone);
        Error::InvalidTimezoneError(local_timezone.to_owned())
    })?;
    let today = OffsetDateTime::now_utc().to_offset(local_offset).date();
    let transactions = repository.transactions().borrow().clone();
    let categories = repository.categories().borrow().clone();

    let days = group_by_day(transactions, local_offset);
    let net = monthly_net(&days, today);

    Ok(home_content_view(today, net, &days, &categories))
}

#[cfg(test)]
mod home_page_tests {
    use axum::extract::State;
    use rusqlite::Connection;
    use scraper::{ElementRef, Html, Selector};
    use time::{Duration, OffsetDateTime, macros::datetime};

    use crate::{
        Category, CategoryId, CategoryKind, Transaction, TransactionKind,
        db::initialize,
        endpoints::{self, format_endpoint},
        repository::FinanceRepository,
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::{HomePageState, get_home_page};

    fn get_test_state() -> HomePageState {
        let connection = Connection::open_in_memory().expect("Could not open database");
        initialize(&connection).expect("Could not initialize database");

        HomePageState {
            repository: FinanceRepository::new(connection).expect("Could not create repository"),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    async fn add_category(state: &HomePageState, name: &str, kind: CategoryKind) -> CategoryId {
        state
            .repository
            .add_category(Category::build(name, kind))
            .await
            .expect("Could not create category");

        state
            .repository
            .categories()
            .borrow()
            .iter()
            .find(|category| category.name == name)
            .expect("category missing from snapshot")
            .id
    }

    #[track_caller]
    fn get_feed_rows(html: &Html) -> Vec<String> {
        html.select(&Selector::parse("[data-transaction-row='true']").unwrap())
            .map(|row| row.text().collect::<String>())
            .collect()
    }

    #[tokio::test]
    async fn feed_shows_categorized_transaction() {
        let state = get_test_state();
        let food_id = add_category(&state, "Food", CategoryKind::Expense).await;
        state
            .repository
            .add_transaction(
                Transaction::build(
                    "Lunch",
                    35000.0,
                    OffsetDateTime::now_utc(),
                    TransactionKind::Expense,
                )
                .category_id(Some(food_id)),
            )
            .await
            .expect("Could not create transaction");

        let response = get_home_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let rows = get_feed_rows(&html);
        assert_eq!(rows.len(), 1, "want 1 feed row, got {}", rows.len());
        assert!(rows[0].contains("Lunch"), "got row text {:?}", rows[0]);
        assert!(
            rows[0].contains("-Rp 35,000"),
            "want signed amount in row, got {:?}",
            rows[0]
        );

        let badge = html
            .select(&Selector::parse("[data-category-badge='true']").unwrap())
            .next()
            .expect("want a category badge on the feed row");
        assert_eq!(badge.text().collect::<String>().trim(), "Food");
    }

    #[tokio::test]
    async fn feed_groups_transactions_by_day_newest_first() {
        let state = get_test_state();
        state
            .repository
            .add_transaction(Transaction::build(
                "Groceries",
                120_000.0,
                datetime!(2025-08-19 00:00 UTC),
                TransactionKind::Expense,
            ))
            .await
            .unwrap();
        state
            .repository
            .add_transaction(Transaction::build(
                "Lunch",
                35000.0,
                datetime!(2025-08-20 00:00 UTC),
                TransactionKind::Expense,
            ))
            .await
            .unwrap();

        let response = get_home_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let day_selector = Selector::parse("[data-day-group='true']").unwrap();
        let day_cards: Vec<ElementRef> = html.select(&day_selector).collect();
        assert_eq!(
            day_cards.len(),
            2,
            "want 2 day groups, got {}",
            day_cards.len()
        );

        let first_day = day_cards[0].text().collect::<String>();
        assert!(
            first_day.contains("20 Aug") && first_day.contains("Lunch"),
            "want the newest day first, got {first_day:?}"
        );
        let second_day = day_cards[1].text().collect::<String>();
        assert!(
            second_day.contains("19 Aug") && second_day.contains("Groceries"),
            "want the older day second, got {second_day:?}"
        );
    }

    #[tokio::test]
    async fn monthly_summary_shows_net_of_current_month() {
        let state = get_test_state();
        let now = OffsetDateTime::now_utc();
        state
            .repository
            .add_transaction(Transaction::build(
                "Salary",
                50000.0,
                now,
                TransactionKind::Income,
            ))
            .await
            .unwrap();
        state
            .repository
            .add_transaction(Transaction::build(
                "Lunch",
                15000.0,
                now,
                TransactionKind::Expense,
            ))
            .await
            .unwrap();
        // Well outside the current month.
        state
            .repository
            .add_transaction(Transaction::build(
                "Old rent",
                999_000.0,
                now - Duration::days(40),
                TransactionKind::Expense,
            ))
            .await
            .unwrap();

        let response = get_home_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let net = html
            .select(&Selector::parse("[data-monthly-net='true']").unwrap())
            .next()
            .expect("want a monthly net element");
        assert_eq!(net.text().collect::<String>().trim(), "+Rp 35,000");
    }

    #[tokio::test]
    async fn feed_shows_empty_state_when_no_transactions() {
        let state = get_test_state();

        let response = get_home_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        assert!(
            html.select(&Selector::parse("[data-empty-state='true']").unwrap())
                .next()
                .is_some(),
            "want the empty state"
        );
        assert!(
            html.select(&Selector::parse("[data-day-group='true']").unwrap())
                .next()
                .is_none(),
            "want no day group cards"
        );
    }

    #[tokio::test]
    async fn feed_omits_badge_after_category_deleted() {
        let state = get_test_state();
        let transport_id = add_category(&state, "Transport", CategoryKind::Expense).await;
        state
            .repository
            .add_transaction(
                Transaction::build(
                    "Train ticket",
                    26000.0,
                    OffsetDateTime::now_utc(),
                    TransactionKind::Expense,
                )
                .category_id(Some(transport_id)),
            )
            .await
            .unwrap();
        state
            .repository
            .delete_category(transport_id)
            .await
            .expect("Could not delete category");

        let response = get_home_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let rows = get_feed_rows(&html);
        assert_eq!(rows.len(), 1, "want the transaction to survive the delete");
        assert!(rows[0].contains("Train ticket"), "got {:?}", rows[0]);
        assert!(
            html.select(&Selector::parse("[data-category-badge='true']").unwrap())
                .next()
                .is_none(),
            "want no badge once the category is gone"
        );
    }

    #[tokio::test]
    async fn feed_rows_open_the_options_sheet() {
        let state = get_test_state();
        state
            .repository
            .add_transaction(Transaction::build(
                "Lunch",
                35000.0,
                OffsetDateTime::now_utc(),
                TransactionKind::Expense,
            ))
            .await
            .unwrap();

        let response = get_home_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let row = html
            .select(&Selector::parse("[data-transaction-row='true']").unwrap())
            .next()
            .expect("want a feed row");
        assert_eq!(
            row.value().attr("hx-get"),
            Some(format_endpoint(endpoints::TRANSACTION_SHEET, 1).as_str()),
            "want the row to request the options sheet"
        );
        assert_eq!(row.value().attr("hx-target"), Some("#sheet-container"));

        assert!(
            html.select(&Selector::parse("#sheet-container").unwrap())
                .next()
                .is_some(),
            "want the sheet container in the feed"
        );
    }
}
