//! HTML rendering for the home feed.

use maud::{Markup, html};
use time::{Date, Month, format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    category::Category,
    endpoints,
    html::{
        CATEGORY_BADGE_STYLE, currency_rounded_with_tooltip, format_currency,
        format_currency_rounded,
    },
    transaction::{Transaction, TransactionKind},
};

use super::grouping::DayGroup;

/// The max number of graphemes to display for a transaction name before
/// truncating and displaying ellipses.
const MAX_NAME_GRAPHEMES: usize = 32;

/// Render the `#home-content` section: date header, monthly summary and the
/// day-grouped feed.
pub(super) fn home_content_view(
    today: Date,
    monthly_net: f64,
    days: &[DayGroup],
    categories: &[Category],
) -> Markup {
    html! {
        section id="home-content" class="w-full space-y-4"
        {
            (header_view(today, monthly_net))

            @if days.is_empty() {
                div
                    class="rounded-lg border border-dashed border-gray-300 bg-white px-4 py-6 \
                        text-center text-sm text-gray-500 dark:border-gray-700 dark:bg-gray-800 \
                        dark:text-gray-400"
                    data-empty-state="true"
                {
                    "No transactions yet."
                }
            } @else {
                div class="space-y-4"
                {
                    @for day in days {
                        (day_card_view(day, categories))
                    }
                }
            }

            div id="sheet-container" {}
        }
    }
}

fn header_view(today: Date, monthly_net: f64) -> Markup {
    let net_class = if monthly_net < 0.0 {
        "text-red-700 dark:text-red-300"
    } else {
        "text-green-700 dark:text-green-300"
    };

    html! {
        header class="flex flex-col items-center gap-3 py-4"
        {
            span class="rounded-full bg-blue-700 px-5 py-1.5 text-sm font-semibold text-white"
            {
                time datetime=(date_datetime_attr(today)) { (header_date_label(today)) }
            }

            div class="text-center"
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { "Monthly Summary" }
                p
                    class={ "text-3xl font-bold tabular-nums " (net_class) }
                    data-monthly-net="true"
                    title=(format_currency(monthly_net))
                {
                    (signed_currency_rounded(monthly_net))
                }
            }
        }
    }
}

fn day_card_view(day: &DayGroup, categories: &[Category]) -> Markup {
    html! {
        div
            class="overflow-hidden rounded-2xl border border-gray-200 bg-white shadow-sm \
                dark:border-gray-700 dark:bg-gray-800"
            data-day-group="true"
        {
            div class="flex items-start justify-between px-4 py-3"
            {
                span class="font-bold text-gray-900 dark:text-white"
                {
                    (day_time_label(day.date))
                }

                div class="flex gap-4 text-right text-sm"
                {
                    div
                    {
                        div class="text-xs text-gray-400 dark:text-gray-500" { "In" }
                        div class="tabular-nums whitespace-nowrap text-green-700 dark:text-green-300"
                        {
                            (currency_rounded_with_tooltip(day.income))
                        }
                    }
                    div
                    {
                        div class="text-xs text-gray-400 dark:text-gray-500" { "Out" }
                        div class="tabular-nums whitespace-nowrap text-red-700 dark:text-red-300"
                        {
                            (currency_rounded_with_tooltip(day.expenses))
                        }
                    }
                }
            }

            div class="border-t border-gray-200 px-4 py-1 dark:border-gray-700"
            {
                @for transaction in &day.transactions {
                    (transaction_row_view(transaction, categories))
                }
            }
        }
    }
}

fn transaction_row_view(transaction: &Transaction, categories: &[Category]) -> Markup {
    let sheet_route = endpoints::format_endpoint(endpoints::TRANSACTION_SHEET, transaction.id);
    let (name, tooltip) = format_name(&transaction.name);
    let category_name = transaction.category_id.and_then(|category_id| {
        categories
            .iter()
            .find(|category| category.id == category_id)
            .map(|category| category.name.as_str())
    });
    let signed_amount = match transaction.kind {
        TransactionKind::Income => transaction.amount,
        TransactionKind::Expense => -transaction.amount,
    };
    let amount_class = match transaction.kind {
        TransactionKind::Income => {
            "bg-green-100 text-green-700 dark:bg-green-900/40 dark:text-green-300"
        }
        TransactionKind::Expense => "bg-red-100 text-red-700 dark:bg-red-900/40 dark:text-red-300",
    };

    html! {
        div
            class="flex cursor-pointer items-center justify-between gap-3 py-2.5"
            data-transaction-row="true"
            hx-get=(sheet_route)
            hx-target="#sheet-container"
            hx-swap="innerHTML"
            hx-target-error="#alert-container"
        {
            div class="min-w-0 flex-1"
            {
                p class="truncate text-sm font-medium text-gray-900 dark:text-white" title=[tooltip]
                {
                    (name)
                }

                @if let Some(category_name) = category_name {
                    span class=(CATEGORY_BADGE_STYLE) data-category-badge="true"
                    {
                        (category_name)
                    }
                }
            }

            span
                class={ "shrink-0 rounded-xl px-2.5 py-1 text-sm font-bold tabular-nums \
                    whitespace-nowrap " (amount_class) }
                title=(format_currency(signed_amount))
            {
                (signed_currency_rounded(signed_amount))
            }
        }
    }
}

/// Format an amount as whole Rupiah with an explicit sign, e.g. "+Rp 35,000".
fn signed_currency_rounded(amount: f64) -> String {
    if amount < 0.0 {
        format_currency_rounded(amount)
    } else {
        format!("+{}", format_currency_rounded(amount))
    }
}

fn format_name(name: &str) -> (String, Option<&str>) {
    let name_length = name.graphemes(true).count();

    if name_length <= MAX_NAME_GRAPHEMES {
        (name.to_owned(), None)
    } else {
        let truncated: String = name.graphemes(true).take(MAX_NAME_GRAPHEMES - 3).collect();
        (truncated + "...", Some(name))
    }
}

const DATE_ATTRIBUTE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month repr:numerical padding:zero]-[day padding:zero]");

fn date_datetime_attr(date: Date) -> String {
    date.format(DATE_ATTRIBUTE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

fn day_time_label(date: Date) -> Markup {
    html! {
        time datetime=(date_datetime_attr(date)) { (format_day_label(date)) }
    }
}

fn format_day_label(date: Date) -> String {
    format!("{:02} {}", date.day(), month_abbrev(date.month()))
}

fn header_date_label(date: Date) -> String {
    format!("{}, {} {}", date.weekday(), date.day(), date.month())
}

fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

#[cfg(test)]
mod view_tests {
    use time::macros::date;

    use super::{format_day_label, format_name, header_date_label, signed_currency_rounded};

    #[test]
    fn long_names_truncate_with_tooltip() {
        let name = "a".repeat(40);

        let (display, tooltip) = format_name(&name);

        assert_eq!(display.len(), 32, "want 29 graphemes plus ellipses");
        assert!(display.ends_with("..."), "got {display:?}");
        assert_eq!(tooltip, Some(name.as_str()));
    }

    #[test]
    fn short_names_are_untouched() {
        let (display, tooltip) = format_name("Lunch");

        assert_eq!(display, "Lunch");
        assert_eq!(tooltip, None);
    }

    #[test]
    fn day_label_is_zero_padded() {
        assert_eq!(format_day_label(date!(2025 - 01 - 02)), "02 Jan");
    }

    #[test]
    fn header_label_spells_out_the_date() {
        assert_eq!(header_date_label(date!(2025 - 08 - 25)), "Monday, 25 August");
    }

    #[test]
    fn amounts_are_sign_prefixed() {
        assert_eq!(signed_currency_rounded(35000.0), "+Rp 35,000");
        assert_eq!(signed_currency_rounded(-35000.0), "-Rp 35,000");
        assert_eq!(signed_currency_rounded(0.0), "+Rp 0");
    }
}
