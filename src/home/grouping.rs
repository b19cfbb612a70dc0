//! Groups the transaction snapshot into local calendar days.

use time::{Date, UtcOffset};

use crate::transaction::{Transaction, TransactionKind};

/// The transactions of one local calendar day, with the day's totals.
#[derive(Debug, PartialEq)]
pub(super) struct DayGroup {
    pub(super) date: Date,
    /// Sum of the day's income amounts.
    pub(super) income: f64,
    /// Sum of the day's expense amounts.
    pub(super) expenses: f64,
    pub(super) transactions: Vec<Transaction>,
}

/// Split a transaction list into one group per local calendar day.
///
/// The input must be ordered newest first. Instant order is preserved under
/// the offset conversion, so equal local dates are always adjacent and the
/// groups come out newest day first.
pub(super) fn group_by_day(
    transactions: Vec<Transaction>,
    local_timezone: UtcOffset,
) -> Vec<DayGroup> {
    let mut days: Vec<DayGroup> = Vec::new();

    for transaction in transactions {
        let date = transaction.date.to_offset(local_timezone).date();
        let day_group = match days.last_mut() {
            Some(current) if current.date == date => current,
            _ => {
                days.push(DayGroup {
                    date,
                    income: 0.0,
                    expenses: 0.0,
                    transactions: Vec::new(),
                });
                days.last_mut().expect("day group just added")
            }
        };

        match transaction.kind {
            TransactionKind::Income => day_group.income += transaction.amount,
            TransactionKind::Expense => day_group.expenses += transaction.amount,
        }

        day_group.transactions.push(transaction);
    }

    days
}

/// The net amount (income minus expenses) of the month containing `today`.
pub(super) fn monthly_net(days: &[DayGroup], today: Date) -> f64 {
    days.iter()
        .filter(|day| day.date.year() == today.year() && day.date.month() == today.month())
        .map(|day| day.income - day.expenses)
        .sum()
}
