//! Totals, balances, listings, and category facets derived from transaction snapshots.
//!
//! Every function here is pure: it reads the slice it is given, allocates its
//! result, and keeps nothing between calls, so it can be re-run on each
//! snapshot a live subscription delivers.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::domain::{FilterState, MonthFilter, TransactionKind, TransactionRecord, ALL_SENTINEL};

/// All-time sums across every record of both kinds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverallTotals {
    pub total_expenses: f64,
    pub total_incomes: f64,
    pub balance: f64,
}

/// Sums restricted to the selected year and month.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PeriodTotals {
    pub period_expenses: f64,
    pub period_incomes: f64,
    pub period_balance: f64,
}

/// Sums expense and income values; the balance is always derived from the two sums.
fn sum_by_kind<'a, I>(records: I) -> (f64, f64)
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    records
        .into_iter()
        .fold((0.0, 0.0), |(expenses, incomes), record| {
            match record.kind {
                TransactionKind::Expense => (expenses + record.value, incomes),
                TransactionKind::Income => (expenses, incomes + record.value),
            }
        })
}

pub fn compute_overall_totals(records: &[TransactionRecord]) -> OverallTotals {
    let (total_expenses, total_incomes) = sum_by_kind(records);
    OverallTotals {
        total_expenses,
        total_incomes,
        balance: total_incomes - total_expenses,
    }
}

/// Totals for the selected month.
///
/// Selecting "all" months yields zero totals rather than a whole-year sum;
/// the dashboard shows all-time figures through [`compute_overall_totals`].
pub fn compute_period_totals(records: &[TransactionRecord], filter: &FilterState) -> PeriodTotals {
    let MonthFilter::Month(month) = filter.selected_month else {
        return PeriodTotals::default();
    };

    let in_period = records.iter().filter(|record| {
        record.year == filter.selected_year
            && record.month == month
            && filter.category_admits(record)
    });
    let (period_expenses, period_incomes) = sum_by_kind(in_period);

    PeriodTotals {
        period_expenses,
        period_incomes,
        period_balance: period_incomes - period_expenses,
    }
}

/// Newest first: `date` descending, then `created_at` descending.
///
/// A pending (`None`) creation timestamp orders before any recorded one, so it
/// lands last among same-day records.
pub fn newest_first(a: &TransactionRecord, b: &TransactionRecord) -> Ordering {
    b.date
        .cmp(&a.date)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Records admitted by `filter`, newest first. Ties keep their input order.
pub fn filter_and_sort(
    records: &[TransactionRecord],
    filter: &FilterState,
) -> Vec<TransactionRecord> {
    let mut selected: Vec<TransactionRecord> = records
        .iter()
        .filter(|record| filter.admits(record))
        .cloned()
        .collect();
    selected.sort_by(newest_first);
    selected
}

/// Category facet for the expense selector: `"all"` followed by each distinct
/// non-empty category in ordinal order.
///
/// Deduplication is exact, so `"Casa"` and `"casa"` are both listed. Income
/// records are ignored.
pub fn distinct_categories(records: &[TransactionRecord]) -> Vec<String> {
    let unique: BTreeSet<&str> = records
        .iter()
        .filter(|record| record.is_expense())
        .filter_map(|record| record.category.as_deref())
        .filter(|category| !category.trim().is_empty())
        .collect();

    std::iter::once(ALL_SENTINEL.to_string())
        .chain(unique.into_iter().map(str::to_string))
        .collect()
}
