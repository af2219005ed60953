use crate::core::aggregation::{self, OverallTotals, PeriodTotals};
use crate::domain::{FilterState, TransactionKind, TransactionRecord};

/// Everything the summary cards and filter bar display for one filter.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub filter: FilterState,
    pub overall: OverallTotals,
    pub period: PeriodTotals,
    pub categories: Vec<String>,
    pub listed_expenses: usize,
    pub listed_incomes: usize,
}

pub struct SummaryService;

impl SummaryService {
    /// Recomputes every dashboard figure from a full snapshot of both kinds.
    pub fn overview(records: &[TransactionRecord], filter: &FilterState) -> DashboardSummary {
        let listed = aggregation::filter_and_sort(records, filter);
        let listed_expenses = listed
            .iter()
            .filter(|record| record.kind == TransactionKind::Expense)
            .count();
        let summary = DashboardSummary {
            filter: filter.clone(),
            overall: aggregation::compute_overall_totals(records),
            period: aggregation::compute_period_totals(records, filter),
            categories: aggregation::distinct_categories(records),
            listed_expenses,
            listed_incomes: listed.len() - listed_expenses,
        };
        tracing::debug!(
            records = records.len(),
            listed = listed.len(),
            year = filter.selected_year,
            month = %filter.selected_month,
            "recomputed dashboard summary"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryFilter, MonthFilter};
    use chrono::NaiveDate;

    fn record(
        id: &str,
        kind: TransactionKind,
        value: f64,
        month: u32,
        category: Option<&str>,
    ) -> TransactionRecord {
        TransactionRecord {
            id: id.into(),
            kind,
            description: id.into(),
            value,
            date: NaiveDate::from_ymd_opt(2025, month, 10).unwrap(),
            year: 2025,
            month,
            category: category.map(str::to_string),
            created_at: None,
        }
    }

    #[test]
    fn overview_bundles_every_figure() {
        let records = vec![
            record("rent", TransactionKind::Expense, 1500.0, 6, Some("Casa")),
            record("fun", TransactionKind::Expense, 200.0, 5, Some("Lazer")),
            record("pay", TransactionKind::Income, 4000.0, 6, None),
        ];
        let filter = FilterState::new(2025, MonthFilter::Month(6), CategoryFilter::All);
        let summary = SummaryService::overview(&records, &filter);

        assert_eq!(summary.overall.total_expenses, 1700.0);
        assert_eq!(summary.overall.balance, 2300.0);
        assert_eq!(summary.period.period_expenses, 1500.0);
        assert_eq!(summary.period.period_balance, 2500.0);
        assert_eq!(summary.categories, vec!["all", "Casa", "Lazer"]);
        assert_eq!(summary.listed_expenses, 1);
        assert_eq!(summary.listed_incomes, 1);
    }

    #[test]
    fn overview_of_nothing_is_all_zero() {
        let summary = SummaryService::overview(&[], &FilterState::default());
        assert_eq!(summary.overall, OverallTotals::default());
        assert_eq!(summary.period, PeriodTotals::default());
        assert_eq!(summary.listed_expenses + summary.listed_incomes, 0);
    }
}
