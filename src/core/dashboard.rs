//! View-model holding the current snapshots and selection for the dashboard.

use crate::core::aggregation;
use crate::core::services::{
    DashboardSummary, InvestmentEstimate, InvestmentService, PortfolioTotals, SummaryService,
};
use crate::domain::{FilterState, InvestmentRecord, TransactionKind, TransactionRecord};
use crate::errors::Result;
use crate::session::Session;
use crate::store::DocumentStore;

/// Latest expense, income, and investment snapshots plus the active filter.
///
/// Each `replace_*` call swaps a whole collection; derived figures are always
/// recomputed from the current snapshots, never patched incrementally.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    filter: FilterState,
    expenses: Vec<TransactionRecord>,
    incomes: Vec<TransactionRecord>,
    investments: Vec<InvestmentRecord>,
}

impl Dashboard {
    pub fn new(filter: FilterState) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    pub fn replace_expenses(&mut self, records: Vec<TransactionRecord>) {
        self.expenses = records;
    }

    pub fn replace_incomes(&mut self, records: Vec<TransactionRecord>) {
        self.incomes = records;
    }

    pub fn replace_investments(&mut self, records: Vec<InvestmentRecord>) {
        self.investments = records;
    }

    pub fn clear(&mut self) {
        self.expenses.clear();
        self.incomes.clear();
        self.investments.clear();
    }

    /// Reloads every collection for the signed-in user, or empties the
    /// dashboard when nobody is signed in.
    pub fn load_from(&mut self, store: &dyn DocumentStore, session: &Session) -> Result<()> {
        let Some(user) = session.current_user() else {
            self.clear();
            return Ok(());
        };
        let expenses = store.transactions(user, TransactionKind::Expense)?;
        let incomes = store.transactions(user, TransactionKind::Income)?;
        let investments = store.investments(user)?;
        tracing::debug!(
            user = %user,
            expenses = expenses.len(),
            incomes = incomes.len(),
            investments = investments.len(),
            "dashboard snapshots reloaded"
        );
        self.replace_expenses(expenses);
        self.replace_incomes(incomes);
        self.replace_investments(investments);
        Ok(())
    }

    /// Both transaction kinds, expenses first.
    pub fn records(&self) -> Vec<TransactionRecord> {
        self.expenses
            .iter()
            .chain(self.incomes.iter())
            .cloned()
            .collect()
    }

    pub fn summary(&self) -> DashboardSummary {
        SummaryService::overview(&self.records(), &self.filter)
    }

    pub fn expenses(&self) -> Vec<TransactionRecord> {
        aggregation::filter_and_sort(&self.expenses, &self.filter)
    }

    pub fn incomes(&self) -> Vec<TransactionRecord> {
        aggregation::filter_and_sort(&self.incomes, &self.filter)
    }

    pub fn categories(&self) -> Vec<String> {
        aggregation::distinct_categories(&self.expenses)
    }

    pub fn investment_records(&self) -> Vec<InvestmentRecord> {
        InvestmentService::sorted(&self.investments)
    }

    pub fn investments(&self) -> Vec<InvestmentEstimate> {
        self.investment_records()
            .iter()
            .map(InvestmentService::estimate)
            .collect()
    }

    pub fn portfolio(&self) -> PortfolioTotals {
        InvestmentService::portfolio(&self.investments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryFilter, MonthFilter, NewTransaction, UserId};
    use crate::store::JsonDocumentStore;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record(
        id: &str,
        kind: TransactionKind,
        value: f64,
        day: u32,
        category: Option<&str>,
    ) -> TransactionRecord {
        TransactionRecord {
            id: id.into(),
            kind,
            description: id.into(),
            value,
            date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            year: 2025,
            month: 6,
            category: category.map(str::to_string),
            created_at: None,
        }
    }

    fn june() -> FilterState {
        FilterState::new(2025, MonthFilter::Month(6), CategoryFilter::All)
    }

    #[test]
    fn replacing_a_snapshot_discards_the_previous_one() {
        let mut dashboard = Dashboard::new(june());
        dashboard.replace_expenses(vec![record(
            "a",
            TransactionKind::Expense,
            10.0,
            1,
            Some("Food"),
        )]);
        dashboard.replace_expenses(vec![record(
            "b",
            TransactionKind::Expense,
            4.0,
            2,
            Some("Fun"),
        )]);
        let summary = dashboard.summary();
        assert_eq!(summary.overall.total_expenses, 4.0);
        assert_eq!(dashboard.categories(), vec!["all", "Fun"]);
    }

    #[test]
    fn category_filter_leaves_incomes_listed() {
        let mut dashboard = Dashboard::new(june().with_category(CategoryFilter::from("Food")));
        dashboard.replace_expenses(vec![
            record("food", TransactionKind::Expense, 10.0, 3, Some("Food")),
            record("fun", TransactionKind::Expense, 20.0, 4, Some("Fun")),
        ]);
        dashboard.replace_incomes(vec![record("pay", TransactionKind::Income, 100.0, 5, None)]);

        let expenses: Vec<_> = dashboard.expenses().into_iter().map(|r| r.id).collect();
        assert_eq!(expenses, vec!["food"]);
        assert_eq!(dashboard.incomes().len(), 1);
        let period = dashboard.summary().period;
        assert_eq!(period.period_expenses, 10.0);
        assert_eq!(period.period_incomes, 100.0);
    }

    #[test]
    fn load_from_clears_when_signed_out() {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonDocumentStore::new(Some(temp.path().to_path_buf())).expect("store");
        let user = UserId::new("u-1");
        store
            .insert_transaction(
                &user,
                NewTransaction::income(
                    "Salary",
                    50.0,
                    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                ),
            )
            .expect("insert");

        let mut dashboard = Dashboard::new(june());
        dashboard
            .load_from(&store, &Session::signed_in(user))
            .expect("load");
        assert_eq!(dashboard.summary().overall.total_incomes, 50.0);

        dashboard
            .load_from(&store, &Session::new())
            .expect("reload");
        assert_eq!(dashboard.summary().overall.total_incomes, 0.0);
        assert!(dashboard.investments().is_empty());
    }
}
