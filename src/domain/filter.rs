//! Year / month / category selection driving the dashboard.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};

use crate::domain::transaction::TransactionRecord;
use crate::errors::FinanceError;

/// Sentinel used by the month and category selectors for "no restriction".
pub const ALL_SENTINEL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthFilter {
    All,
    /// Calendar month, 1..=12.
    Month(u32),
}

impl MonthFilter {
    pub fn matches(self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(selected) => selected == month,
        }
    }

    /// Selector value: `"all"` or the two-digit month.
    pub fn key(self) -> String {
        match self {
            MonthFilter::All => ALL_SENTINEL.to_string(),
            MonthFilter::Month(month) => format!("{:02}", month),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for MonthFilter {
    type Err = FinanceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case(ALL_SENTINEL) {
            return Ok(MonthFilter::All);
        }
        match trimmed.parse::<u32>() {
            Ok(month) if (1..=12).contains(&month) => Ok(MonthFilter::Month(month)),
            _ => Err(FinanceError::Validation(format!(
                "month must be `all` or 01-12, got `{}`",
                trimmed
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact, case-sensitive category label.
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => category == Some(selected.as_str()),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_SENTINEL),
            CategoryFilter::Only(category) => f.write_str(category),
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(raw: &str) -> Self {
        if raw == ALL_SENTINEL || raw.is_empty() {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(raw.to_string())
        }
    }
}

/// Transient selection state; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub selected_year: i32,
    pub selected_month: MonthFilter,
    pub selected_category: CategoryFilter,
}

impl FilterState {
    pub fn new(year: i32, month: MonthFilter, category: CategoryFilter) -> Self {
        Self {
            selected_year: year,
            selected_month: month,
            selected_category: category,
        }
    }

    /// Selects the month containing `today` with no category restriction.
    pub fn for_date(today: NaiveDate) -> Self {
        Self::new(
            today.year(),
            MonthFilter::Month(today.month()),
            CategoryFilter::All,
        )
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.selected_category = category;
        self
    }

    /// Category restriction applies to expenses only.
    pub fn category_admits(&self, record: &TransactionRecord) -> bool {
        !record.is_expense() || self.selected_category.matches(record.category.as_deref())
    }

    /// Listing predicate: selected year, month (or whole year), and category.
    pub fn admits(&self, record: &TransactionRecord) -> bool {
        record.year == self.selected_year
            && self.selected_month.matches(record.month)
            && self.category_admits(record)
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::for_date(Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_filter_parses_sentinel_and_padded_months() {
        assert_eq!("all".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert_eq!("ALL".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert_eq!("06".parse::<MonthFilter>().unwrap(), MonthFilter::Month(6));
        assert_eq!("12".parse::<MonthFilter>().unwrap(), MonthFilter::Month(12));
        assert!("00".parse::<MonthFilter>().is_err());
        assert!("june".parse::<MonthFilter>().is_err());
    }

    #[test]
    fn month_key_is_two_digits() {
        assert_eq!(MonthFilter::Month(3).key(), "03");
        assert_eq!(MonthFilter::All.key(), "all");
    }

    #[test]
    fn category_filter_is_case_sensitive() {
        let filter = CategoryFilter::from("Casa");
        assert!(filter.matches(Some("Casa")));
        assert!(!filter.matches(Some("casa")));
        assert!(!filter.matches(None));
        assert!(CategoryFilter::from("all").matches(None));
    }

    #[test]
    fn for_date_selects_current_month() {
        let filter = FilterState::for_date(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        assert_eq!(filter.selected_year, 2026);
        assert_eq!(filter.selected_month, MonthFilter::Month(10));
        assert_eq!(filter.selected_category, CategoryFilter::All);
    }
}
