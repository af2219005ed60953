//! Calendar helpers behind the year/month selectors and range queries.

use chrono::{Datelike, Local, NaiveDate};

use crate::domain::ALL_SENTINEL;

const CANONICAL_FORMAT: &str = "%Y-%m-%d";

const MONTH_LABELS: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

const ALL_MONTHS_LABEL: &str = "Todos os Meses";

/// Half-open range of canonical date strings, `[start_inclusive, end_exclusive)`.
///
/// Canonical dates sort lexicographically in calendar order, so membership is a
/// plain string comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start_inclusive: String,
    pub end_exclusive: String,
}

impl DateRange {
    pub fn contains(&self, date: &str) -> bool {
        date >= self.start_inclusive.as_str() && date < self.end_exclusive.as_str()
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.contains(&format_date(date))
    }
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(CANONICAL_FORMAT).to_string()
}

/// Parses a canonical `YYYY-MM-DD` string.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), CANONICAL_FORMAT).ok()
}

fn first_of_month(month_index: i64) -> String {
    let year = month_index.div_euclid(12);
    let month = month_index.rem_euclid(12) + 1;
    format!("{:04}-{:02}-01", year, month)
}

/// Range covering `month` (1..=12) of `year`; December rolls into January of
/// the following year. Out-of-range months normalize into neighbouring years.
pub fn month_range(year: i32, month: u32) -> DateRange {
    let index = i64::from(year) * 12 + i64::from(month) - 1;
    DateRange {
        start_inclusive: first_of_month(index),
        end_exclusive: first_of_month(index + 1),
    }
}

/// Range covering the whole calendar `year`.
pub fn year_range(year: i32) -> DateRange {
    let index = i64::from(year) * 12;
    DateRange {
        start_inclusive: first_of_month(index),
        end_exclusive: first_of_month(index + 12),
    }
}

/// `count` years descending from the current calendar year.
pub fn trailing_years(count: usize) -> Vec<i32> {
    trailing_years_from(Local::now().year(), count)
}

/// Stops early rather than wrapping when the span runs past `i32::MIN`.
pub fn trailing_years_from(current_year: i32, count: usize) -> Vec<i32> {
    (0..count)
        .map_while(|offset| {
            i32::try_from(offset)
                .ok()
                .and_then(|offset| current_year.checked_sub(offset))
        })
        .collect()
}

/// Portuguese label for a calendar month.
pub fn month_label(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_LABELS.get(index).copied()
}

/// Month selector options: `("all", "Todos os Meses")` followed by `("01", "Janeiro")`..`("12", "Dezembro")`.
pub fn month_options() -> Vec<(String, &'static str)> {
    std::iter::once((ALL_SENTINEL.to_string(), ALL_MONTHS_LABEL))
        .chain(
            MONTH_LABELS
                .iter()
                .enumerate()
                .map(|(idx, label)| (format!("{:02}", idx + 1), *label)),
        )
        .collect()
}
