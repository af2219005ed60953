//! Expense and income records as streamed back from the document store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::common::{Displayable, Identifiable};
use crate::errors::FinanceError;

/// Which collection a transaction belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    /// Name of the per-user collection holding records of this kind.
    pub fn collection(self) -> &'static str {
        match self {
            TransactionKind::Expense => "expenses",
            TransactionKind::Income => "incomes",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Expense => "Expense",
            TransactionKind::Income => "Income",
        };
        f.write_str(label)
    }
}

impl FromStr for TransactionKind {
    type Err = FinanceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "expense" | "expenses" => Ok(TransactionKind::Expense),
            "income" | "incomes" => Ok(TransactionKind::Income),
            other => Err(FinanceError::Validation(format!(
                "unknown transaction kind `{}`",
                other
            ))),
        }
    }
}

/// Immutable snapshot of a single expense or income.
///
/// `year` and `month` duplicate the components of `date`. They are written
/// alongside it so the store can filter by equality, and are never re-derived
/// on read.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub id: String,
    pub kind: TransactionKind,
    pub description: String,
    pub value: f64,
    pub date: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub category: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl TransactionRecord {
    /// Rebuilds a record from a stored document; the kind comes from the collection.
    pub fn from_document(
        id: impl Into<String>,
        kind: TransactionKind,
        doc: TransactionDocument,
    ) -> Self {
        let category = match kind {
            TransactionKind::Expense => doc.category,
            TransactionKind::Income => None,
        };
        Self {
            id: id.into(),
            kind,
            description: doc.description,
            value: doc.value,
            date: doc.date,
            year: doc.year,
            month: doc.month,
            category,
            created_at: doc.created_at,
        }
    }

    pub fn to_document(&self) -> TransactionDocument {
        TransactionDocument {
            description: self.description.clone(),
            value: self.value,
            category: self.category.clone(),
            date: self.date,
            year: self.year,
            month: self.month,
            created_at: self.created_at,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

impl Identifiable for TransactionRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for TransactionRecord {
    fn display_label(&self) -> String {
        match &self.category {
            Some(category) => format!("{} [{}] {:.2}", self.description, category, self.value),
            None => format!("{} {:.2}", self.description, self.value),
        }
    }
}

/// Persisted layout of a transaction document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDocument {
    pub description: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub date: NaiveDate,
    pub year: i32,
    #[serde(with = "two_digit_month")]
    pub month: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Form submission for a new expense or income, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub description: String,
    pub value: f64,
    pub category: Option<String>,
    pub date: NaiveDate,
}

impl NewTransaction {
    pub fn expense(
        description: impl Into<String>,
        value: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            kind: TransactionKind::Expense,
            description: description.into(),
            value,
            category: Some(category.into()),
            date,
        }
    }

    pub fn income(description: impl Into<String>, value: f64, date: NaiveDate) -> Self {
        Self {
            kind: TransactionKind::Income,
            description: description.into(),
            value,
            category: None,
            date,
        }
    }
}

/// Missing, null, or non-finite amounts contribute zero instead of failing the decode.
fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.filter(|value| value.is_finite()).unwrap_or(0.0))
}

/// Months travel as `"01"`..`"12"` on the wire.
pub(crate) mod two_digit_month {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(month: &u32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:02}", month))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        match raw.parse::<u32>() {
            Ok(month) if (1..=12).contains(&month) => Ok(month),
            _ => Err(de::Error::custom(format!("invalid month `{}`", raw))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn document_uses_camel_case_and_padded_month() {
        let doc = TransactionDocument {
            description: "Rent".into(),
            value: 1500.0,
            category: Some("Moradia".into()),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            year: 2025,
            month: 6,
            created_at: None,
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["month"], json!("06"));
        assert_eq!(value["date"], json!("2025-06-01"));
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn missing_or_null_value_decodes_as_zero() {
        let missing: TransactionDocument = serde_json::from_value(json!({
            "description": "Gift",
            "date": "2025-02-03",
            "year": 2025,
            "month": "02"
        }))
        .unwrap();
        assert_eq!(missing.value, 0.0);

        let null: TransactionDocument = serde_json::from_value(json!({
            "description": "Gift",
            "value": null,
            "date": "2025-02-03",
            "year": 2025,
            "month": "02"
        }))
        .unwrap();
        assert_eq!(null.value, 0.0);
    }

    #[test]
    fn out_of_range_month_is_rejected() {
        let result: Result<TransactionDocument, _> = serde_json::from_value(json!({
            "description": "Bad",
            "value": 1.0,
            "date": "2025-02-03",
            "year": 2025,
            "month": "13"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn income_documents_drop_category() {
        let doc = TransactionDocument {
            description: "Salary".into(),
            value: 5000.0,
            category: Some("ignored".into()),
            date: NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
            year: 2025,
            month: 6,
            created_at: None,
        };
        let record = TransactionRecord::from_document("abc", TransactionKind::Income, doc);
        assert!(record.category.is_none());
        assert_eq!(record.id(), "abc");
    }

    #[test]
    fn kind_parses_collection_names() {
        assert_eq!(
            "expenses".parse::<TransactionKind>().unwrap(),
            TransactionKind::Expense
        );
        assert_eq!(
            "Income".parse::<TransactionKind>().unwrap(),
            TransactionKind::Income
        );
        assert!("transfer".parse::<TransactionKind>().is_err());
    }
}
