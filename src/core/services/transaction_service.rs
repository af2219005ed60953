//! Turns submitted expense/income forms into storable records.

use chrono::{DateTime, Datelike, Utc};

use crate::domain::{NewTransaction, TransactionKind, TransactionRecord};

use super::{invalid, ServiceResult};

/// Validates transaction drafts and fills the denormalized date fields.
pub struct TransactionService;

impl TransactionService {
    /// Checks a draft the way the entry form does before anything is written.
    pub fn validate(draft: &NewTransaction) -> ServiceResult<()> {
        if !draft.value.is_finite() || draft.value <= 0.0 {
            return invalid("value must be a positive amount");
        }
        if draft.description.trim().is_empty() {
            return invalid("description must not be empty");
        }
        if draft.kind == TransactionKind::Expense
            && draft
                .category
                .as_deref()
                .map_or(true, |category| category.trim().is_empty())
        {
            return invalid("expenses require a category");
        }
        Ok(())
    }

    /// Validates `draft` and builds the record to persist, copying the year and
    /// month of `date` into their own fields.
    pub fn build_record(
        draft: NewTransaction,
        id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> ServiceResult<TransactionRecord> {
        Self::validate(&draft)?;
        let category = match draft.kind {
            TransactionKind::Expense => draft.category,
            TransactionKind::Income => None,
        };
        Ok(TransactionRecord {
            id: id.into(),
            kind: draft.kind,
            description: draft.description,
            value: draft.value,
            date: draft.date,
            year: draft.date.year(),
            month: draft.date.month(),
            category,
            created_at: Some(created_at),
        })
    }

    /// True when the stored `year`/`month` still mirror `date`.
    pub fn is_consistent(record: &TransactionRecord) -> bool {
        record.year == record.date.year() && record.month == record.date.month()
    }
}
