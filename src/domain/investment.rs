//! Fixed-rate investment records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{Displayable, Identifiable};
use crate::errors::FinanceError;

/// Product family of an investment. Unknown labels are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InvestmentType {
    #[default]
    Cdb,
    Lci,
    Lca,
    TesouroDireto,
    Outros,
    Custom(String),
}

impl InvestmentType {
    /// The fixed options offered by the investment form, in display order.
    pub const KNOWN: [InvestmentType; 5] = [
        InvestmentType::Cdb,
        InvestmentType::Lci,
        InvestmentType::Lca,
        InvestmentType::TesouroDireto,
        InvestmentType::Outros,
    ];

    pub fn label(&self) -> &str {
        match self {
            InvestmentType::Cdb => "CDB",
            InvestmentType::Lci => "LCI",
            InvestmentType::Lca => "LCA",
            InvestmentType::TesouroDireto => "Tesouro Direto",
            InvestmentType::Outros => "Outros",
            InvestmentType::Custom(label) => label,
        }
    }
}

/// Known labels match ignoring case and runs of whitespace; anything else is
/// kept exactly as written.
impl From<String> for InvestmentType {
    fn from(raw: String) -> Self {
        let words: Vec<&str> = raw.split_whitespace().collect();
        let normalized = words.join(" ");
        InvestmentType::KNOWN
            .into_iter()
            .find(|known| known.label().eq_ignore_ascii_case(&normalized))
            .unwrap_or(InvestmentType::Custom(raw))
    }
}

impl From<InvestmentType> for String {
    fn from(kind: InvestmentType) -> Self {
        match kind {
            InvestmentType::Custom(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl FromStr for InvestmentType {
    type Err = FinanceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FinanceError::Validation(
                "investment type must not be empty".into(),
            ));
        }
        Ok(InvestmentType::from(trimmed.to_string()))
    }
}

impl fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable snapshot of a stored investment.
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentRecord {
    pub id: String,
    pub name: String,
    pub initial_amount: f64,
    pub start_date: NaiveDate,
    pub return_rate: f64,
    pub investment_type: InvestmentType,
    pub term_months: u32,
    pub created_at: Option<DateTime<Utc>>,
}

impl InvestmentRecord {
    pub fn from_document(id: impl Into<String>, doc: InvestmentDocument) -> Self {
        Self {
            id: id.into(),
            name: doc.name,
            initial_amount: doc.initial_amount,
            start_date: doc.start_date,
            return_rate: doc.return_rate,
            investment_type: doc.investment_type,
            term_months: doc.term_months,
            created_at: doc.created_at,
        }
    }

    pub fn to_document(&self) -> InvestmentDocument {
        InvestmentDocument {
            name: self.name.clone(),
            initial_amount: self.initial_amount,
            start_date: self.start_date,
            return_rate: self.return_rate,
            investment_type: self.investment_type.clone(),
            term_months: self.term_months,
            created_at: self.created_at,
        }
    }
}

impl Identifiable for InvestmentRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for InvestmentRecord {
    fn display_label(&self) -> String {
        format!(
            "{} ({}, {:.2}% a.a., {} months)",
            self.name,
            self.investment_type,
            self.return_rate * 100.0,
            self.term_months
        )
    }
}

/// Persisted layout of an investment document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentDocument {
    pub name: String,
    pub initial_amount: f64,
    pub start_date: NaiveDate,
    pub return_rate: f64,
    #[serde(default)]
    pub investment_type: InvestmentType,
    pub term_months: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Form submission for a new investment.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvestment {
    pub name: String,
    pub initial_amount: f64,
    pub start_date: NaiveDate,
    pub return_rate: f64,
    pub investment_type: InvestmentType,
    pub term_months: u32,
}

/// Edit form for an existing investment. `add_money` is added on top of
/// `initial_amount` to produce the stored principal.
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentUpdate {
    pub name: String,
    pub initial_amount: f64,
    pub add_money: f64,
    pub start_date: NaiveDate,
    pub return_rate: f64,
    pub investment_type: InvestmentType,
    pub term_months: u32,
}

impl InvestmentUpdate {
    /// Pre-fills the edit form from the current record with no top-up.
    pub fn from_record(record: &InvestmentRecord) -> Self {
        Self {
            name: record.name.clone(),
            initial_amount: record.initial_amount,
            add_money: 0.0,
            start_date: record.start_date,
            return_rate: record.return_rate,
            investment_type: record.investment_type.clone(),
            term_months: record.term_months,
        }
    }

    pub fn with_top_up(mut self, amount: f64) -> Self {
        self.add_money = amount;
        self
    }
}
