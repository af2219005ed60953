//! Validation, edits, and projections for investments.

use chrono::{DateTime, Utc};

use crate::core::projection::{self, Projection};
use crate::domain::{InvestmentRecord, InvestmentType, InvestmentUpdate, NewInvestment};

use super::{invalid, ServiceResult};

/// Projection attached to a single investment for display.
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentEstimate {
    pub id: String,
    pub name: String,
    pub principal: f64,
    pub projection: Projection,
}

/// Sums across every investment of a user.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PortfolioTotals {
    pub count: usize,
    pub principal: f64,
    pub interest: f64,
    pub final_amount: f64,
}

pub struct InvestmentService;

impl InvestmentService {
    fn validate_terms(
        name: &str,
        amount: f64,
        rate: f64,
        term_months: u32,
        investment_type: &InvestmentType,
    ) -> ServiceResult<()> {
        if name.trim().is_empty() {
            return invalid("investment name must not be empty");
        }
        if !amount.is_finite() || amount <= 0.0 {
            return invalid("initial amount must be positive");
        }
        if !rate.is_finite() || rate <= 0.0 {
            return invalid("annual return rate must be positive");
        }
        if term_months == 0 {
            return invalid("term must be at least one month");
        }
        if investment_type.label().trim().is_empty() {
            return invalid("investment type must not be empty");
        }
        Ok(())
    }

    pub fn validate(draft: &NewInvestment) -> ServiceResult<()> {
        Self::validate_terms(
            &draft.name,
            draft.initial_amount,
            draft.return_rate,
            draft.term_months,
            &draft.investment_type,
        )
    }

    pub fn build_record(
        draft: NewInvestment,
        id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> ServiceResult<InvestmentRecord> {
        Self::validate(&draft)?;
        Ok(InvestmentRecord {
            id: id.into(),
            name: draft.name,
            initial_amount: draft.initial_amount,
            start_date: draft.start_date,
            return_rate: draft.return_rate,
            investment_type: draft.investment_type,
            term_months: draft.term_months,
            created_at: Some(created_at),
        })
    }

    /// Applies an edit form to `record`. The stored principal becomes
    /// `initial_amount + add_money`; id and creation time are preserved.
    pub fn apply_update(
        record: &InvestmentRecord,
        update: InvestmentUpdate,
    ) -> ServiceResult<InvestmentRecord> {
        if !update.add_money.is_finite() || update.add_money < 0.0 {
            return invalid("added amount must not be negative");
        }
        Self::validate_terms(
            &update.name,
            update.initial_amount,
            update.return_rate,
            update.term_months,
            &update.investment_type,
        )?;
        Ok(InvestmentRecord {
            id: record.id.clone(),
            name: update.name,
            initial_amount: projection::apply_top_up(update.initial_amount, update.add_money),
            start_date: update.start_date,
            return_rate: update.return_rate,
            investment_type: update.investment_type,
            term_months: update.term_months,
            created_at: record.created_at,
        })
    }

    pub fn estimate(record: &InvestmentRecord) -> InvestmentEstimate {
        InvestmentEstimate {
            id: record.id.clone(),
            name: record.name.clone(),
            principal: record.initial_amount,
            projection: projection::project(
                record.initial_amount,
                record.return_rate,
                record.term_months,
            ),
        }
    }

    pub fn portfolio(records: &[InvestmentRecord]) -> PortfolioTotals {
        records.iter().map(Self::estimate).fold(
            PortfolioTotals::default(),
            |mut totals, estimate| {
                totals.count += 1;
                totals.principal += estimate.principal;
                totals.interest += estimate.projection.interest;
                totals.final_amount += estimate.projection.final_amount;
                totals
            },
        )
    }

    /// Most recently created first, matching the investment list.
    pub fn sorted(records: &[InvestmentRecord]) -> Vec<InvestmentRecord> {
        let mut ordered = records.to_vec();
        ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        ordered
    }
}
