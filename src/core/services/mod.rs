pub mod investment_service;
pub mod summary_service;
pub mod transaction_service;

pub use investment_service::{InvestmentEstimate, InvestmentService, PortfolioTotals};
pub use summary_service::{DashboardSummary, SummaryService};
pub use transaction_service::TransactionService;

use crate::errors::FinanceError;

pub type ServiceResult<T> = Result<T, FinanceError>;

/// Shorthand for a form-validation failure.
pub(crate) fn invalid<T>(message: impl Into<String>) -> ServiceResult<T> {
    Err(FinanceError::Validation(message.into()))
}
