pub mod json_backend;

use crate::domain::{
    InvestmentRecord, InvestmentUpdate, NewInvestment, NewTransaction, TransactionKind,
    TransactionRecord, UserId,
};
use crate::errors::Result;

pub use json_backend::JsonDocumentStore;

/// Per-user document collections: expenses, incomes, and investments.
///
/// Reads return a full snapshot of a collection; callers replace whatever they
/// held before rather than merging.
pub trait DocumentStore: Send + Sync {
    fn transactions(&self, user: &UserId, kind: TransactionKind) -> Result<Vec<TransactionRecord>>;
    fn investments(&self, user: &UserId) -> Result<Vec<InvestmentRecord>>;

    /// Validates and stores a new transaction, assigning its id and creation time.
    fn insert_transaction(&self, user: &UserId, draft: NewTransaction)
        -> Result<TransactionRecord>;
    fn insert_investment(&self, user: &UserId, draft: NewInvestment) -> Result<InvestmentRecord>;

    fn update_investment(
        &self,
        user: &UserId,
        id: &str,
        update: InvestmentUpdate,
    ) -> Result<InvestmentRecord>;

    fn delete_transaction(&self, user: &UserId, kind: TransactionKind, id: &str) -> Result<()>;
    fn delete_investment(&self, user: &UserId, id: &str) -> Result<()>;

    /// Expenses followed by incomes, the combined input the aggregation core expects.
    fn all_transactions(&self, user: &UserId) -> Result<Vec<TransactionRecord>> {
        let mut records = self.transactions(user, TransactionKind::Expense)?;
        records.extend(self.transactions(user, TransactionKind::Income)?);
        Ok(records)
    }
}
