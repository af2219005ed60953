//! Value types shared by the aggregation core, the services, and the store.

pub mod common;
pub mod filter;
pub mod investment;
pub mod transaction;

pub use common::{Displayable, Identifiable, UserId};
pub use filter::{CategoryFilter, FilterState, MonthFilter, ALL_SENTINEL};
pub use investment::{
    InvestmentDocument, InvestmentRecord, InvestmentType, InvestmentUpdate, NewInvestment,
};
pub use transaction::{NewTransaction, TransactionDocument, TransactionKind, TransactionRecord};
