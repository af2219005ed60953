//! Pure computations over record snapshots, plus the services and view-model built on them.

pub mod aggregation;
pub mod dashboard;
pub mod dates;
pub mod projection;
pub mod services;
pub mod utils;

pub use aggregation::{OverallTotals, PeriodTotals};
pub use dashboard::Dashboard;
pub use dates::DateRange;
pub use projection::Projection;
