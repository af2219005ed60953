//! Compound-interest projection for fixed-rate investments.

/// Projected outcome of holding an investment for its full term.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Projection {
    pub interest: f64,
    pub final_amount: f64,
}

/// Monthly rate whose twelve-fold compounding equals `annual_rate`.
pub fn monthly_rate(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / 12.0) - 1.0
}

/// Projects `principal` over `term_months` at the monthly equivalent of `annual_rate`.
///
/// Expects `principal > 0` and `annual_rate > 0`; callers validate form input
/// before reaching this point. No rounding is applied. A zero term returns the
/// principal unchanged.
pub fn project(principal: f64, annual_rate: f64, term_months: u32) -> Projection {
    let rate = monthly_rate(annual_rate);
    let final_amount = principal * (1.0 + rate).powf(f64::from(term_months));
    Projection {
        interest: final_amount - principal,
        final_amount,
    }
}

/// Principal after an "add money" edit. Negative additions are not a
/// supported operation and contribute nothing.
pub fn apply_top_up(current_principal: f64, added_amount: f64) -> f64 {
    current_principal + added_amount.max(0.0)
}
