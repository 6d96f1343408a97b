use crate::domain::money::Money;
use crate::domain::rates::LoanRates;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Inputs for a loan payment calculation, assembled by the caller from the
/// vehicle price and the referenced finance option.
///
/// The principal is `price - down_payment - trade_in_value` and may be zero
/// or negative; the payment then comes out zero or negative accordingly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanInputs {
    pub principal: Money,
    pub annual_rate_percent: Decimal,
    pub term_months: u32,
    pub has_insurance: bool,
    /// Base for the insurance surcharge.
    pub vehicle_price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanQuote {
    pub monthly_payment: Money,
    pub monthly_insurance: Money,
    pub total_monthly_payment: Money,
    /// `total_monthly_payment` over the full term.
    pub total_cost: Money,
}

impl LoanQuote {
    /// Insurance accrued over the whole term, the value the audit record
    /// persists.
    pub fn insurance_over_term(&self, term_months: u32) -> Money {
        self.monthly_insurance * Decimal::from(term_months)
    }
}

/// Computes fixed-rate amortized monthly payments.
pub struct LoanCalculator {
    pub rates: LoanRates,
}

impl LoanCalculator {
    pub fn new(rates: LoanRates) -> Self {
        Self { rates }
    }

    /// Quotes the monthly payment for a fixed-rate loan.
    ///
    /// Precondition: `term_months >= 1`. Zero-length terms divide by zero
    /// and must be rejected by input validation before this runs.
    pub fn quote(&self, inputs: &LoanInputs) -> LoanQuote {
        let monthly_rate = inputs.annual_rate_percent / dec!(100) / dec!(12);
        let term = Decimal::from(inputs.term_months);

        let monthly_payment = if monthly_rate > Decimal::ZERO {
            let growth = (Decimal::ONE + monthly_rate).powi(inputs.term_months as i64);
            inputs.principal * (monthly_rate * growth / (growth - Decimal::ONE))
        } else {
            inputs.principal / term
        };

        let monthly_insurance = if inputs.has_insurance {
            inputs.vehicle_price * (self.rates.insurance_yearly_fraction / dec!(12))
        } else {
            Money::ZERO
        };

        let total_monthly_payment = monthly_payment + monthly_insurance;
        let total_cost = total_monthly_payment * term;

        LoanQuote {
            monthly_payment,
            monthly_insurance,
            total_monthly_payment,
            total_cost,
        }
    }
}
