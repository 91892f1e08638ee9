/// Underwriting constants applied by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct UnderwritingAssumptions {
    /// Share of gross rent consumed by operating expenses.
    pub expense_ratio: f64,
    pub down_payment_ratio: f64,
    pub annual_interest_rate: f64,
    pub loan_term_months: i32,
    /// Share of ARV lost to commissions and closing on resale.
    pub selling_cost_ratio: f64,
    pub max_offer_factor: f64,
    pub stretch_offer_factor: f64,
}

impl Default for UnderwritingAssumptions {
    fn default() -> Self {
        Self {
            expense_ratio: 0.4,
            down_payment_ratio: 0.25,
            annual_interest_rate: 0.07,
            loan_term_months: 360,
            selling_cost_ratio: 0.08,
            max_offer_factor: 0.7,
            stretch_offer_factor: 0.8,
        }
    }
}

impl UnderwritingAssumptions {
    pub(crate) fn net_income_ratio(&self) -> f64 {
        1.0 - self.expense_ratio
    }

    /// Fixed-rate amortized payment for the financed share of `price`.
    pub fn monthly_payment(&self, price: f64) -> f64 {
        let principal = price * (1.0 - self.down_payment_ratio);
        let rate = self.annual_interest_rate / 12.0;
        if rate <= 0.0 {
            return principal / f64::from(self.loan_term_months);
        }
        principal * rate / (1.0 - (1.0 + rate).powi(-self.loan_term_months))
    }
}
