//! Monthly income/expense breakdown

use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

/// Output of one engine run. All amounts are monthly except `one_time_expenses`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialResult {
    pub total_income: Money,
    pub total_expenses: Money,
    pub profit: Money,

    pub storage_income: Money,
    /// Gross monthly interest before realization and default discounts
    pub loan_income_raw: Money,
    pub loan_income_after_realization: Money,
    pub vip_income: Money,
    pub short_term_income: Money,
    pub realization_income: Money,
    pub marketing_income: Money,

    pub rental_expense: Money,
    pub monthly_expenses: Money,
    pub one_time_expenses: Money,

    /// Daily loan rate actually used, after clamping at zero
    pub loan_interest_rate: Rate,
    pub daily_storage_fee: Money,
}

impl FinancialResult {
    /// All-zero result
    pub fn zeroed() -> Self {
        Self::default()
    }

    pub fn is_zeroed(&self) -> bool {
        *self == Self::zeroed()
    }

    pub fn is_profitable(&self) -> bool {
        self.profit > 0.0
    }

    pub(crate) fn fields(&self) -> [(&'static str, f64); 15] {
        [
            ("total_income", self.total_income),
            ("total_expenses", self.total_expenses),
            ("profit", self.profit),
            ("storage_income", self.storage_income),
            ("loan_income_raw", self.loan_income_raw),
            ("loan_income_after_realization", self.loan_income_after_realization),
            ("vip_income", self.vip_income),
            ("short_term_income", self.short_term_income),
            ("realization_income", self.realization_income),
            ("marketing_income", self.marketing_income),
            ("rental_expense", self.rental_expense),
            ("monthly_expenses", self.monthly_expenses),
            ("one_time_expenses", self.one_time_expenses),
            ("loan_interest_rate", self.loan_interest_rate),
            ("daily_storage_fee", self.daily_storage_fee),
        ]
    }

    /// First field that is NaN or infinite
    pub fn first_non_finite(&self) -> Option<&'static str> {
        self.fields()
            .into_iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(name, _)| name)
    }
}
