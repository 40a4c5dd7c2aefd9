//! Month-by-month projection over the planning horizon

use serde::{Deserialize, Serialize};

use crate::analysis::sensitivity::linspace;
use crate::finance::constants::{DEFAULT_EXPENSE_GROWTH, DEFAULT_INCOME_GROWTH};
use crate::finance::FinancialResult;
use crate::types::Money;

/// Total growth of income and expenses between the first and last month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionGrowth {
    pub income_growth: f64,
    pub expense_growth: f64,
}

impl Default for ProjectionGrowth {
    fn default() -> Self {
        Self {
            income_growth: DEFAULT_INCOME_GROWTH,
            expense_growth: DEFAULT_EXPENSE_GROWTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthProjection {
    /// 1-based month number
    pub month: u32,
    pub income: Money,
    pub expenses: Money,
    pub profit: Money,
    pub cumulative_profit: Money,
}

/// Linear ramp from the base result to the grown figures in the last month
pub fn project(result: &FinancialResult, months: u32, growth: ProjectionGrowth) -> Vec<MonthProjection> {
    let steps = months as usize;
    let income = linspace(
        result.total_income,
        result.total_income * (1.0 + growth.income_growth),
        steps,
    );
    let expenses = linspace(
        result.total_expenses,
        result.total_expenses * (1.0 + growth.expense_growth),
        steps,
    );

    let mut cumulative_profit = 0.0;
    income
        .into_iter()
        .zip(expenses)
        .zip(1..)
        .map(|((income, expenses), month)| {
            let profit = income - expenses;
            cumulative_profit += profit;
            MonthProjection {
                month,
                income,
                expenses,
                profit,
                cumulative_profit,
            }
        })
        .collect()
}
