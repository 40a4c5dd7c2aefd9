//! Financial engine: parameter snapshot to monthly income/expense breakdown

use serde::{Deserialize, Serialize};

use crate::allocation::SpaceAllocation;
use crate::error::{Result, WarehouseError};
use crate::finance::constants::{DAYS_PER_MONTH, MARKETING_ATTRIBUTION};
use crate::finance::FinancialResult;
use crate::params::{ParamKey, WarehouseParameters};
use crate::types::StorageType;

/// Outcome of one engine run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Computation {
    Ok(FinancialResult),
    Fault { reason: String },
}

impl Computation {
    pub fn is_fault(&self) -> bool {
        matches!(self, Computation::Fault { .. })
    }

    /// The computed result, or the all-zero result on a fault
    pub fn result(&self) -> FinancialResult {
        match self {
            Computation::Ok(result) => *result,
            Computation::Fault { .. } => FinancialResult::zeroed(),
        }
    }

    pub fn profit(&self) -> Option<f64> {
        match self {
            Computation::Ok(result) => Some(result.profit),
            Computation::Fault { .. } => None,
        }
    }

    pub fn into_result(self) -> Result<FinancialResult> {
        match self {
            Computation::Ok(result) => Ok(result),
            Computation::Fault { reason } => Err(WarehouseError::ComputationFault(reason)),
        }
    }
}

/// Stateless monthly model of the warehouse
pub struct FinancialEngine;

impl FinancialEngine {
    /// Compute the monthly breakdown. Never panics and never mutates `params`;
    /// a non-finite figure anywhere in the result is reported as a fault.
    pub fn compute(params: &WarehouseParameters) -> Computation {
        let space = SpaceAllocation::from_params(params);
        let result = Self::compute_with_space(params, &space);

        match result.first_non_finite() {
            None => {
                log::debug!(
                    "Computed income {:.2}, expenses {:.2}, profit {:.2}",
                    result.total_income,
                    result.total_expenses,
                    result.profit
                );
                Computation::Ok(result)
            }
            Some(field) => {
                let reason = format!("{} is not a finite number", field);
                log::error!("Financial computation failed: {}", reason);
                Computation::Fault { reason }
            }
        }
    }

    fn compute_with_space(params: &WarehouseParameters, space: &SpaceAllocation) -> FinancialResult {
        let areas = &space.areas;
        let tariffs = &params.tariffs;
        let loans = &params.loans;
        let risk = params.risk.effective();

        let storage_income = areas.storage * tariffs.storage_fee;

        let loan_interest_rate = loans.loan_interest_rate.max(0.0);
        let loan_amount = areas.loan * loans.average_item_value * loans.item_evaluation;
        let loan_income_raw = loan_amount * (loan_interest_rate / 100.0) * DAYS_PER_MONTH;

        let markup = loans.item_realization_markup / 100.0;
        let realization_income: f64 = StorageType::ALL
            .into_iter()
            .map(|t| {
                let realized_items = space.items[t] * params.realization_shares[t];
                realized_items * loans.average_item_value * markup
            })
            .sum();

        let loan_income_after_realization = loan_income_raw
            * (1.0 - params.realization_shares.loan)
            * (1.0 - risk.default_probability);

        let vip_income = areas.vip * (tariffs.storage_fee + tariffs.vip_extra_fee);
        let short_term_income = areas.short_term * tariffs.short_term_daily_rate * DAYS_PER_MONTH;
        let marketing_income = params.expenses.marketing * MARKETING_ATTRIBUTION;

        let total_income = storage_income
            + loan_income_after_realization
            + realization_income
            + vip_income
            + short_term_income
            + marketing_income;

        let rental_expense = params.total_area * params.rental_cost_per_m2;
        let monthly_expenses = rental_expense + params.expenses.monthly_fixed();
        let one_time_expenses = params.expenses.one_time_total();
        // one-time costs land fully in the evaluated month
        let total_expenses = monthly_expenses + one_time_expenses;

        FinancialResult {
            total_income,
            total_expenses,
            profit: total_income - total_expenses,
            storage_income,
            loan_income_raw,
            loan_income_after_realization,
            vip_income,
            short_term_income,
            realization_income,
            marketing_income,
            rental_expense,
            monthly_expenses,
            one_time_expenses,
            loan_interest_rate,
            daily_storage_fee: tariffs.storage_fee / DAYS_PER_MONTH,
        }
    }

    /// Profit with one parameter overridden; `None` on a fault
    pub fn profit_at(params: &WarehouseParameters, key: ParamKey, value: f64) -> Option<f64> {
        Self::compute(&params.with_param(key, value)).profit()
    }
}
