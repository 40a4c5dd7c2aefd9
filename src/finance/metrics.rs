//! Profitability ratios, IRR and the minimum loan amount

use serde::{Deserialize, Serialize};

use crate::error::{Result, WarehouseError};
use crate::finance::constants::{
    IRR_EPSILON, IRR_INITIAL_GUESS, IRR_MAX_ITERATIONS, IRR_MAX_RATE, IRR_MIN_RATE,
};
use crate::finance::FinancialResult;
use crate::params::WarehouseParameters;
use crate::types::Money;

/// Profit as a percentage of income
pub fn profit_margin(result: &FinancialResult) -> f64 {
    if result.total_income > 0.0 {
        result.profit / result.total_income * 100.0
    } else {
        0.0
    }
}

/// Profit as a percentage of expenses
pub fn profitability(result: &FinancialResult) -> f64 {
    if result.total_expenses > 0.0 {
        result.profit / result.total_expenses * 100.0
    } else {
        0.0
    }
}

/// Return on investment, in percent
pub fn roi(total_income: Money, total_expenses: Money) -> f64 {
    if total_expenses == 0.0 {
        return 0.0;
    }
    (total_income - total_expenses) / total_expenses * 100.0
}

/// Net present value at a periodic rate
pub fn npv(rate: f64, cash_flows: &[f64]) -> f64 {
    let one_plus_r = 1.0 + rate;
    cash_flows
        .iter()
        .enumerate()
        .map(|(t, cf)| cf / one_plus_r.powi(t as i32))
        .sum()
}

fn npv_derivative(rate: f64, cash_flows: &[f64]) -> f64 {
    let one_plus_r = 1.0 + rate;
    cash_flows
        .iter()
        .enumerate()
        .skip(1)
        .map(|(t, cf)| -(t as f64) * cf / one_plus_r.powi(t as i32 + 1))
        .sum()
}

/// Internal rate of return of a periodic cash-flow series, in percent.
///
/// Newton-Raphson from a 10% guess; if that stalls, bisection over the
/// clamp bracket. A series without a sign change has no IRR.
pub fn irr(cash_flows: &[f64]) -> Result<f64> {
    let has_positive = cash_flows.iter().any(|cf| *cf > 0.0);
    let has_negative = cash_flows.iter().any(|cf| *cf < 0.0);
    if cash_flows.len() < 2 || !has_positive || !has_negative {
        return Err(WarehouseError::NoSignChange);
    }

    if let Some(rate) = newton_raphson_irr(cash_flows) {
        return Ok(rate * 100.0);
    }

    bisection_irr(cash_flows).map(|rate| rate * 100.0)
}

fn newton_raphson_irr(cash_flows: &[f64]) -> Option<f64> {
    let mut rate = IRR_INITIAL_GUESS;

    for _ in 0..IRR_MAX_ITERATIONS {
        let value = npv(rate, cash_flows);
        if !value.is_finite() {
            return None;
        }
        if value.abs() < IRR_EPSILON {
            return Some(rate);
        }

        let slope = npv_derivative(rate, cash_flows);
        if slope == 0.0 || !slope.is_finite() {
            return None;
        }

        rate = (rate - value / slope).clamp(IRR_MIN_RATE, IRR_MAX_RATE);
    }

    None
}

fn bisection_irr(cash_flows: &[f64]) -> Result<f64> {
    let (mut low, mut high) = (IRR_MIN_RATE, IRR_MAX_RATE);
    let mut npv_low = npv(low, cash_flows);
    let npv_high = npv(high, cash_flows);

    if npv_low * npv_high > 0.0 {
        return Err(WarehouseError::ConvergenceFailure { iterations: 0 });
    }

    for _ in 0..IRR_MAX_ITERATIONS {
        let mid = low + (high - low) / 2.0;
        let npv_mid = npv(mid, cash_flows);
        if npv_mid.abs() < IRR_EPSILON || (high - low) / 2.0 < IRR_EPSILON {
            return Ok(mid);
        }
        if npv_mid.signum() == npv_low.signum() {
            low = mid;
            npv_low = npv_mid;
        } else {
            high = mid;
        }
    }

    Err(WarehouseError::ConvergenceFailure {
        iterations: IRR_MAX_ITERATIONS,
    })
}

/// Cash flows of the planning horizon: the one-time investment followed by
/// `months` identical monthly profits
pub fn horizon_cash_flows(initial_investment: Money, profit: Money, months: u32) -> Vec<f64> {
    std::iter::once(-initial_investment)
        .chain(std::iter::repeat(profit).take(months as usize))
        .collect()
}

/// Derived ratios of one result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ratios {
    pub profit_margin: f64,
    pub profitability: f64,
    pub roi: f64,
    /// `None` when the cash flows have no IRR or the solver failed
    pub irr: Option<f64>,
}

impl Ratios {
    pub fn compute(result: &FinancialResult, params: &WarehouseParameters) -> Self {
        let horizon = params.risk.effective().time_horizon;
        let flows = horizon_cash_flows(params.expenses.one_time_total(), result.profit, horizon);

        let irr = match irr(&flows) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("IRR unavailable: {}", e);
                None
            }
        };

        Self {
            profit_margin: profit_margin(result),
            profitability: profitability(result),
            roi: roi(result.total_income, result.total_expenses),
            irr,
        }
    }

    /// IRR with failures reported as zero
    pub fn irr_or_zero(&self) -> f64 {
        self.irr.unwrap_or(0.0)
    }
}

/// Which formula produced a minimum loan amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinLoanBasis {
    /// Growth, default risk, liquidity and safety factored in
    RiskAdjusted,
    /// Daily storage fee over the daily rate
    Basic,
    /// Interest rate is zero; no loan covers the storage fee
    ZeroRate,
    /// Every loan defaults or none is recoverable; no loan covers the storage fee
    TotalDefault,
}

/// Smallest loan whose daily interest covers the daily storage fee
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinLoanAmount {
    pub value: Money,
    pub basis: MinLoanBasis,
}

impl MinLoanAmount {
    pub fn compute(result: &FinancialResult, params: &WarehouseParameters) -> Self {
        let rate = params.loans.loan_interest_rate;
        let risk = &params.risk;

        if rate <= 0.0 {
            return Self {
                value: 0.0,
                basis: MinLoanBasis::ZeroRate,
            };
        }

        if risk.enabled {
            let recoverable = (1.0 - risk.default_probability) * risk.liquidity_factor;
            if recoverable <= 0.0 {
                log::warn!(
                    "Minimum loan amount undefined at default probability {}",
                    risk.default_probability
                );
                return Self {
                    value: 0.0,
                    basis: MinLoanBasis::TotalDefault,
                };
            }

            let avg_growth = 1.0 + risk.monthly_rent_growth * (f64::from(risk.time_horizon) / 2.0);
            let adjusted_daily_fee = result.daily_storage_fee * avg_growth;
            let value = risk.safety_factor * adjusted_daily_fee
                / ((rate / 100.0) * recoverable);
            Self {
                value,
                basis: MinLoanBasis::RiskAdjusted,
            }
        } else {
            Self {
                value: result.daily_storage_fee / (rate / 100.0),
                basis: MinLoanBasis::Basic,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn result_with(income: f64, expenses: f64) -> FinancialResult {
        FinancialResult {
            total_income: income,
            total_expenses: expenses,
            profit: income - expenses,
            ..FinancialResult::zeroed()
        }
    }

    #[test]
    fn test_margin_and_profitability() {
        let result = result_with(200.0, 150.0);
        assert_relative_eq!(profit_margin(&result), 25.0);
        assert_relative_eq!(profitability(&result), 100.0 / 3.0, epsilon = 1e-9);
        assert_relative_eq!(roi(200.0, 150.0), 100.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ratios_guard_zero_denominators() {
        let result = result_with(0.0, 0.0);
        assert_eq!(profit_margin(&result), 0.0);
        assert_eq!(profitability(&result), 0.0);
        assert_eq!(roi(100.0, 0.0), 0.0);
    }

    #[test]
    fn test_irr_single_period() {
        assert_relative_eq!(irr(&[-100.0, 110.0]).unwrap(), 10.0, epsilon = 1e-6);
    }

    #[test]
    fn test_irr_annuity() {
        let rate = irr(&[-1000.0, 500.0, 500.0, 500.0]).unwrap();
        assert_relative_eq!(rate, 23.375, epsilon = 0.01);
        assert!(npv(rate / 100.0, &[-1000.0, 500.0, 500.0, 500.0]).abs() < 1e-4);
    }

    #[test]
    fn test_irr_negative_rate() {
        let rate = irr(&[-1000.0, 300.0, 300.0]).unwrap();
        assert!(rate < 0.0);
        assert!(npv(rate / 100.0, &[-1000.0, 300.0, 300.0]).abs() < 1e-4);
    }

    #[test]
    fn test_irr_without_sign_change() {
        assert!(matches!(
            irr(&[0.0, 100.0, 100.0]),
            Err(WarehouseError::NoSignChange)
        ));
        assert!(matches!(irr(&[-5.0]), Err(WarehouseError::NoSignChange)));
    }

    #[test]
    fn test_horizon_cash_flows() {
        assert_eq!(
            horizon_cash_flows(350.0, 100.0, 3),
            vec![-350.0, 100.0, 100.0, 100.0]
        );
    }

    #[test]
    fn test_min_loan_risk_adjusted() {
        let params = WarehouseParameters::default();
        let result = FinancialResult {
            daily_storage_fee: 50.0,
            ..FinancialResult::zeroed()
        };
        let min_loan = MinLoanAmount::compute(&result, &params);

        let expected = 1.2 * (50.0 * 1.03) / (0.00317 * 0.95 * 1.0);
        assert_eq!(min_loan.basis, MinLoanBasis::RiskAdjusted);
        assert_relative_eq!(min_loan.value, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_min_loan_basic_and_zero_rate() {
        let mut params = WarehouseParameters::default();
        params.risk.enabled = false;
        let result = FinancialResult {
            daily_storage_fee: 50.0,
            ..FinancialResult::zeroed()
        };

        let basic = MinLoanAmount::compute(&result, &params);
        assert_eq!(basic.basis, MinLoanBasis::Basic);
        assert_relative_eq!(basic.value, 50.0 / 0.00317, epsilon = 1e-6);

        params.loans.loan_interest_rate = 0.0;
        let zero = MinLoanAmount::compute(&result, &params);
        assert_eq!(zero.basis, MinLoanBasis::ZeroRate);
        assert_eq!(zero.value, 0.0);
    }

    #[test]
    fn test_min_loan_certain_default() {
        let mut params = WarehouseParameters::default();
        params.risk.default_probability = 1.0;
        let result = FinancialResult {
            daily_storage_fee: 50.0,
            ..FinancialResult::zeroed()
        };

        let min_loan = MinLoanAmount::compute(&result, &params);
        assert_eq!(min_loan.basis, MinLoanBasis::TotalDefault);
        assert_eq!(min_loan.value, 0.0);
        assert!(serde_json::to_string(&min_loan).unwrap().contains("total_default"));
    }
}
