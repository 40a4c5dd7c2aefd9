//! Break-even search by bisection
//!
//! The bracket is `[0.5 * base, 1.5 * base]`. Profit must change sign over
//! it (or vanish at an end); otherwise no break-even point is reported.

use serde::{Deserialize, Serialize};

use crate::analysis::sensitivity::SensitivityScanner;
use crate::engine::FinancialEngine;
use crate::finance::constants::{
    BEP_LOWER_FACTOR, BEP_MAX_ITERATIONS, BEP_TOLERANCE, BEP_UPPER_FACTOR, DEFAULT_SCAN_STEPS,
};
use crate::params::{ParamKey, WarehouseParameters};

/// Why no break-even point was found
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum NotFoundReason {
    /// Base value of zero collapses the bracket to a point
    DegenerateBase,
    /// Profit has the same sign at both ends of the bracket
    NoSignChange { profit_lower: f64, profit_upper: f64 },
    /// The engine faulted while evaluating the bracket
    ComputationFault { value: f64 },
    NotConverged,
}

/// Result of a break-even search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BreakEven {
    Found { value: f64, iterations: usize },
    NotFound(NotFoundReason),
}

impl BreakEven {
    pub fn value(&self) -> Option<f64> {
        match self {
            BreakEven::Found { value, .. } => Some(*value),
            BreakEven::NotFound(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, BreakEven::Found { .. })
    }
}

/// Bisection outcome, with the grid-scan answer when bisection found nothing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenSearch {
    pub solved: BreakEven,
    /// First crossing on the default scan grid; only as precise as the grid
    pub grid_fallback: Option<f64>,
}

impl BreakEvenSearch {
    /// Bisection result if found, else the grid crossing
    pub fn value(&self) -> Option<f64> {
        self.solved.value().or(self.grid_fallback)
    }
}

/// Bisection settings
#[derive(Debug, Clone)]
pub struct BreakEvenSolver {
    /// Absolute tolerance on the parameter value
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for BreakEvenSolver {
    fn default() -> Self {
        Self {
            tolerance: BEP_TOLERANCE,
            max_iterations: BEP_MAX_ITERATIONS,
        }
    }
}

impl BreakEvenSolver {
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Search bracket for a base value, ordered low to high
    pub fn bracket(base_value: f64) -> (f64, f64) {
        let a = base_value * BEP_LOWER_FACTOR;
        let b = base_value * BEP_UPPER_FACTOR;
        (a.min(b), a.max(b))
    }

    /// Find the value of `key` at which monthly profit reaches zero
    pub fn find_bep(&self, params: &WarehouseParameters, key: ParamKey, base_value: f64) -> BreakEven {
        if base_value == 0.0 {
            log::warn!("Break-even search for {} skipped: base value is zero", key);
            return BreakEven::NotFound(NotFoundReason::DegenerateBase);
        }

        let (mut lower, mut upper) = Self::bracket(base_value);
        let profit = |value: f64| FinancialEngine::profit_at(params, key, value);

        let Some(mut profit_lower) = profit(lower) else {
            return BreakEven::NotFound(NotFoundReason::ComputationFault { value: lower });
        };
        let Some(profit_upper) = profit(upper) else {
            return BreakEven::NotFound(NotFoundReason::ComputationFault { value: upper });
        };

        if profit_lower * profit_upper > 0.0 {
            log::warn!(
                "No break-even point for {} in [{:.4}, {:.4}]",
                key,
                lower,
                upper
            );
            return BreakEven::NotFound(NotFoundReason::NoSignChange {
                profit_lower,
                profit_upper,
            });
        }
        if profit_lower == 0.0 {
            return self.found(key, lower, 0);
        }
        if profit_upper == 0.0 {
            return self.found(key, upper, 0);
        }

        for iteration in 1..=self.max_iterations {
            let mid = lower + (upper - lower) / 2.0;
            let Some(profit_mid) = profit(mid) else {
                return BreakEven::NotFound(NotFoundReason::ComputationFault { value: mid });
            };

            if profit_mid == 0.0 || (upper - lower) / 2.0 < self.tolerance {
                return self.found(key, mid, iteration);
            }

            if profit_mid.signum() == profit_lower.signum() {
                lower = mid;
                profit_lower = profit_mid;
            } else {
                upper = mid;
            }
        }

        log::warn!(
            "Break-even search for {} did not converge in {} iterations",
            key,
            self.max_iterations
        );
        BreakEven::NotFound(NotFoundReason::NotConverged)
    }

    /// Bisect around `base_value`; on failure scan the default range of `key`
    /// and report its first crossing
    pub fn search(&self, params: &WarehouseParameters, key: ParamKey, base_value: f64) -> BreakEvenSearch {
        let solved = self.find_bep(params, key, base_value);
        if solved.is_found() {
            return BreakEvenSearch {
                solved,
                grid_fallback: None,
            };
        }

        let grid_fallback =
            SensitivityScanner::scan_default(params, key, DEFAULT_SCAN_STEPS).first_break_even();
        if let Some(value) = grid_fallback {
            log::info!("Grid break-even point for {}: {:.4}", key, value);
        }
        BreakEvenSearch {
            solved,
            grid_fallback,
        }
    }

    fn found(&self, key: ParamKey, value: f64, iterations: usize) -> BreakEven {
        log::info!("Break-even point for {}: {:.4}", key, value);
        BreakEven::Found { value, iterations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PerType;
    use approx::assert_relative_eq;

    /// Income is 450 m² × storage fee, expenses are a flat 450 000,
    /// so the break-even storage fee is exactly 1000.
    fn linear_params() -> WarehouseParameters {
        let mut params = WarehouseParameters::default();
        params.loans.loan_interest_rate = 0.0;
        params.tariffs.short_term_daily_rate = 0.0;
        params.realization_shares = PerType::splat(0.0);
        params.expenses.salary = 200_000.0;
        params.expenses.miscellaneous = 0.0;
        params.expenses.depreciation = 0.0;
        params.expenses.marketing = 0.0;
        params.expenses.insurance = 0.0;
        params.expenses.taxes = 0.0;
        params.expenses.one_time_setup = 0.0;
        params.expenses.one_time_equipment = 0.0;
        params.expenses.one_time_other = 0.0;
        params
    }

    #[test]
    fn test_finds_storage_fee_bep() {
        let params = linear_params();
        let outcome = BreakEvenSolver::default().find_bep(&params, ParamKey::StorageFee, 1500.0);

        let value = outcome.value().unwrap();
        assert_relative_eq!(value, 1000.0, epsilon = BEP_TOLERANCE);
        assert!((750.0..=2250.0).contains(&value));
    }

    #[test]
    fn test_same_sign_is_not_found() {
        let params = WarehouseParameters::default();
        let outcome = BreakEvenSolver::default().find_bep(&params, ParamKey::StorageFee, 1500.0);

        match outcome {
            BreakEven::NotFound(NotFoundReason::NoSignChange {
                profit_lower,
                profit_upper,
            }) => {
                assert!(profit_lower > 0.0);
                assert!(profit_upper > 0.0);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_zero_base_is_degenerate() {
        let outcome = BreakEvenSolver::default().find_bep(
            &WarehouseParameters::default(),
            ParamKey::VipExtraFee,
            0.0,
        );
        assert_eq!(outcome, BreakEven::NotFound(NotFoundReason::DegenerateBase));
    }

    #[test]
    fn test_boundary_root_is_returned() {
        let params = linear_params();
        let outcome = BreakEvenSolver::default().find_bep(&params, ParamKey::StorageFee, 2000.0);

        assert_eq!(
            outcome,
            BreakEven::Found {
                value: 1000.0,
                iterations: 0
            }
        );
    }

    #[test]
    fn test_negative_base_orders_bracket() {
        assert_eq!(BreakEvenSolver::bracket(-10.0), (-15.0, -5.0));
        assert_eq!(BreakEvenSolver::bracket(10.0), (5.0, 15.0));
    }

    #[test]
    fn test_fault_is_reported() {
        let params = linear_params().with_param(ParamKey::AverageItemValue, f64::NAN);
        let outcome = BreakEvenSolver::default().find_bep(&params, ParamKey::StorageFee, 1500.0);

        assert!(matches!(
            outcome,
            BreakEven::NotFound(NotFoundReason::ComputationFault { .. })
        ));
    }

    #[test]
    fn test_search_falls_back_to_grid() {
        // profit = 75 × vip extra fee − 45 000, zero at 600
        let params = linear_params().with_param(ParamKey::StorageFee, 900.0);
        let search = BreakEvenSolver::default().search(&params, ParamKey::VipExtraFee, 0.0);

        assert_eq!(search.solved, BreakEven::NotFound(NotFoundReason::DegenerateBase));
        let value = search.grid_fallback.unwrap();
        // grid spacing over 500..1500 is 1000 / 99
        assert!(value >= 600.0 && value < 600.0 + 1000.0 / 99.0);
        assert_eq!(search.value(), Some(value));
    }

    #[test]
    fn test_search_skips_grid_when_found() {
        let search = BreakEvenSolver::default().search(&linear_params(), ParamKey::StorageFee, 1500.0);

        assert!(search.solved.is_found());
        assert_eq!(search.grid_fallback, None);
    }
}
