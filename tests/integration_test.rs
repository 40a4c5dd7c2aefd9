//! Integration tests for warehouse-econ

use approx::assert_relative_eq;
use warehouse_econ::allocation::{allocate, items};
use warehouse_econ::analysis::linspace;
use warehouse_econ::finance::{horizon_cash_flows, npv, MinLoanBasis};
use warehouse_econ::prelude::*;

fn reference_params() -> WarehouseParameters {
    let mut params = WarehouseParameters::default();
    params.total_area = 250.0;
    params.rental_cost_per_m2 = 1000.0;
    params.useful_area_ratio = 0.5;
    params.shelves_per_m2 = 3;
    params.shares = PerType::new(0.5, 0.3, 0.1, 0.1);
    params.tariffs.storage_fee = 1500.0;
    params
}

/// Income is linear in the storage fee (450 m² billed) against 450 000 of
/// expenses, so profit crosses zero at a storage fee of 1000.
fn break_even_params() -> WarehouseParameters {
    let mut params = reference_params();
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
fn test_reference_areas_and_storage_income() {
    let params = reference_params();
    let space = SpaceAllocation::from_params(&params);

    assert_eq!(space.usable_area, 125.0);
    assert_eq!(space.shelf_area, 750.0);
    assert_relative_eq!(space.areas.storage, 375.0, epsilon = 1e-9);
    assert_relative_eq!(space.areas.loan, 225.0, epsilon = 1e-9);
    assert_relative_eq!(space.areas.vip, 75.0, epsilon = 1e-9);
    assert_relative_eq!(space.areas.short_term, 75.0, epsilon = 1e-9);

    let result = FinancialEngine::compute(&params).result();
    assert_relative_eq!(result.storage_income, 562_500.0, epsilon = 1e-6);
}

#[test]
fn test_item_counts() {
    let areas = allocate(250.0, 0.5, 3, &PerType::new(0.5, 0.3, 0.1, 0.1));
    let counts = items(&areas, &PerType::new(5.0, 5.0, 2.0, 4.0));

    assert_relative_eq!(counts.storage, 1875.0, epsilon = 1e-9);
    assert_relative_eq!(counts.loan, 1125.0, epsilon = 1e-9);
    assert_relative_eq!(counts.vip, 150.0, epsilon = 1e-9);
    assert_relative_eq!(counts.short_term, 300.0, epsilon = 1e-9);
}

#[test]
fn test_zero_interest_rate() {
    let params = reference_params().with_param(ParamKey::LoanInterestRate, 0.0);
    let result = FinancialEngine::compute(&params).into_result().unwrap();

    assert_eq!(result.loan_income_raw, 0.0);
    assert_eq!(result.loan_income_after_realization, 0.0);

    let min_loan = MinLoanAmount::compute(&result, &params);
    assert_eq!(min_loan.value, 0.0);
    assert_eq!(min_loan.basis, MinLoanBasis::ZeroRate);
}

#[test]
fn test_all_storage_types_disabled() {
    let mut session = ShareSession::default();
    for t in StorageType::ALL {
        session.disable(t);
    }

    let mut params = reference_params();
    params.shares = *session.shares();
    let result = FinancialEngine::compute(&params).into_result().unwrap();
    let baseline = FinancialEngine::compute(&reference_params()).result();

    assert_eq!(result.total_income, result.marketing_income);
    assert_eq!(result.total_expenses, baseline.total_expenses);
    assert!(result.marketing_income < result.monthly_expenses + result.one_time_expenses);
    assert!(result.profit < 0.0);

    // zero shares cannot pass validation
    assert!(params.validate().is_err());
}

#[test]
fn test_engine_is_deterministic() {
    let params = WarehouseParameters::default();
    let first = FinancialEngine::compute(&params);
    let second = FinancialEngine::compute(&params);

    assert_eq!(first, second);
    let (a, b) = (first.result(), second.result());
    assert_eq!(a.profit.to_bits(), b.profit.to_bits());
    assert_eq!(a.total_income.to_bits(), b.total_income.to_bits());
}

#[test]
fn test_break_even_storage_fee() {
    let params = break_even_params();
    let (lower, upper) = BreakEvenSolver::bracket(1500.0);
    let outcome = BreakEvenSolver::default().find_bep(&params, ParamKey::StorageFee, 1500.0);

    let value = outcome.value().expect("bracket contains a sign change");
    assert!(lower <= value && value <= upper);
    assert_relative_eq!(value, 1000.0, epsilon = 0.01);

    // 450 m² times the fee tolerance bounds the residual profit
    let residual = FinancialEngine::profit_at(&params, ParamKey::StorageFee, value).unwrap();
    assert!(residual.abs() <= 450.0 * 0.01 + 1e-6);
}

#[test]
fn test_break_even_agrees_with_grid_scan() {
    let params = break_even_params();
    let (lower, upper) = BreakEvenSolver::bracket(1500.0);
    let curve = SensitivityScanner::scan(
        &params,
        ParamKey::StorageFee,
        &linspace(lower, upper, 101),
    );
    let grid_value = curve.first_break_even().unwrap();
    let solved = BreakEvenSolver::default()
        .find_bep(&params, ParamKey::StorageFee, 1500.0)
        .value()
        .unwrap();

    // grid spacing is 15
    assert!(grid_value >= solved);
    assert!(grid_value - solved <= 15.0);
}

#[test]
fn test_break_even_not_found_outcomes() {
    let params = WarehouseParameters::default();
    let solver = BreakEvenSolver::default();

    assert!(matches!(
        solver.find_bep(&params, ParamKey::StorageFee, 1500.0),
        BreakEven::NotFound(NotFoundReason::NoSignChange { .. })
    ));
    assert_eq!(
        solver.find_bep(&params, ParamKey::VipExtraFee, 0.0),
        BreakEven::NotFound(NotFoundReason::DegenerateBase)
    );
}

#[test]
fn test_break_even_decreasing_profit() {
    let mut params = break_even_params();
    params.tariffs.storage_fee = 1200.0;
    // income 540 000 against rent 250 000: salary breaks even at 290 000
    let outcome =
        BreakEvenSolver::default().find_bep(&params, ParamKey::SalaryExpense, 250_000.0);

    assert_relative_eq!(outcome.value().unwrap(), 290_000.0, epsilon = 0.01);
}

#[test]
fn test_full_report() {
    let params = WarehouseParameters::default();
    let report = evaluate(&params).unwrap();
    let f = &report.financials;

    assert_eq!(f.profit, f.total_income - f.total_expenses);
    assert_relative_eq!(
        report.ratios.roi,
        f.profit / f.total_expenses * 100.0,
        epsilon = 1e-9
    );
    assert_eq!(report.projection.len() as u32, params.risk.time_horizon);
    assert_eq!(report.projection[0].income, f.total_income);

    let irr = report.ratios.irr.unwrap();
    assert!(irr > 0.0);
    let flows = horizon_cash_flows(
        params.expenses.one_time_total(),
        f.profit,
        params.risk.time_horizon,
    );
    assert!(npv(irr / 100.0, &flows).abs() < 1e-3);
}

#[test]
fn test_irr_missing_without_investment() {
    let mut params = WarehouseParameters::default();
    params.expenses.one_time_setup = 0.0;
    params.expenses.one_time_equipment = 0.0;
    params.expenses.one_time_other = 0.0;

    let result = FinancialEngine::compute(&params).result();
    let ratios = Ratios::compute(&result, &params);
    assert_eq!(ratios.irr, None);
    assert_eq!(ratios.irr_or_zero(), 0.0);
}

#[test]
fn test_what_if_never_mutates_input() {
    let params = WarehouseParameters::default();
    let snapshot = params.clone();

    let _ = SensitivityScanner::scan_default(&params, ParamKey::LoanInterestRate, 10);
    let _ = BreakEvenSolver::default().find_bep(&params, ParamKey::Taxes, 50_000.0);

    assert_eq!(params, snapshot);
}
