//! Scenario evaluation and the flat summary table

use serde::{Deserialize, Serialize};

use crate::allocation::SpaceAllocation;
use crate::analysis::{project, MonthProjection, ProjectionGrowth};
use crate::engine::FinancialEngine;
use crate::error::Result;
use crate::finance::{breakdown, FinancialResult, MinLoanAmount, MinLoanBasis, Ratios, StorageTypeBreakdown};
use crate::params::WarehouseParameters;

/// Everything derived from one parameter snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub space: SpaceAllocation,
    pub financials: FinancialResult,
    pub ratios: Ratios,
    pub min_loan: MinLoanAmount,
    pub breakdown: Vec<StorageTypeBreakdown>,
    pub projection: Vec<MonthProjection>,
}

/// Validate, then run the full model. Invalid input is never computed.
pub fn evaluate(params: &WarehouseParameters) -> Result<ScenarioReport> {
    evaluate_with_growth(params, ProjectionGrowth::default())
}

pub fn evaluate_with_growth(
    params: &WarehouseParameters,
    growth: ProjectionGrowth,
) -> Result<ScenarioReport> {
    params.validate()?;

    let space = SpaceAllocation::from_params(params);
    let financials = FinancialEngine::compute(params).into_result()?;
    let ratios = Ratios::compute(&financials, params);
    let min_loan = MinLoanAmount::compute(&financials, params);
    let breakdown = breakdown(&financials, &space, params);
    let projection = project(
        &financials,
        params.risk.effective().time_horizon,
        growth,
    );

    Ok(ScenarioReport {
        space,
        financials,
        ratios,
        min_loan,
        breakdown,
        projection,
    })
}

impl ScenarioReport {
    /// Label/value rows of the summary export
    pub fn table(&self, params: &WarehouseParameters) -> Vec<(String, f64)> {
        let min_loan_label = match self.min_loan.basis {
            MinLoanBasis::RiskAdjusted => "Minimum loan amount (risk-adjusted)",
            MinLoanBasis::Basic | MinLoanBasis::ZeroRate => "Minimum loan amount (basic)",
            MinLoanBasis::TotalDefault => "Minimum loan amount (certain default)",
        };

        vec![
            ("Total income".to_string(), self.financials.total_income),
            ("Total expenses".to_string(), self.financials.total_expenses),
            ("Profit".to_string(), self.financials.profit),
            ("Profit margin (%)".to_string(), self.ratios.profit_margin),
            ("Profitability (%)".to_string(), self.ratios.profitability),
            ("ROI (%)".to_string(), self.ratios.roi),
            ("IRR (%)".to_string(), self.ratios.irr_or_zero()),
            ("Realization income".to_string(), self.financials.realization_income),
            ("Marketing income".to_string(), self.financials.marketing_income),
            (min_loan_label.to_string(), self.min_loan.value),
            ("One-time expenses".to_string(), self.financials.one_time_expenses),
            ("Taxes (monthly)".to_string(), params.expenses.taxes),
            ("Insurance (monthly)".to_string(), params.expenses.insurance),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WarehouseError;

    #[test]
    fn test_evaluate_defaults() {
        let params = WarehouseParameters::default();
        let report = evaluate(&params).unwrap();

        assert_eq!(report.projection.len(), 6);
        assert_eq!(report.breakdown.len(), 4);
        assert!(report.ratios.irr.is_some());
        assert_eq!(report.min_loan.basis, MinLoanBasis::RiskAdjusted);

        let table = report.table(&params);
        assert_eq!(table.len(), 13);
        assert_eq!(table[2], ("Profit".to_string(), report.financials.profit));
    }

    #[test]
    fn test_invalid_input_is_not_computed() {
        let mut params = WarehouseParameters::default();
        params.useful_area_ratio = 1.5;

        let err = evaluate(&params).unwrap_err();
        assert!(matches!(err, WarehouseError::Validation(_)));
    }

    #[test]
    fn test_certain_default_is_rejected() {
        let params = WarehouseParameters::default()
            .with_param(crate::params::ParamKey::DefaultProbability, 1.0);

        let err = evaluate(&params).unwrap_err();
        assert!(err.messages().iter().any(|m| m.contains("Default probability")));
    }

    #[test]
    fn test_report_serializes() {
        let report = evaluate(&WarehouseParameters::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert!(json["financials"]["profit"].is_number());
        assert_eq!(json["min_loan"]["basis"], "risk_adjusted");
    }
}
