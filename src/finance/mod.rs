//! Finance module - results, ratios, breakdowns and model constants

pub mod breakdown;
pub mod constants;
pub mod metrics;
pub mod result;

pub use breakdown::{breakdown, StorageTypeBreakdown};
pub use metrics::{
    horizon_cash_flows, irr, npv, profit_margin, profitability, roi, MinLoanAmount,
    MinLoanBasis, Ratios,
};
pub use result::FinancialResult;
