//! # warehouse-econ
//!
//! Monthly economics of a self-storage warehouse.
//!
//! Given physical, tariff and risk parameters the model derives shelf area per
//! storage type, item counts, the income/expense breakdown, profitability
//! ratios, break-even points and multi-month projections.
//!
//! ## Example
//!
//! ```rust,no_run
//! use warehouse_econ::prelude::*;
//!
//! let params = WarehouseParameters::default();
//! let report = evaluate(&params).expect("valid parameters");
//! println!("profit: {:.2}", report.financials.profit);
//!
//! let bep = BreakEvenSolver::default().find_bep(&params, ParamKey::StorageFee, 1500.0);
//! if let Some(fee) = bep.value() {
//!     println!("break-even storage fee: {:.2}", fee);
//! }
//! ```

pub mod allocation;
pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod finance;
pub mod params;
pub mod report;
pub mod types;

pub mod prelude {
    //! Commonly used types and functions
    pub use crate::allocation::{ShareSession, SpaceAllocation};
    pub use crate::analysis::{
        BreakEven, BreakEvenSearch, BreakEvenSolver, NotFoundReason, ProjectionGrowth, SensitivityCurve,
        SensitivityScanner,
    };
    pub use crate::engine::{Computation, FinancialEngine};
    pub use crate::error::{Result, WarehouseError};
    pub use crate::finance::{FinancialResult, MinLoanAmount, Ratios};
    pub use crate::params::{ParamKey, WarehouseParameters};
    pub use crate::report::{evaluate, ScenarioReport};
    pub use crate::types::*;
}
