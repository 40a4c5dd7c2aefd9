//! Modeling constants and defaults
//!
//! Fixed factors of the monthly model and the tolerances used by the solvers

/// Billing days per month
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Revenue attributed to each unit of marketing spend
pub const MARKETING_ATTRIBUTION: f64 = 1.5;

/// Both faces of a shelf are usable
pub const SHELF_FACES: f64 = 2.0;

/// Share sum tolerance (numpy `isclose` defaults)
pub const SHARE_SUM_ABS_TOLERANCE: f64 = 1e-8;
pub const SHARE_SUM_REL_TOLERANCE: f64 = 1e-5;

/// Break-even search bracket, as multiples of the base value
pub const BEP_LOWER_FACTOR: f64 = 0.5;
pub const BEP_UPPER_FACTOR: f64 = 1.5;

/// Absolute tolerance on the searched parameter value
pub const BEP_TOLERANCE: f64 = 0.01;
pub const BEP_MAX_ITERATIONS: usize = 100;

/// IRR solver settings
pub const IRR_INITIAL_GUESS: f64 = 0.10;
pub const IRR_MAX_ITERATIONS: usize = 100;
pub const IRR_EPSILON: f64 = 1e-7;
pub const IRR_MIN_RATE: f64 = -0.99;
pub const IRR_MAX_RATE: f64 = 100.0;

/// Default projection growth across the horizon
pub const DEFAULT_INCOME_GROWTH: f64 = 0.20;
pub const DEFAULT_EXPENSE_GROWTH: f64 = 0.10;

/// Default number of points in a sensitivity sweep
pub const DEFAULT_SCAN_STEPS: usize = 100;

/// Fixed sweep used for the VIP extra fee
pub const VIP_EXTRA_FEE_SCAN: (f64, f64) = (500.0, 1500.0);
