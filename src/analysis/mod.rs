//! Analysis module - break-even search, sensitivity sweeps and projections

pub mod break_even;
pub mod projection;
pub mod sensitivity;

pub use break_even::{BreakEven, BreakEvenSearch, BreakEvenSolver, NotFoundReason};
pub use projection::{project, MonthProjection, ProjectionGrowth};
pub use sensitivity::{linspace, SensitivityCurve, SensitivityPoint, SensitivityScanner};
