//! Profit distribution by storage type

use serde::{Deserialize, Serialize};

use crate::allocation::SpaceAllocation;
use crate::finance::FinancialResult;
use crate::params::WarehouseParameters;
use crate::types::{Area, Money, StorageType};

/// Income and rent attributed to one storage type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageTypeBreakdown {
    pub storage_type: StorageType,
    pub area: Area,
    pub items: f64,
    pub income: Money,
    /// Rent charged on the type's shelf area
    pub area_rent: Money,
    pub profit: Money,
}

/// Per-type rows in `StorageType::ALL` order.
///
/// Realization and marketing income are not attributed to any type.
pub fn breakdown(
    result: &FinancialResult,
    space: &SpaceAllocation,
    params: &WarehouseParameters,
) -> Vec<StorageTypeBreakdown> {
    StorageType::ALL
        .into_iter()
        .map(|t| {
            let income = match t {
                StorageType::Storage => result.storage_income,
                StorageType::Loan => result.loan_income_after_realization,
                StorageType::Vip => result.vip_income,
                StorageType::ShortTerm => result.short_term_income,
            };
            let area = space.areas[t];
            let area_rent = area * params.rental_cost_per_m2;

            StorageTypeBreakdown {
                storage_type: t,
                area,
                items: space.items[t],
                income,
                area_rent,
                profit: income - area_rent,
            }
        })
        .collect()
}
