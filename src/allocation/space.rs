//! Shelf area and item count allocation

use serde::{Deserialize, Serialize};

use crate::finance::constants::SHELF_FACES;
use crate::params::WarehouseParameters;
use crate::types::{Area, Fraction, PerType};

/// Shelf area per storage type.
///
/// `usable = total_area * useful_area_ratio`, doubled for both shelf faces
/// and multiplied by the shelf density, then split by share.
pub fn allocate(
    total_area: Area,
    useful_area_ratio: Fraction,
    shelves_per_m2: u32,
    shares: &PerType<Fraction>,
) -> PerType<Area> {
    let usable = total_area * useful_area_ratio;
    let doubled = usable * SHELF_FACES * f64::from(shelves_per_m2);
    shares.map(|_, share| doubled * share)
}

/// Item counts per storage type (not rounded)
pub fn items(areas: &PerType<Area>, densities: &PerType<f64>) -> PerType<f64> {
    areas.map(|t, area| area * densities[t])
}

/// Derived space figures for one parameter snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceAllocation {
    pub usable_area: Area,
    pub shelf_area: Area,
    pub areas: PerType<Area>,
    pub items: PerType<f64>,
}

impl SpaceAllocation {
    pub fn from_params(params: &WarehouseParameters) -> Self {
        let usable_area = params.total_area * params.useful_area_ratio;
        let shelf_area = usable_area * SHELF_FACES * f64::from(params.shelves_per_m2);
        let areas = allocate(
            params.total_area,
            params.useful_area_ratio,
            params.shelves_per_m2,
            &params.shares,
        );
        let items = items(&areas, &params.densities);

        Self {
            usable_area,
            shelf_area,
            areas,
            items,
        }
    }

    pub fn total_items(&self) -> f64 {
        self.items.sum()
    }
}
