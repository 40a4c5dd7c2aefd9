//! Profit sensitivity sweeps

use serde::{Deserialize, Serialize};

use crate::engine::FinancialEngine;
use crate::params::{ParamKey, WarehouseParameters};

/// Evenly spaced grid over `[start, end]`, endpoints included
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (steps - 1) as f64;
            (0..steps)
                .map(|i| {
                    if i == steps - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// One sample of a sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub value: f64,
    /// `None` when the engine faulted at this value
    pub profit: Option<f64>,
}

/// Profit as a function of one parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityCurve {
    pub key: ParamKey,
    pub points: Vec<SensitivityPoint>,
}

impl SensitivityCurve {
    /// First grid value where profit turns from negative to non-negative.
    ///
    /// Only as precise as the grid spacing; no interpolation.
    pub fn first_break_even(&self) -> Option<f64> {
        self.points.windows(2).find_map(|pair| match (pair[0].profit, pair[1].profit) {
            (Some(before), Some(after)) if before < 0.0 && after >= 0.0 => Some(pair[1].value),
            _ => None,
        })
    }

    pub fn profits(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.profit.unwrap_or(0.0)).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Sweeps one parameter through the financial engine
pub struct SensitivityScanner;

impl SensitivityScanner {
    /// Profit at each of `values`, in order
    pub fn scan(params: &WarehouseParameters, key: ParamKey, values: &[f64]) -> SensitivityCurve {
        let points = values
            .iter()
            .map(|&value| SensitivityPoint {
                value,
                profit: FinancialEngine::profit_at(params, key, value),
            })
            .collect();

        SensitivityCurve { key, points }
    }

    /// Sweep over the key's default range with `steps` samples
    pub fn scan_default(params: &WarehouseParameters, key: ParamKey, steps: usize) -> SensitivityCurve {
        let (start, end) = key.default_scan_range(params);
        Self::scan(params, key, &linspace(start, end, steps))
    }
}
