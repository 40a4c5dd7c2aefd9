//! Storage share normalization
//!
//! Editing one share redistributes the remaining mass over the other
//! enabled storage types so the four shares keep summing to 1.0. A type
//! whose share is exactly zero counts as disabled and never receives mass.

use serde::{Deserialize, Serialize};

use crate::types::{Fraction, PerType, StorageType};

/// Set `changed` to `new_value` and rescale the other positive shares.
///
/// The caller clamps `new_value` to [0, 1]; out-of-range values are passed
/// through and left for validation to reject.
pub fn normalize(
    shares: &PerType<Fraction>,
    changed: StorageType,
    new_value: Fraction,
) -> PerType<Fraction> {
    let mut updated = *shares;
    updated[changed] = new_value;
    let remaining = 1.0 - new_value;

    let others: Vec<StorageType> = StorageType::ALL
        .into_iter()
        .filter(|t| *t != changed && shares[*t] > 0.0)
        .collect();

    if others.is_empty() {
        return updated;
    }

    // every share in `others` is positive, so the sum is too
    let other_sum: f64 = others.iter().map(|t| shares[*t]).sum();
    for t in others {
        updated[t] = shares[t] / other_sum * remaining;
    }

    updated
}

/// Share working set of a single editing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareSession {
    shares: PerType<Fraction>,
}

impl Default for ShareSession {
    fn default() -> Self {
        Self::new(PerType::new(0.5, 0.3, 0.1, 0.1))
    }
}

impl ShareSession {
    pub fn new(shares: PerType<Fraction>) -> Self {
        Self { shares }
    }

    pub fn shares(&self) -> &PerType<Fraction> {
        &self.shares
    }

    /// Apply a user edit, clamped to [0, 1]
    pub fn set_share(&mut self, storage_type: StorageType, value: Fraction) -> &PerType<Fraction> {
        let value = value.clamp(0.0, 1.0);
        self.shares = normalize(&self.shares, storage_type, value);
        log::debug!("{} share set to {:.4}: {:?}", storage_type, value, self.shares);
        &self.shares
    }

    /// Switch a storage type off, handing its share to the enabled ones
    pub fn disable(&mut self, storage_type: StorageType) -> &PerType<Fraction> {
        self.shares = normalize(&self.shares, storage_type, 0.0);
        &self.shares
    }

    pub fn enabled_types(&self) -> Vec<StorageType> {
        StorageType::ALL
            .into_iter()
            .filter(|t| self.shares[*t] > 0.0)
            .collect()
    }

    /// Share not assigned to any storage type
    pub fn unallocated(&self) -> Fraction {
        (1.0 - self.shares.sum()).clamp(0.0, 1.0)
    }
}
