//! Core types shared across the model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::error::WarehouseError;

/// Money amount (monthly unless stated otherwise)
pub type Money = f64;

/// Area in square metres
pub type Area = f64;

/// Fraction in [0, 1]
pub type Fraction = f64;

/// Percentage rate (e.g. 0.317 means 0.317 %)
pub type Rate = f64;

/// The four kinds of storage a warehouse sells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    /// Plain storage billed per square metre
    Storage,
    /// Storage used as loan collateral
    Loan,
    /// VIP storage with an extra fee
    Vip,
    /// Short-term storage billed per day
    ShortTerm,
}

impl StorageType {
    pub const ALL: [StorageType; 4] = [
        StorageType::Storage,
        StorageType::Loan,
        StorageType::Vip,
        StorageType::ShortTerm,
    ];

    fn index(self) -> usize {
        match self {
            StorageType::Storage => 0,
            StorageType::Loan => 1,
            StorageType::Vip => 2,
            StorageType::ShortTerm => 3,
        }
    }

    /// Stable key used in config files and on the command line
    pub fn key(self) -> &'static str {
        match self {
            StorageType::Storage => "storage",
            StorageType::Loan => "loan",
            StorageType::Vip => "vip",
            StorageType::ShortTerm => "short_term",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            StorageType::Storage => "Plain storage",
            StorageType::Loan => "Loan storage",
            StorageType::Vip => "VIP storage",
            StorageType::ShortTerm => "Short-term storage",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for StorageType {
    type Err = WarehouseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        StorageType::ALL
            .into_iter()
            .find(|t| t.key() == normalized || format!("{}_share", t.key()) == normalized)
            .ok_or_else(|| WarehouseError::UnknownParameter(s.to_string()))
    }
}

/// One value per storage type
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PerType<T> {
    pub storage: T,
    pub loan: T,
    pub vip: T,
    pub short_term: T,
}

impl<T> PerType<T> {
    pub fn new(storage: T, loan: T, vip: T, short_term: T) -> Self {
        Self {
            storage,
            loan,
            vip,
            short_term,
        }
    }

    /// Build from a function of the storage type
    pub fn from_fn(mut f: impl FnMut(StorageType) -> T) -> Self {
        Self {
            storage: f(StorageType::Storage),
            loan: f(StorageType::Loan),
            vip: f(StorageType::Vip),
            short_term: f(StorageType::ShortTerm),
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(StorageType, &T) -> U) -> PerType<U> {
        PerType::from_fn(|t| f(t, &self[t]))
    }

    /// Iterate in `StorageType::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (StorageType, &T)> {
        StorageType::ALL.into_iter().map(move |t| (t, &self[t]))
    }
}

impl<T: Copy> PerType<T> {
    pub fn splat(value: T) -> Self {
        Self::new(value, value, value, value)
    }
}

impl PerType<f64> {
    pub fn sum(&self) -> f64 {
        self.storage + self.loan + self.vip + self.short_term
    }
}

impl<T> Index<StorageType> for PerType<T> {
    type Output = T;

    fn index(&self, t: StorageType) -> &T {
        match t.index() {
            0 => &self.storage,
            1 => &self.loan,
            2 => &self.vip,
            _ => &self.short_term,
        }
    }
}

impl<T> IndexMut<StorageType> for PerType<T> {
    fn index_mut(&mut self, t: StorageType) -> &mut T {
        match t.index() {
            0 => &mut self.storage,
            1 => &mut self.loan,
            2 => &mut self.vip,
            _ => &mut self.short_term,
        }
    }
}
