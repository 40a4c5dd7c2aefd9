//! Allocation module - storage shares and shelf space

pub mod shares;
pub mod space;

pub use shares::{normalize, ShareSession};
pub use space::{allocate, items, SpaceAllocation};
