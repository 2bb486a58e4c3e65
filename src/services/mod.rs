//! Business logic services.

pub mod charts;
pub mod stats;
