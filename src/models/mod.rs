//! Registration models, filter inputs, and the store-agnostic query predicate.

pub mod filter;
pub mod predicate;
pub mod registration;
pub mod sport_registration;
