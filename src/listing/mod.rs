//! Token listing: raw query parameters in, one page of scored tokens out.
//!
//! `ListParams` (raw strings) → `ListQuery` (resolved, defaulted) →
//! ordered `Predicate`s applied to a `PredicateSink` plus a `SortPlan` →
//! `ListingResponse`.

pub mod params;
pub mod predicate;
pub mod query;
pub mod response;

pub use params::ListParams;
pub use predicate::{Predicate, PredicateSink};
pub use query::{ListQuery, SortPlan};
pub use response::{AppliedFilters, ListingResponse, Pagination};
