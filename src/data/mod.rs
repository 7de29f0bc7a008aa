/// Data layer: core types, loading, selection, and filtering.
///
/// Architecture:
/// ```text
///  https://…/export?format=csv   .csv / .json
///        │                          │
///        ▼                          ▼
///   ┌──────────────────────────────────┐
///   │  loader   │  fetch / read → parse → stable sort
///   └──────────────────────────────────┘
///        │
///        ▼
///   ┌───────────────────┐
///   │ ObservationSeries │  Vec<Observation>, ascending by date
///   └───────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ selector  │  "YYYY-MM-DD | value" labels ⇄ series index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  prefix with date <= cutoff
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod selector;
