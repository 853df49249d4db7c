/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SurveyDataset (once, at startup)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SurveyDataset │  Vec<SurveyRecord>, present columns
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  equality constraints → Subset (row indices)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  counts / percentages / means → chart series
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod issue;
pub mod loader;
pub mod model;
