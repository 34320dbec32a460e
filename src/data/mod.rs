/// Data layer: core types, loading, and validity filtering.
///
/// Architecture:
/// ```text
///  data/<folder>/*.CSV
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  list folders / files, parse rows → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record> + parallel validity flags
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  ValidityRule + show_invalid → visible indices
///   └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
