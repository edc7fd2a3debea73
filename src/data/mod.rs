/// Data layer: core types, loading, and errors.
///
/// Architecture:
/// ```text
///  .json / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Vec<Tweet>
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ TweetDataset │  first N tweets, month order
///   └──────────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
