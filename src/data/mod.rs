/// Data layer: core types, loading, merging and export.
///
/// Architecture:
/// ```text
///  BOM .xlsx/.csv    Life Cycle .xlsx/.csv    MTS text
///        │                  │                    │
///        ▼                  ▼                    ▼
///   ┌──────────┐       ┌──────────┐        ┌──────────┐
///   │  loader   │       │  loader   │        │  codes    │
///   └──────────┘       └──────────┘        └──────────┘
///        │                  │                    │
///        └────────┬─────────┴────────────────────┘
///                 ▼
///   ┌──────────────────────────────┐
///   │ merge: schema check → filter  │
///   │        → left join → project  │
///   └──────────────────────────────┘
///                 │
///                 ▼
///   ┌──────────┐
///   │  export   │  output.csv / output.xlsx bytes
///   └──────────┘
/// ```

pub mod codes;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod merge;
pub mod model;
pub mod pipeline;
pub mod schema;

#[cfg(test)]
pub(crate) mod testutil;
