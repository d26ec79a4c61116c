/// Data layer: records, header resolution, loading, and searching.
///
/// Architecture:
/// ```text
///  price*.csv files in the scan directory
///        │
///        ▼
///   ┌──────────┐   header row → column roles
///   │  header   │
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  rows → PriceRecord (or a SkipReason)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ PriceCatalog  │  Vec<PriceRecord>, ingestion order
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  product substring → records sorted by price per kg
///   └──────────┘
/// ```

pub mod filter;
pub mod header;
pub mod loader;
pub mod model;
