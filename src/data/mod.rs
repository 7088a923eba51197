/// Data layer: the dataset table and the operations that fill it.
///
/// Architecture:
/// ```text
///   folder on disk
///        │
///        ▼
///   ┌──────────┐
///   │ crawler  │  walk + include/exclude filter → filepath column
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  label   │  filepath → label column
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  split   │  per-class sampling → split column
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ summary  │  counts per label, label × split
///   └──────────┘
/// ```

pub mod crawler;
pub mod filter;
pub mod label;
pub mod model;
pub mod split;
pub mod summary;
