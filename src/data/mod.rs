/// Data layer: core record types, alignment, and artifact loading.
///
/// Architecture:
/// ```text
///   form ──► RawInputRecord
///                 │
///                 ▼
///           ┌──────────┐     FeatureSchema (.json / .csv / .txt)
///           │  align    │ ◄── loaded by `loader`
///           └──────────┘
///                 │
///                 ▼
///           AlignedRecord ──► model::predict
/// ```

pub mod align;
pub mod loader;
pub mod model;
