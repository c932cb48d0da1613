//! # Joinery
//!
//! Deterministic sequence joins with random access.
//!
//! One `use joinery::prelude::*;` gives you Cartesian products of several
//! sequences and combinatorial powers of one sequence (full, multiset,
//! combination, arrangement), each available as a random-access view or a
//! lazy stream that agree tuple for tuple.
//!
//! ```
//! use joinery::prelude::*;
//!
//! let colors = ["red", "green", "blue"];
//! let pairs = join(&colors, 2, Policy::Combination).unwrap();
//! let names: Vec<String> = pairs
//!     .iter()
//!     .map(|t| format!("{}+{}", t[0], t[1]))
//!     .collect();
//! assert_eq!(names, ["green+red", "blue+red", "blue+green"]);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `core` *(default)* | Rank/unrank engine, views, streams |
//! | `serde` | `Serialize`/`Deserialize` for `Policy` and `DimensionSet` |

#[cfg(feature = "core")]
pub use joinery_core as core;

/// Glob-import convenience: `use joinery::prelude::*;`
#[cfg(feature = "core")]
pub mod prelude {
    pub use joinery_core::prelude::*;
}
