//! Rolltable - Weighted-Range Probability Table
//!
//! A table of outcomes that each hold a slice of the [0, 1] sample space
//! proportional to their relative weight. Rolling draws a uniform value and
//! resolves it to the entry whose range contains it, so long-run frequencies
//! converge to each outcome's weight share.
//!
//! ```
//! use rolltable::WeightedTable;
//!
//! let mut table = WeightedTable::new();
//! table.create("hit", 6.0)?;
//! table.create("miss", 3.0)?;
//! table.create("crit", 1.0)?;
//!
//! let outcome = table.sample()?;
//! assert!(["hit", "miss", "crit"].contains(outcome));
//! # Ok::<(), rolltable::TableError>(())
//! ```

pub mod constants;
pub mod error;
pub mod table;

pub use constants::{LARGEST_VALID_RANGE, SHARE_SUM_TOLERANCE, SMALLEST_VALID_RANGE};
pub use error::TableError;
pub use table::{Entry, WeightedEntry, WeightedTable};
