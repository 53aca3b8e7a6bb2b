//! Validation boundaries for entry ranges.

/// Upper bound on a usable range start. The default uniform source produces
/// values strictly below 1.0, so an entry whose range begins above this can
/// never be selected.
pub const LARGEST_VALID_RANGE: f64 = 0.999_999_999;

/// Smallest share of the probability space an entry may occupy. A weight
/// whose share falls below this is too small relative to the total weight to
/// produce a selectable range.
pub const SMALLEST_VALID_RANGE: f64 = 1e-9;

/// Tolerance used when comparing accumulated shares against 1.0.
pub const SHARE_SUM_TOLERANCE: f64 = 1e-9;
