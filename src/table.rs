//! Weighted-range table: entries, cumulative ranges, and rolling.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{LARGEST_VALID_RANGE, SMALLEST_VALID_RANGE};
use crate::error::TableError;

/// A (value, weight) pair before it has been given a range.
///
/// This is the record callers hand to [`WeightedTable::add`]; it is also the
/// shape tables take when defined in data files, so it derives serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedEntry<T> {
    /// The outcome returned when this entry is rolled.
    pub value: T,
    /// The relative weight of the outcome. Must be positive and finite.
    pub weight: f64,
}

impl<T> WeightedEntry<T> {
    pub fn new(value: T, weight: f64) -> Self {
        Self { value, weight }
    }
}

impl<T> From<(T, f64)> for WeightedEntry<T> {
    fn from((value, weight): (T, f64)) -> Self {
        Self { value, weight }
    }
}

/// An entry owned by a table, carrying its derived cumulative range.
///
/// Range bounds are computed by the table and never caller-set; they are
/// exposed read-only through the accessors.
#[derive(Debug, Clone)]
pub struct Entry<T> {
    value: T,
    weight: f64,
    share: f64,
    low: f64,
    high: f64,
}

impl<T> Entry<T> {
    /// The outcome this entry resolves to.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The caller-supplied relative weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// This entry's fraction of the total weight at the last rebuild.
    pub fn share(&self) -> f64 {
        self.share
    }

    /// Lower bound of the cumulative range.
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Upper bound of the cumulative range.
    pub fn high(&self) -> f64 {
        self.high
    }

    fn contains(&self, p: f64) -> bool {
        p >= self.low && p <= self.high
    }
}

/// A probability table: a set of outcomes that each hold a slice of the
/// [0, 1] sample space proportional to their weight.
///
/// Entries are append-only. Every addition changes every entry's share, so
/// ranges are rebuilt after each [`create`](WeightedTable::create) or
/// [`add`](WeightedTable::add) call; use
/// [`populate`](WeightedTable::populate) to defer the rebuild across many
/// calls when seeding a large table.
///
/// Insertion order is significant: it fixes the order of the cumulative
/// ranges, and a roll landing exactly on a shared boundary resolves to the
/// earlier entry.
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    entries: Vec<Entry<T>>,
    total_weight: f64,
    edit_mode: bool,
}

impl<T> Default for WeightedTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> WeightedTable<T> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            total_weight: 0.0,
            edit_mode: false,
        }
    }

    /// Creates a table pre-seeded with the given entries.
    pub fn with_entries<I>(entries: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = WeightedEntry<T>>,
    {
        let mut table = Self::new();
        table.add(entries)?;
        Ok(table)
    }

    /// Creates a single entry and appends it.
    ///
    /// Fails with [`TableError::InvalidWeight`] if `weight` is not positive
    /// and finite; the table is unchanged on failure.
    pub fn create(&mut self, value: T, weight: f64) -> Result<(), TableError> {
        self.add([WeightedEntry::new(value, weight)])
    }

    /// Appends a batch of entries in one call.
    ///
    /// The whole call is atomic: every weight is validated before any entry
    /// is appended, and a failed rebuild removes the appended entries again,
    /// so an error leaves the table exactly as it was. Ranges are rebuilt at
    /// most once per call, and not at all inside a
    /// [`populate`](WeightedTable::populate) scope.
    pub fn add<I>(&mut self, entries: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = WeightedEntry<T>>,
    {
        let entries: Vec<WeightedEntry<T>> = entries.into_iter().collect();
        for entry in &entries {
            if !entry.weight.is_finite() || entry.weight <= 0.0 {
                return Err(TableError::InvalidWeight {
                    weight: entry.weight,
                });
            }
        }

        let prior_len = self.entries.len();
        let prior_total = self.total_weight;
        for entry in entries {
            self.total_weight += entry.weight;
            self.entries.push(Entry {
                value: entry.value,
                weight: entry.weight,
                share: 0.0,
                low: 0.0,
                high: 0.0,
            });
        }

        if !self.edit_mode {
            if let Err(err) = self.rebuild_ranges() {
                self.entries.truncate(prior_len);
                self.total_weight = prior_total;
                return Err(err);
            }
        }
        Ok(())
    }

    /// Runs `edit` with range rebuilding suspended, then rebuilds once.
    ///
    /// Without this, seeding n entries one `create` at a time rebuilds the
    /// full range list n times (O(n^2) work); inside a populate scope the
    /// rebuild happens exactly once, after `edit` returns.
    ///
    /// The scope is not reentrant: calling `populate` from inside `edit`
    /// fails with [`TableError::BatchAlreadyActive`]. If `edit` returns an
    /// error, every entry it added is rolled back and the table is left
    /// exactly as before the call.
    pub fn populate<F>(&mut self, edit: F) -> Result<(), TableError>
    where
        F: FnOnce(&mut Self) -> Result<(), TableError>,
    {
        if self.edit_mode {
            return Err(TableError::BatchAlreadyActive);
        }

        let prior_len = self.entries.len();
        let prior_total = self.total_weight;

        self.edit_mode = true;
        let body = edit(self);
        self.edit_mode = false;

        let result = body.and_then(|()| self.rebuild_ranges());
        if let Err(err) = result {
            self.entries.truncate(prior_len);
            self.total_weight = prior_total;
            return Err(err);
        }
        Ok(())
    }

    /// Recomputes every entry's share and cumulative range.
    ///
    /// Two-phase: all ranges are computed and validated first and committed
    /// only if every one passes, so a failure leaves the previous range
    /// state intact. The final bound is pinned to exactly 1.0 so that
    /// accumulated float error cannot leave the top of the sample space
    /// uncovered.
    fn rebuild_ranges(&mut self) -> Result<(), TableError> {
        if self.entries.is_empty() {
            return Ok(());
        }

        let mut ranges = Vec::with_capacity(self.entries.len());
        let mut previous = 0.0;
        for entry in &self.entries {
            let share = entry.weight / self.total_weight;
            let low = previous;
            let high = low + share;
            if share < SMALLEST_VALID_RANGE || low > LARGEST_VALID_RANGE {
                return Err(TableError::DegenerateRange { low, high });
            }
            ranges.push((low, high, share));
            previous = high;
        }

        if let Some(last) = ranges.last_mut() {
            last.1 = 1.0;
        }

        for (entry, (low, high, share)) in self.entries.iter_mut().zip(ranges) {
            entry.low = low;
            entry.high = high;
            entry.share = share;
        }
        Ok(())
    }

    /// Resolves a probability value in [0, 1] to an outcome.
    ///
    /// Scans entries in insertion order and returns the first whose range
    /// contains `p`, both bounds inclusive; a `p` exactly on a shared
    /// boundary therefore resolves to the earlier entry.
    ///
    /// Fails with [`TableError::EmptyTable`] when no entries exist, and with
    /// [`TableError::NoMatch`] when no range contains `p` (out-of-range or
    /// NaN input; unreachable for valid input against a consistent table).
    pub fn sample_at(&self, p: f64) -> Result<&T, TableError> {
        if self.entries.is_empty() {
            return Err(TableError::EmptyTable);
        }
        for entry in &self.entries {
            if entry.contains(p) {
                return Ok(&entry.value);
            }
        }
        Err(TableError::NoMatch { p })
    }

    /// Rolls an outcome using the thread-local random source.
    pub fn sample(&self) -> Result<&T, TableError> {
        self.sample_with(&mut rand::thread_rng())
    }

    /// Rolls an outcome using a caller-supplied random source.
    pub fn sample_with(&self, rng: &mut impl Rng) -> Result<&T, TableError> {
        self.sample_at(rng.gen::<f64>())
    }

    /// The entries in insertion (range) order.
    pub fn entries(&self) -> &[Entry<T>] {
        &self.entries
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all entry weights.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }
}
