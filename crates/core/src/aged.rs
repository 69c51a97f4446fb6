//! Aged collection - insertion-ordered entities that remember when they were born
//!
//! Every entry records the collection age at which it was added. Advancing the
//! collection moves its age forward and, for expiring collections, drops every
//! entry the retention predicate rejects. Survivors keep their relative order,
//! which only matters for draw order.

use std::fmt;

/// An entity together with the collection age at which it was added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgedEntry<T> {
    pub birth_tick: u64,
    pub payload: T,
}

impl<T> AgedEntry<T> {
    /// Ticks elapsed between birth and `now`.
    pub fn age_at(&self, now: u64) -> u64 {
        now.saturating_sub(self.birth_tick)
    }
}

/// Retention predicate: `keep(entry, current_age)`.
///
/// Must be a pure function of its arguments; it is evaluated in entry order.
pub type KeepFn<T> = Box<dyn Fn(&AgedEntry<T>, u64) -> bool + Send>;

/// How a collection decides which entries survive an [`AgedCollection::advance`].
pub enum Retention<T> {
    /// Append-only; entries live forever.
    Persistent,
    /// Entries are kept only while the predicate holds.
    Expiring(KeepFn<T>),
}

impl<T: 'static> Retention<T> {
    /// Keep entries whose age is at most `max_age` ticks.
    pub fn max_age(max_age: u64) -> Self {
        Retention::Expiring(Box::new(move |entry: &AgedEntry<T>, now: u64| {
            entry.age_at(now) <= max_age
        }))
    }
}

impl<T> Retention<T> {
    pub fn is_persistent(&self) -> bool {
        matches!(self, Retention::Persistent)
    }
}

impl<T> fmt::Debug for Retention<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Retention::Persistent => f.write_str("Persistent"),
            Retention::Expiring(_) => f.write_str("Expiring(..)"),
        }
    }
}

/// Ordered container of [`AgedEntry`] values with a monotonic age counter.
#[derive(Debug)]
pub struct AgedCollection<T> {
    entries: Vec<AgedEntry<T>>,
    age: u64,
    retention: Retention<T>,
}

impl<T> AgedCollection<T> {
    pub fn new(retention: Retention<T>) -> Self {
        Self {
            entries: Vec::new(),
            age: 0,
            retention,
        }
    }

    /// Append-only collection.
    pub fn persistent() -> Self {
        Self::new(Retention::Persistent)
    }

    /// Append `payload`, born at the current age.
    pub fn add(&mut self, payload: T) {
        self.entries.push(AgedEntry {
            birth_tick: self.age,
            payload,
        });
    }

    /// Move the age forward by `delta` and evict entries that no longer qualify.
    ///
    /// Returns the number of evicted entries.
    pub fn advance(&mut self, delta: u64) -> usize {
        debug_assert!(delta >= 1, "advance requires a positive delta");
        self.age = self.age.saturating_add(delta);

        let Retention::Expiring(keep) = &self.retention else {
            return 0;
        };

        let now = self.age;
        let before = self.entries.len();
        self.entries.retain(|entry| keep(entry, now));
        let evicted = before - self.entries.len();
        if evicted > 0 {
            tracing::trace!(evicted, age = now, "aged collection evicted entries");
        }
        evicted
    }

    /// Read-only view of the entries at the current age.
    pub fn iter(&self) -> std::slice::Iter<'_, AgedEntry<T>> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[AgedEntry<T>] {
        &self.entries
    }

    pub fn current_age(&self) -> u64 {
        self.age
    }

    pub fn retention(&self) -> &Retention<T> {
        &self.retention
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: 'static> AgedCollection<T> {
    /// Collection that evicts entries older than `max_age` ticks.
    pub fn expiring_after(max_age: u64) -> Self {
        Self::new(Retention::max_age(max_age))
    }
}

impl<'a, T> IntoIterator for &'a AgedCollection<T> {
    type Item = &'a AgedEntry<T>;
    type IntoIter = std::slice::Iter<'a, AgedEntry<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
