//! Keyed counter with zero-elision and checked arithmetic.
//!
//! This module provides [`KeyedCounter`], a map from keys to strictly
//! positive counts. A counter that reaches zero is removed instead of being
//! kept around as an explicit zero entry.

use std::collections::hash_map::RandomState;
use std::fmt::{self, Debug};
use std::hash::{BuildHasher, Hash, Hasher};

use hashbrown::hash_table::{Entry, HashTable};
use tracing::{debug, trace};

use crate::counters::iter::{IntoIter, Iter, Keys};
use crate::counters::Count;
use crate::equivalence::{Canonical, KeyEquivalence};
use crate::error::{CounterError, Result};

/// A map from keys to non-negative counts.
///
/// Invariants maintained by every operation:
///
/// - every stored count is at least 1; a key whose count drops to zero is
///   removed from the map,
/// - [`len`](Self::len), [`contains`](Self::contains), [`keys`](Self::keys)
///   and [`iter`](Self::iter) only ever see keys with a non-zero count,
/// - no count exceeds `C::max_value()`: [`add_by`](Self::add_by) fails with
///   [`CounterError::Overflow`] instead of wrapping, while
///   [`subtract_by`](Self::subtract_by) saturates at zero.
///
/// Key equality is governed by the [`KeyEquivalence`] strategy `E`, fixed
/// at construction time. Hashes are computed through the `BuildHasher` `S`.
///
/// The counter performs no internal synchronization. Mutations take
/// `&mut self`; wrap the counter in a `Mutex` to share it across threads.
///
/// # Examples
///
/// Basic usage:
///
/// ```rust
/// use contachiavi::counters::KeyedCounter;
///
/// let mut counter: KeyedCounter<&str> = KeyedCounter::new();
///
/// assert_eq!(counter.add("abc"), Ok(1));
/// assert_eq!(counter.add("abc"), Ok(2));
/// assert_eq!(counter.add_by("abc", 3), Ok(5));
/// assert_eq!(counter.subtract_by(&"abc", 10), Ok(0));
///
/// // Zero counts are elided
/// assert!(!counter.contains(&"abc").unwrap());
/// assert!(counter.is_empty());
/// ```
///
/// Direct assignment:
///
/// ```rust
/// use contachiavi::counters::KeyedCounter;
///
/// let mut counter: KeyedCounter<String> = KeyedCounter::new();
/// counter.set("abc".to_string(), 8).unwrap();
/// assert_eq!(counter.get(&"abc".to_string()), 8);
///
/// counter.set("abc".to_string(), 0).unwrap();
/// assert_eq!(counter.len(), 0);
/// ```
#[derive(Clone)]
pub struct KeyedCounter<K, C = i32, E = Canonical, S = RandomState> {
    name: &'static str,
    table: HashTable<(K, C)>,
    equivalence: E,
    hash_builder: S,
}

#[inline]
fn make_hash<K, E, S>(equivalence: &E, hash_builder: &S, key: &K) -> u64
where
    E: KeyEquivalence<K>,
    S: BuildHasher,
{
    let mut state = hash_builder.build_hasher();
    equivalence.hash_key(key, &mut state);
    state.finish()
}

fn checked_capacity<N: TryInto<usize>>(capacity: N) -> Result<usize> {
    capacity
        .try_into()
        .map_err(|_| CounterError::invalid("capacity", "capacity cannot be negative"))
}

impl<K, C: Count> KeyedCounter<K, C> {
    /// Creates an empty counter using the key type's own equality.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use contachiavi::counters::KeyedCounter;
    ///
    /// let counter: KeyedCounter<&str> = KeyedCounter::new();
    /// assert!(counter.is_empty());
    /// assert_eq!(counter.name(), "");
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty counter with room for at least `capacity` keys.
    ///
    /// Fails with [`CounterError::InvalidArgument`] if `capacity` does not
    /// fit a `usize` (for instance a negative `i32`), before allocating.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use contachiavi::counters::KeyedCounter;
    ///
    /// let counter: KeyedCounter<&str> = KeyedCounter::with_capacity(100).unwrap();
    /// assert!(counter.capacity() >= 100);
    ///
    /// assert!(KeyedCounter::<&str>::with_capacity(-1).is_err());
    /// ```
    pub fn with_capacity<N: TryInto<usize>>(capacity: N) -> Result<Self> {
        Self::with_capacity_and_equivalence(capacity, None)
    }

    /// Builds a counter by adding 1 for every key yielded by `keys`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use contachiavi::counters::KeyedCounter;
    ///
    /// let words = "the cat saw the other cat".split_whitespace();
    /// let counter: KeyedCounter<&str> = KeyedCounter::try_from_keys(words).unwrap();
    ///
    /// assert_eq!(counter.get(&"the"), 2);
    /// assert_eq!(counter.get(&"saw"), 1);
    /// assert_eq!(counter.len(), 4);
    /// ```
    pub fn try_from_keys<I>(keys: I) -> Result<Self>
    where
        K: Eq + Hash,
        I: IntoIterator<Item = K>,
    {
        let mut counter = Self::new();
        counter.try_extend(keys)?;
        Ok(counter)
    }
}

impl<K, C: Count, E: Default> KeyedCounter<K, C, E> {
    /// Creates an empty counter using the given equality strategy.
    ///
    /// `None` falls back to `E::default()`, which for the default
    /// [`Canonical`] strategy is the key type's own `Eq + Hash`.
    pub fn with_equivalence(equivalence: Option<E>) -> Self {
        Self {
            name: "",
            table: HashTable::new(),
            equivalence: equivalence.unwrap_or_default(),
            hash_builder: RandomState::new(),
        }
    }

    /// Creates an empty counter with both a capacity hint and an equality strategy.
    ///
    /// Fails with [`CounterError::InvalidArgument`] if `capacity` is negative.
    pub fn with_capacity_and_equivalence<N: TryInto<usize>>(
        capacity: N,
        equivalence: Option<E>,
    ) -> Result<Self> {
        Self::with_capacity_equivalence_and_hasher(capacity, equivalence, RandomState::new())
    }
}

impl<K, C: Count, E: Default, S> KeyedCounter<K, C, E, S> {
    /// Creates an empty counter hashing keys with `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            name: "",
            table: HashTable::new(),
            equivalence: E::default(),
            hash_builder,
        }
    }

    /// Creates an empty counter from all construction parameters.
    ///
    /// The capacity is validated first; nothing is allocated when it is
    /// negative. A capacity too large to allocate also fails with
    /// [`CounterError::InvalidArgument`].
    pub fn with_capacity_equivalence_and_hasher<N: TryInto<usize>>(
        capacity: N,
        equivalence: Option<E>,
        hash_builder: S,
    ) -> Result<Self> {
        let capacity = checked_capacity(capacity)?;
        let mut table = HashTable::new();
        // empty table: the rehash closure is never called
        table
            .try_reserve(capacity, |_: &(K, C)| 0)
            .map_err(|_| CounterError::invalid("capacity", "capacity exceeds the allocatable size"))?;
        Ok(Self {
            name: "",
            table,
            equivalence: equivalence.unwrap_or_default(),
            hash_builder,
        })
    }
}

impl<K, C: Count, E, S> KeyedCounter<K, C, E, S> {
    /// Sets the name of this counter, returning `self` for method chaining.
    ///
    /// The name only shows up in `Debug` output, log events and observers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use contachiavi::counters::KeyedCounter;
    ///
    /// let counter: KeyedCounter<&str> = KeyedCounter::new().with_name("words");
    /// assert_eq!(counter.name(), "words");
    /// ```
    pub fn with_name(self, name: &'static str) -> Self {
        Self { name, ..self }
    }

    /// Returns the name of this counter, or an empty string if unnamed.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the number of keys with a non-zero count.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if no key has a non-zero count.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of keys the counter can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the equality strategy fixed at construction.
    #[inline]
    pub fn equivalence(&self) -> &E {
        &self.equivalence
    }

    /// Returns the hash builder used by this counter.
    #[inline]
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes every counter.
    pub fn clear(&mut self) {
        trace!(counter = self.name, removed = self.table.len(), "clear");
        self.table.clear();
    }

    /// Returns an iterator over `(key, count)` pairs in arbitrary order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use contachiavi::counters::KeyedCounter;
    ///
    /// let mut counter: KeyedCounter<&str> = KeyedCounter::new();
    /// counter.set("abc", 8).unwrap();
    /// counter.set("def", 150).unwrap();
    ///
    /// let mut pairs: Vec<_> = counter.iter().collect();
    /// pairs.sort();
    /// assert_eq!(pairs, vec![(&"abc", 8), (&"def", 150)]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, C> {
        Iter::new(self.table.iter())
    }

    /// Returns a view of the keys currently holding a non-zero count.
    ///
    /// The view borrows the counter, so it always reflects the state the
    /// counter had when the view was obtained.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use contachiavi::counters::KeyedCounter;
    ///
    /// let mut counter: KeyedCounter<&str> = KeyedCounter::new();
    /// counter.add("abc").unwrap();
    /// counter.add("def").unwrap();
    ///
    /// let keys = counter.keys();
    /// assert_eq!(keys.len(), 2);
    /// assert!(keys.contains(&"abc"));
    /// assert!(!keys.contains(&"ghi"));
    /// ```
    pub fn keys(&self) -> Keys<'_, K, C, E, S> {
        Keys::new(self)
    }

    /// Keeps only the counters for which `keep` returns `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use contachiavi::counters::KeyedCounter;
    ///
    /// let mut counter: KeyedCounter<&str> = KeyedCounter::new();
    /// counter.set("rare", 1).unwrap();
    /// counter.set("common", 40).unwrap();
    ///
    /// counter.retain(|_, count| count > 1);
    /// assert_eq!(counter.len(), 1);
    /// assert_eq!(counter.get(&"common"), 40);
    /// ```
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, C) -> bool,
    {
        self.table.retain(|entry| keep(&entry.0, entry.1));
    }

    /// Returns the sum of all counts.
    ///
    /// Fails with [`CounterError::Overflow`] if the sum exceeds `C::max_value()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use contachiavi::counters::KeyedCounter;
    ///
    /// let mut counter: KeyedCounter<&str> = KeyedCounter::new();
    /// counter.set("a", 3).unwrap();
    /// counter.set("b", 4).unwrap();
    /// assert_eq!(counter.total(), Ok(7));
    ///
    /// counter.set("c", i32::MAX).unwrap();
    /// assert!(counter.total().is_err());
    /// ```
    pub fn total(&self) -> Result<C> {
        self.table
            .iter()
            .try_fold(C::zero(), |sum, (_, count)| sum.checked_add(count))
            .ok_or(CounterError::Overflow)
    }

    /// Returns up to `n` `(key, count)` pairs, highest counts first.
    ///
    /// Keys with equal counts appear in arbitrary order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use contachiavi::counters::KeyedCounter;
    ///
    /// let mut counter: KeyedCounter<&str> = KeyedCounter::new();
    /// counter.set("a", 1).unwrap();
    /// counter.set("b", 9).unwrap();
    /// counter.set("c", 5).unwrap();
    ///
    /// assert_eq!(counter.most_common(2), vec![(&"b", 9), (&"c", 5)]);
    /// ```
    pub fn most_common(&self, n: usize) -> Vec<(&K, C)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(n);
        entries
    }
}

impl<K, C, E, S> KeyedCounter<K, C, E, S>
where
    C: Count,
    E: KeyEquivalence<K>,
    S: BuildHasher,
{
    #[inline]
    fn hash(&self, key: &K) -> u64 {
        make_hash(&self.equivalence, &self.hash_builder, key)
    }

    /// Logs and returns a rejected-argument error.
    fn reject(&self, argument: &'static str, reason: &'static str) -> CounterError {
        debug!(counter = self.name, argument, reason, "rejected counter operation");
        CounterError::invalid(argument, reason)
    }

    fn check_key(&self, key: &K) -> Result<()> {
        if self.equivalence.is_absent(key) {
            return Err(self.reject("key", "key must not be null"));
        }
        Ok(())
    }

    pub(crate) fn find(&self, key: &K) -> Option<C> {
        let hash = self.hash(key);
        self.table
            .find(hash, |(k, _)| self.equivalence.equivalent(k, key))
            .map(|(_, count)| *count)
    }

    /// Returns the count for `key`, or 0 if it has none.
    ///
    /// Never fails: the absent sentinel of a
    /// [`Nullable`](crate::equivalence::Nullable) key simply yields 0.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use contachiavi::counters::KeyedCounter;
    ///
    /// let mut counter: KeyedCounter<&str> = KeyedCounter::new();
    /// assert_eq!(counter.get(&"abc"), 0);
    ///
    /// counter.add_by("abc", 3).unwrap();
    /// assert_eq!(counter.get(&"abc"), 3);
    /// ```
    pub fn get(&self, key: &K) -> C {
        self.find(key).unwrap_or_else(C::zero)
    }

    /// Returns `true` if `key` has a non-zero count.
    ///
    /// Fails with [`CounterError::InvalidArgument`] if `key` is the absent
    /// sentinel of the equality strategy.
    pub fn contains(&self, key: &K) -> Result<bool> {
        self.check_key(key)?;
        Ok(self.find(key).is_some())
    }

    /// Adds 1 to the count of `key`, returning the new count.
    ///
    /// Equivalent to `add_by(key, 1)`.
    #[inline]
    pub fn add(&mut self, key: K) -> Result<C> {
        self.add_by(key, C::one())
    }

    /// Adds `addend` to the count of `key`, returning the new count.
    ///
    /// An absent key starts from 0 and becomes present.
    ///
    /// # Errors
    ///
    /// - [`CounterError::InvalidArgument`] if `addend` is less than 1 or `key`
    ///   is the absent sentinel.
    /// - [`CounterError::Overflow`] if the new count would exceed
    ///   `C::max_value()`. The stored count is left unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use contachiavi::counters::KeyedCounter;
    /// use contachiavi::error::CounterError;
    ///
    /// let mut counter: KeyedCounter<&str> = KeyedCounter::new();
    /// assert_eq!(counter.add_by("abc", 2), Ok(2));
    /// assert_eq!(counter.add_by("abc", 3), Ok(5));
    ///
    /// assert!(counter.add_by("abc", 0).is_err());
    /// assert_eq!(counter.add_by("abc", i32::MAX), Err(CounterError::Overflow));
    /// assert_eq!(counter.get(&"abc"), 5);
    /// ```
    pub fn add_by(&mut self, key: K, addend: C) -> Result<C> {
        if addend < C::one() {
            return Err(self.reject("addend", "addend must be at least 1"));
        }
        self.check_key(&key)?;

        let hash = self.hash(&key);
        let Self {
            name,
            table,
            equivalence,
            hash_builder,
        } = self;

        let entry = table.entry(
            hash,
            |(k, _)| equivalence.equivalent(k, &key),
            |(k, _)| make_hash(&*equivalence, &*hash_builder, k),
        );
        match entry {
            Entry::Occupied(mut entry) => {
                let count = &mut entry.get_mut().1;
                let Some(updated) = count.checked_add(&addend) else {
                    debug!(counter = *name, current = %count, addend = %addend, "count overflow");
                    return Err(CounterError::Overflow);
                };
                *count = updated;
                Ok(updated)
            }
            Entry::Vacant(entry) => {
                trace!(counter = *name, count = %addend, "new entry");
                entry.insert((key, addend));
                Ok(addend)
            }
        }
    }

    /// Subtracts 1 from the count of `key`, returning the new count.
    ///
    /// Equivalent to `subtract_by(key, 1)`.
    #[inline]
    pub fn subtract(&mut self, key: &K) -> Result<C> {
        self.subtract_by(key, C::one())
    }

    /// Subtracts `subtrahend` from the count of `key`, saturating at zero.
    ///
    /// When the count would drop to zero or below, the key is removed and
    /// 0 is returned. Subtracting from an absent key returns 0 and changes
    /// nothing.
    ///
    /// # Errors
    ///
    /// [`CounterError::InvalidArgument`] if `subtrahend` is less than 1 or
    /// `key` is the absent sentinel. Subtraction never overflows.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use contachiavi::counters::KeyedCounter;
    ///
    /// let mut counter: KeyedCounter<&str> = KeyedCounter::new();
    /// counter.set("abc", 5).unwrap();
    ///
    /// assert_eq!(counter.subtract_by(&"abc", 2), Ok(3));
    /// assert_eq!(counter.subtract_by(&"abc", 10), Ok(0));
    /// assert!(!counter.contains(&"abc").unwrap());
    /// ```
    pub fn subtract_by(&mut self, key: &K, subtrahend: C) -> Result<C> {
        if subtrahend < C::one() {
            return Err(self.reject("subtrahend", "subtrahend must be at least 1"));
        }
        self.check_key(key)?;

        let hash = self.hash(key);
        let equivalence = &self.equivalence;
        match self
            .table
            .find_entry(hash, |(k, _)| equivalence.equivalent(k, key))
        {
            Ok(mut entry) => {
                let current = entry.get().1;
                if current <= subtrahend {
                    entry.remove();
                    trace!(counter = self.name, "entry reached zero");
                    Ok(C::zero())
                } else {
                    let updated = current - subtrahend;
                    entry.get_mut().1 = updated;
                    Ok(updated)
                }
            }
            Err(_) => Ok(C::zero()),
        }
    }

    /// Sets the count of `key` to exactly `value`.
    ///
    /// A `value` of 0 removes the key; any other value inserts or overwrites
    /// it regardless of the previous count.
    ///
    /// # Errors
    ///
    /// [`CounterError::InvalidArgument`] if `value` is negative or `key` is
    /// the absent sentinel.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use contachiavi::counters::KeyedCounter;
    ///
    /// let mut counter: KeyedCounter<&str> = KeyedCounter::new();
    /// counter.set("abc", 5).unwrap();
    /// assert_eq!(counter.get(&"abc"), 5);
    ///
    /// assert!(counter.set("abc", -1).is_err());
    /// assert_eq!(counter.get(&"abc"), 5);
    /// ```
    pub fn set(&mut self, key: K, value: C) -> Result<()> {
        if value < C::zero() {
            return Err(self.reject("value", "value cannot be negative"));
        }
        if value == C::zero() {
            return self.remove(&key);
        }
        self.check_key(&key)?;

        let hash = self.hash(&key);
        let Self {
            name,
            table,
            equivalence,
            hash_builder,
        } = self;

        let entry = table.entry(
            hash,
            |(k, _)| equivalence.equivalent(k, &key),
            |(k, _)| make_hash(&*equivalence, &*hash_builder, k),
        );
        match entry {
            Entry::Occupied(mut entry) => entry.get_mut().1 = value,
            Entry::Vacant(entry) => {
                trace!(counter = *name, count = %value, "new entry");
                entry.insert((key, value));
            }
        }
        Ok(())
    }

    /// Removes the counter for `key`, if any.
    ///
    /// Observably the same as `set(key, 0)`; removing an absent key does
    /// nothing.
    ///
    /// # Errors
    ///
    /// [`CounterError::InvalidArgument`] if `key` is the absent sentinel.
    pub fn remove(&mut self, key: &K) -> Result<()> {
        self.check_key(key)?;

        let hash = self.hash(key);
        let equivalence = &self.equivalence;
        if let Ok(entry) = self
            .table
            .find_entry(hash, |(k, _)| equivalence.equivalent(k, key))
        {
            entry.remove();
            trace!(counter = self.name, "entry removed");
        }
        Ok(())
    }

    /// Adds 1 for every key yielded by `keys`.
    ///
    /// Stops at the first failing key; the counts added before it are kept.
    /// No room is reserved up front, since repeated keys share one entry.
    pub fn try_extend<I>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
    {
        for key in keys {
            self.add(key)?;
        }
        Ok(())
    }

    /// Reserves room for at least `additional` more keys.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `usize`.
    pub fn reserve(&mut self, additional: usize) {
        let Self {
            table,
            equivalence,
            hash_builder,
            ..
        } = self;
        table.reserve(additional, |(k, _)| make_hash(&*equivalence, &*hash_builder, k));
    }

    /// Shrinks the allocation as much as possible.
    pub fn shrink_to_fit(&mut self) {
        let Self {
            table,
            equivalence,
            hash_builder,
            ..
        } = self;
        table.shrink_to_fit(|(k, _)| make_hash(&*equivalence, &*hash_builder, k));
    }
}

impl<K, C, E: Default, S: Default> Default for KeyedCounter<K, C, E, S> {
    /// Creates an empty, unnamed counter.
    fn default() -> Self {
        Self {
            name: "",
            table: HashTable::new(),
            equivalence: E::default(),
            hash_builder: S::default(),
        }
    }
}

impl<K, C, E, S> PartialEq for KeyedCounter<K, C, E, S>
where
    C: Count,
    E: KeyEquivalence<K>,
    S: BuildHasher,
{
    /// Two counters are equal when they hold the same keys with the same counts.
    ///
    /// Names are not compared.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .table
                .iter()
                .all(|(key, count)| other.find(key) == Some(*count))
    }
}

impl<K, C, E, S> Eq for KeyedCounter<K, C, E, S>
where
    C: Count,
    E: KeyEquivalence<K>,
    S: BuildHasher,
{
}

impl<K: Debug, C: Count, E, S> Debug for KeyedCounter<K, C, E, S> {
    /// Formats the counter as `name{ key:count ... }`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{", self.name)?;
        for (key, count) in self.table.iter() {
            write!(f, " {key:?}:{count}")?;
        }
        write!(f, " }}")
    }
}

impl<'a, K, C: Count, E, S> IntoIterator for &'a KeyedCounter<K, C, E, S> {
    type Item = (&'a K, C);
    type IntoIter = Iter<'a, K, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, C: Count, E, S> IntoIterator for KeyedCounter<K, C, E, S> {
    type Item = (K, C);
    type IntoIter = IntoIter<K, C>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.table.into_iter())
    }
}
