//! Iterators and views over a [`KeyedCounter`].
//!
//! All iterators yield only live counters: a key whose count dropped to zero
//! is no longer in the table, so it can never be observed here. Iteration
//! order is unspecified and may differ between two counters holding the same
//! entries.
//!
//! Because every iterator borrows the counter (or consumes it), mutating the
//! counter while an iteration is in progress is rejected at compile time.

use std::fmt::{self, Debug};
use std::hash::BuildHasher;
use std::iter::FusedIterator;

use hashbrown::hash_table;

use crate::counters::{Count, KeyedCounter};
use crate::equivalence::KeyEquivalence;

/// Borrowing iterator over `(key, count)` pairs.
///
/// Created by [`KeyedCounter::iter`].
pub struct Iter<'a, K, C> {
    inner: hash_table::Iter<'a, (K, C)>,
}

impl<'a, K, C> Iter<'a, K, C> {
    pub(crate) fn new(inner: hash_table::Iter<'a, (K, C)>) -> Self {
        Self { inner }
    }
}

impl<'a, K, C: Count> Iterator for Iter<'a, K, C> {
    type Item = (&'a K, C);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, count)| (key, *count))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, C: Count> ExactSizeIterator for Iter<'_, K, C> {}

impl<K, C: Count> FusedIterator for Iter<'_, K, C> {}

/// Owning iterator over `(key, count)` pairs.
///
/// Created by the [`IntoIterator`] implementation of [`KeyedCounter`].
pub struct IntoIter<K, C> {
    inner: hash_table::IntoIter<(K, C)>,
}

impl<K, C> IntoIter<K, C> {
    pub(crate) fn new(inner: hash_table::IntoIter<(K, C)>) -> Self {
        Self { inner }
    }
}

impl<K, C> Iterator for IntoIter<K, C> {
    type Item = (K, C);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, C> ExactSizeIterator for IntoIter<K, C> {}

impl<K, C> FusedIterator for IntoIter<K, C> {}

/// A view of the keys holding a non-zero count.
///
/// Created by [`KeyedCounter::keys`]. The view supports size and
/// containment queries and can be iterated any number of times. It borrows
/// the counter, so its contents cannot change while it is alive.
///
/// # Examples
///
/// ```rust
/// use contachiavi::counters::KeyedCounter;
///
/// let mut counter: KeyedCounter<&str> = KeyedCounter::new();
/// counter.set("abc", 8).unwrap();
/// counter.set("def", 150).unwrap();
/// counter.set("def", 0).unwrap();
///
/// let keys = counter.keys();
/// assert_eq!(keys.len(), 1);
/// assert!(keys.contains(&"abc"));
/// assert!(!keys.contains(&"def"));
///
/// let collected: Vec<_> = keys.iter().collect();
/// assert_eq!(collected, vec![&"abc"]);
/// ```
pub struct Keys<'a, K, C, E, S> {
    counter: &'a KeyedCounter<K, C, E, S>,
}

impl<'a, K, C: Count, E, S> Keys<'a, K, C, E, S> {
    pub(crate) fn new(counter: &'a KeyedCounter<K, C, E, S>) -> Self {
        Self { counter }
    }

    /// Returns the number of keys in the view.
    #[inline]
    pub fn len(&self) -> usize {
        self.counter.len()
    }

    /// Returns `true` if the view holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counter.is_empty()
    }

    /// Returns an iterator over the keys in arbitrary order.
    pub fn iter(&self) -> KeysIter<'a, K, C> {
        KeysIter {
            inner: self.counter.iter(),
        }
    }
}

impl<K, C, E, S> Keys<'_, K, C, E, S>
where
    C: Count,
    E: KeyEquivalence<K>,
    S: BuildHasher,
{
    /// Returns `true` if `key` is in the view.
    ///
    /// Unlike [`KeyedCounter::contains`] this never fails: the absent
    /// sentinel is simply not a member.
    pub fn contains(&self, key: &K) -> bool {
        self.counter.find(key).is_some()
    }
}

impl<K, C, E, S> Clone for Keys<'_, K, C, E, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, C, E, S> Copy for Keys<'_, K, C, E, S> {}

impl<K: Debug, C: Count, E, S> Debug for Keys<'_, K, C, E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, K, C: Count, E, S> IntoIterator for Keys<'a, K, C, E, S> {
    type Item = &'a K;
    type IntoIter = KeysIter<'a, K, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the keys of a [`KeyedCounter`].
///
/// Created by [`Keys::iter`].
pub struct KeysIter<'a, K, C> {
    inner: Iter<'a, K, C>,
}

impl<'a, K, C: Count> Iterator for KeysIter<'a, K, C> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, C: Count> ExactSizeIterator for KeysIter<'_, K, C> {}

impl<K, C: Count> FusedIterator for KeysIter<'_, K, C> {}

#[cfg(test)]
mod tests {
    use crate::counters::KeyedCounter;

    fn sample() -> KeyedCounter<&'static str> {
        let mut counter = KeyedCounter::new();
        counter.set("abc", 8).unwrap();
        counter.set("def", 150).unwrap();
        counter.set("ghi", 25).unwrap();
        counter
    }

    #[test]
    fn test_iter_empty() {
        let counter: KeyedCounter<&str> = KeyedCounter::new();
        assert_eq!(counter.iter().next(), None);
        assert_eq!(counter.iter().len(), 0);
    }

    #[test]
    fn test_iter_expected_pairs() {
        let counter = sample();
        let mut seen = 0;
        for (key, count) in &counter {
            match *key {
                "abc" => assert_eq!(count, 8),
                "def" => assert_eq!(count, 150),
                "ghi" => assert_eq!(count, 25),
                other => panic!("unexpected key {other}"),
            }
            seen += 1;
        }
        assert_eq!(seen, 3);
    }

    #[test]
    fn test_iter_no_duplicates() {
        let counter = sample();
        let keys: Vec<_> = counter.iter().map(|(key, _)| *key).collect();
        for expected in ["abc", "def", "ghi"] {
            assert_eq!(keys.iter().filter(|key| **key == expected).count(), 1);
        }
    }

    #[test]
    fn test_iter_skips_removed_keys() {
        let mut counter = sample();
        counter.remove(&"abc").unwrap();
        counter.set("def", 0).unwrap();
        counter.subtract_by(&"ghi", 25).unwrap();

        assert_eq!(counter.iter().count(), 0);
        assert_eq!(counter.into_iter().count(), 0);
    }

    #[test]
    fn test_iter_exact_size() {
        let counter = sample();
        let mut iter = counter.iter();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
    }

    #[test]
    fn test_keys_empty() {
        let counter: KeyedCounter<&str> = KeyedCounter::new();
        let keys = counter.keys();
        assert_eq!(keys.len(), 0);
        assert!(keys.is_empty());
    }

    #[test]
    fn test_keys_expected() {
        let mut counter: KeyedCounter<&str> = KeyedCounter::new();
        counter.add("abc").unwrap();
        counter.add("def").unwrap();
        counter.add("ghi").unwrap();

        let keys = counter.keys();
        assert_eq!(keys.len(), 3);
        assert!(keys.contains(&"abc"));
        assert!(keys.contains(&"def"));
        assert!(keys.contains(&"ghi"));
        assert!(!keys.contains(&"jkl"));
    }

    #[test]
    fn test_keys_without_removed() {
        let mut counter = sample();
        counter.remove(&"abc").unwrap();
        counter.set("def", 0).unwrap();
        counter.subtract_by(&"ghi", 25).unwrap();

        let keys = counter.keys();
        assert_eq!(keys.len(), 0);
        assert_eq!(keys.iter().count(), 0);
    }

    #[test]
    fn test_keys_iterate_twice() {
        let counter = sample();
        let keys = counter.keys();
        assert_eq!(keys.iter().count(), 3);
        let mut sorted: Vec<_> = keys.into_iter().copied().collect();
        sorted.sort();
        assert_eq!(sorted, vec!["abc", "def", "ghi"]);
    }

    #[test]
    fn test_keys_reflect_state_when_obtained() {
        let mut counter = sample();
        assert_eq!(counter.keys().len(), 3);
        counter.add("jkl").unwrap();
        assert_eq!(counter.keys().len(), 4);
        assert!(counter.keys().contains(&"jkl"));
    }
}
