//! Pluggable key equality strategies.
//!
//! A [`KeyedCounter`](crate::counters::KeyedCounter) never calls `Eq` or
//! `Hash` on its keys directly. Instead it goes through a [`KeyEquivalence`]
//! strategy chosen at construction time, which decides:
//!
//! 1. whether two keys address the same counter,
//! 2. how a key is fed into the hasher,
//! 3. whether a key is the *absent sentinel* that mutating operations reject.
//!
//! # Available Strategies
//!
//! | Strategy | Key type | Behaviour |
//! |----------|----------|-----------|
//! | [`Canonical`] | `K: Eq + Hash` | The key type's own equality (default) |
//! | [`Nullable`] | `Option<T>` | Canonical equality, `None` is rejected as a key |
//! | [`AsciiCaseInsensitive`] | `K: AsRef<str>` | `"ABC"` and `"abc"` share a counter |
//!
//! # Writing a Strategy
//!
//! Implementations must keep hashing consistent with equivalence: whenever
//! `equivalent(a, b)` holds, `hash_key(a)` and `hash_key(b)` must write the
//! same bytes.
//!
//! ```rust
//! use std::hash::{Hash, Hasher};
//! use contachiavi::counters::KeyedCounter;
//! use contachiavi::equivalence::KeyEquivalence;
//!
//! /// Compares integers by their remainder modulo 10.
//! #[derive(Debug, Default)]
//! struct LastDigit;
//!
//! impl KeyEquivalence<u32> for LastDigit {
//!     fn equivalent(&self, a: &u32, b: &u32) -> bool {
//!         a % 10 == b % 10
//!     }
//!
//!     fn hash_key<H: Hasher>(&self, key: &u32, state: &mut H) {
//!         (key % 10).hash(state);
//!     }
//! }
//!
//! let mut counter: KeyedCounter<u32, i32, LastDigit> = KeyedCounter::with_equivalence(None);
//! counter.add(13).unwrap();
//! counter.add(23).unwrap();
//! assert_eq!(counter.get(&3), 2);
//! ```

use std::hash::{Hash, Hasher};

/// Strategy deciding key equality, hashing and absent-sentinel detection.
pub trait KeyEquivalence<K: ?Sized> {
    /// Returns `true` when `a` and `b` address the same counter.
    fn equivalent(&self, a: &K, b: &K) -> bool;

    /// Feeds `key` into `state`. Must agree with [`equivalent`](Self::equivalent).
    fn hash_key<H: Hasher>(&self, key: &K, state: &mut H);

    /// Returns `true` if `key` is the absent sentinel for this key type.
    ///
    /// Mutating operations and [`contains`](crate::counters::KeyedCounter::contains)
    /// reject such keys with an invalid argument error, while
    /// [`get`](crate::counters::KeyedCounter::get) simply reports 0.
    #[inline]
    fn is_absent(&self, _key: &K) -> bool {
        false
    }
}

/// Uses the key type's own [`Eq`] and [`Hash`] implementations.
///
/// No key is ever considered absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Canonical;

impl<K: Eq + Hash + ?Sized> KeyEquivalence<K> for Canonical {
    #[inline]
    fn equivalent(&self, a: &K, b: &K) -> bool {
        a == b
    }

    #[inline]
    fn hash_key<H: Hasher>(&self, key: &K, state: &mut H) {
        key.hash(state);
    }
}

/// Canonical equality for optional keys, treating `None` as the absent sentinel.
///
/// # Examples
///
/// ```rust
/// use contachiavi::counters::KeyedCounter;
/// use contachiavi::equivalence::Nullable;
///
/// let mut counter: KeyedCounter<Option<&str>, i32, Nullable> =
///     KeyedCounter::with_equivalence(None);
///
/// assert_eq!(counter.add(Some("abc")), Ok(1));
/// assert!(counter.add(None).is_err());
/// assert_eq!(counter.get(&None), 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Nullable;

impl<T: Eq + Hash> KeyEquivalence<Option<T>> for Nullable {
    #[inline]
    fn equivalent(&self, a: &Option<T>, b: &Option<T>) -> bool {
        a == b
    }

    #[inline]
    fn hash_key<H: Hasher>(&self, key: &Option<T>, state: &mut H) {
        key.hash(state);
    }

    #[inline]
    fn is_absent(&self, key: &Option<T>) -> bool {
        key.is_none()
    }
}

/// ASCII case-insensitive equality for string-like keys.
///
/// The first spelling of a key inserted is the one kept in the counter.
///
/// # Examples
///
/// ```rust
/// use contachiavi::counters::KeyedCounter;
/// use contachiavi::equivalence::AsciiCaseInsensitive;
///
/// let mut counter: KeyedCounter<&str, i32, AsciiCaseInsensitive> =
///     KeyedCounter::with_equivalence(Some(AsciiCaseInsensitive));
///
/// counter.add("Rust").unwrap();
/// counter.add("RUST").unwrap();
/// counter.add("rust").unwrap();
///
/// assert_eq!(counter.len(), 1);
/// assert_eq!(counter.get(&"rUsT"), 3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AsciiCaseInsensitive;

impl<K: AsRef<str> + ?Sized> KeyEquivalence<K> for AsciiCaseInsensitive {
    #[inline]
    fn equivalent(&self, a: &K, b: &K) -> bool {
        a.as_ref().eq_ignore_ascii_case(b.as_ref())
    }

    fn hash_key<H: Hasher>(&self, key: &K, state: &mut H) {
        let key = key.as_ref();
        for byte in key.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
        // Same terminator `str` uses, so "ab" + "c" and "a" + "bc" differ in compound keys.
        state.write_u8(0xff);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<K: ?Sized, E: KeyEquivalence<K>>(equivalence: &E, key: &K) -> u64 {
        let mut state = DefaultHasher::new();
        equivalence.hash_key(key, &mut state);
        state.finish()
    }

    #[test]
    fn test_canonical() {
        assert!(Canonical.equivalent(&"abc", &"abc"));
        assert!(!Canonical.equivalent(&"abc", &"ABC"));
        assert_eq!(hash_of(&Canonical, &42u64), hash_of(&Canonical, &42u64));
        assert!(!KeyEquivalence::<u64>::is_absent(&Canonical, &0));
    }

    #[test]
    fn test_nullable_absent() {
        assert!(Nullable.is_absent(&None::<&str>));
        assert!(!Nullable.is_absent(&Some("abc")));
        assert!(Nullable.equivalent(&Some(1), &Some(1)));
        assert!(!Nullable.equivalent(&Some(1), &None));
    }

    #[test]
    fn test_ascii_case_insensitive() {
        assert!(AsciiCaseInsensitive.equivalent("Hello", "hELLO"));
        assert!(!AsciiCaseInsensitive.equivalent("Hello", "Help"));
        assert_eq!(
            hash_of(&AsciiCaseInsensitive, "Hello"),
            hash_of(&AsciiCaseInsensitive, "HELLO")
        );
        assert_ne!(
            hash_of(&AsciiCaseInsensitive, "Hello"),
            hash_of(&AsciiCaseInsensitive, "World")
        );
    }

    #[test]
    fn test_ascii_case_insensitive_owned_keys() {
        let a = String::from("Key");
        let b = String::from("kEY");
        assert!(AsciiCaseInsensitive.equivalent(&a, &b));
        assert_eq!(
            hash_of(&AsciiCaseInsensitive, &a),
            hash_of(&AsciiCaseInsensitive, &b)
        );
    }

    #[test]
    fn test_default_strategies() {
        assert_eq!(Canonical::default(), Canonical);
        assert_eq!(Nullable::default(), Nullable);
        assert_eq!(AsciiCaseInsensitive::default(), AsciiCaseInsensitive);
    }
}
