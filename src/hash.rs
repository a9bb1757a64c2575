//! Key hash functions.
//!
//! The index hashes each key once and stores the value next to the key text.
//! Its slot map is keyed by that value through a pass-through hasher, so the
//! map's bucket distribution is exactly the one produced by the selected
//! [`HashFunction`].

use std::hash::{BuildHasherDefault, Hasher};

use crate::record::last_name;

/// Hash function applied to index keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashFunction {
    /// FNV-1a over the UTF-8 bytes of the key.
    #[default]
    General,
    /// Sum of the character ordinals of the key's last name (text after the
    /// last space). Deliberately weak: anagrams and same-surname keys collide.
    LastNameOrdinalSum,
}

impl HashFunction {
    #[inline]
    pub fn hash(self, key: &str) -> u64 {
        match self {
            Self::General => fnv1a(key.as_bytes()),
            Self::LastNameOrdinalSum => ordinal_sum(last_name(key)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::General => "fnv1a",
            Self::LastNameOrdinalSum => "last-name-ordinal-sum",
        }
    }
}

/// FNV-1a, 64-bit.
#[inline]
pub fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

/// Sum of the Unicode scalar values of `s`.
#[inline]
pub fn ordinal_sum(s: &str) -> u64 {
    s.chars().map(|c| c as u64).sum()
}

/// Identity hasher for precomputed key hashes.
#[derive(Default)]
pub(crate) struct KeyHasher(u64);

impl Hasher for KeyHasher {
    fn write(&mut self, _: &[u8]) {
        // u64's Hash impl calls write_u64. Reaching here means the hasher is
        // used with a foreign key type.
        debug_assert!(false, "KeyHasher only supports write_u64");
    }

    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

pub(crate) type KeyBuildHasher = BuildHasherDefault<KeyHasher>;
