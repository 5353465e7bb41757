// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::hash::Hasher;

/// FNV-1a 64-bit offset basis.
pub const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
/// FNV-1a 64-bit prime.
pub const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Streaming FNV-1a 64-bit hasher.
///
/// Writes are folded byte by byte, so hashing a sequence in several writes
/// yields the same value as [`seed_hash`] over the concatenation.
///
/// # Examples
///
/// ```
/// use std::hash::Hasher;
/// use xorsearch::hash::Fnv1a64;
/// use xorsearch::hash::seed_hash;
///
/// let mut hasher = Fnv1a64::new();
/// hasher.write(b"quick");
/// hasher.write(b" brown");
/// assert_eq!(hasher.finish(), seed_hash(b"quick brown"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fnv1a64 {
    state: u64,
}

impl Fnv1a64 {
    /// Creates a hasher primed with [`FNV_OFFSET_BASIS`].
    pub fn new() -> Self {
        Self {
            state: FNV_OFFSET_BASIS,
        }
    }

    /// Returns the hash of the bytes written so far.
    pub fn finish64(&self) -> u64 {
        self.state
    }
}

impl Default for Fnv1a64 {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Fnv1a64 {
    fn finish(&self) -> u64 {
        self.finish64()
    }

    fn write(&mut self, bytes: &[u8]) {
        let mut h = self.state;
        for &byte in bytes {
            h ^= byte as u64;
            h = h.wrapping_mul(FNV_PRIME);
        }
        self.state = h;
    }
}

/// Hashes a byte sequence into the 64-bit seed used to place it in a filter.
///
/// The empty sequence hashes to [`FNV_OFFSET_BASIS`].
///
/// # Examples
///
/// ```
/// use xorsearch::hash::FNV_OFFSET_BASIS;
/// use xorsearch::hash::seed_hash;
///
/// assert_eq!(seed_hash(b""), FNV_OFFSET_BASIS);
/// assert_eq!(seed_hash(b"quick"), seed_hash(b"quick"));
/// ```
pub fn seed_hash(bytes: &[u8]) -> u64 {
    let mut hasher = Fnv1a64::new();
    hasher.write(bytes);
    hasher.finish64()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference values from the FNV test suite.
    #[test]
    fn test_vectors() {
        assert_eq!(seed_hash(b""), 0xcbf29ce484222325);
        assert_eq!(seed_hash(b"a"), 0xaf63dc4c8601ec8c);
        assert_eq!(seed_hash(b"foobar"), 0x85944171f73967e8);
    }

    #[test]
    fn test_split_writes() {
        let mut hasher = Fnv1a64::default();
        hasher.write(b"foo");
        hasher.write(b"");
        hasher.write(b"bar");
        assert_eq!(hasher.finish(), seed_hash(b"foobar"));
    }

    #[test]
    fn test_new_starts_at_offset_basis() {
        let mut hasher = Fnv1a64::new();
        assert_eq!(hasher.finish64(), FNV_OFFSET_BASIS);
        assert_eq!(hasher, Fnv1a64::default());
        hasher.write(b"a");
        assert_eq!(hasher.finish64(), seed_hash(b"a"));
    }
}
