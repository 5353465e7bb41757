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

use crate::error::Error;
use crate::hash::seed_hash;
use crate::xor::sketch::MIN_LOAD_FACTOR;
use crate::xor::sketch::Xor8;

const DEFAULT_SEED: u64 = 0;
const DEFAULT_MAX_ATTEMPTS: u32 = 20;
const DEFAULT_PADDING: u32 = 32;

/// Builder for creating Xor filters.
///
/// The filter has `max(3, ceil(load_factor * n) + padding)` slots for `n`
/// distinct keys. The first attempt places each key at `derive(hash + seed)`.
/// When peeling stalls, the builder retries with a fresh attempt seed `s` drawn
/// from a SplitMix64 sequence started at [`seed`](Self::seed) and places keys at
/// `derive(mix64(hash ^ s))`, so a given configuration and key set always
/// produce the same filter.
///
/// # Examples
///
/// ```
/// use xorsearch::xor::Xor8;
///
/// let keys: Vec<u64> = (0..10_000).collect();
/// let filter = Xor8::builder()
///     .seed(42)
///     .max_attempts(25)
///     .load_factor(1.3)
///     .build(&keys)
///     .unwrap();
///
/// assert!(filter.contains(9999));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XorFilterBuilder {
    seed: u64,
    max_attempts: u32,
    load_factor: f64,
    padding: u32,
}

impl Default for XorFilterBuilder {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            load_factor: MIN_LOAD_FACTOR,
            padding: DEFAULT_PADDING,
        }
    }
}

impl XorFilterBuilder {
    /// Sets the seed of the first construction attempt.
    ///
    /// Queries combine the winning attempt seed with the key hash, so filters
    /// built with different seeds place keys differently.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the maximum number of construction attempts.
    ///
    /// # Panics
    ///
    /// Panics if `max_attempts` is 0.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        assert!(max_attempts > 0, "max_attempts must be at least 1");
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the ratio of filter slots to keys.
    ///
    /// Values below 1.23 make peeling fail with high probability and are
    /// rejected by [`build`](Self::build).
    pub fn load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Sets the number of slots added on top of `load_factor * n`.
    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Builds an Xor8 filter from the provided key hashes.
    ///
    /// Repeated hashes are collapsed before construction. An empty key set yields
    /// an empty filter that reports every query as possibly present.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument)
    /// if the load factor is invalid or the key set does not fit a `u32` capacity,
    /// [`ErrorKind::AllocationFailed`](crate::error::ErrorKind::AllocationFailed)
    /// if memory cannot be reserved, and
    /// [`ErrorKind::BuildFailed`](crate::error::ErrorKind::BuildFailed) if every
    /// attempt leaves keys unpeeled.
    pub fn build(self, keys: &[u64]) -> Result<Xor8, Error> {
        Xor8::build_from_keys(
            keys,
            self.seed,
            self.max_attempts,
            self.load_factor,
            self.padding,
        )
    }

    /// Hashes each byte sequence with [`seed_hash`] and builds a filter over the hashes.
    ///
    /// # Examples
    ///
    /// ```
    /// use xorsearch::xor::Xor8;
    ///
    /// let filter = Xor8::builder()
    ///     .build_from_slices(["quick", "brown", "fox"])
    ///     .unwrap();
    /// assert!(filter.contains_bytes(b"fox"));
    /// ```
    pub fn build_from_slices<I, B>(self, items: I) -> Result<Xor8, Error>
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let keys: Vec<u64> = items
            .into_iter()
            .map(|item| seed_hash(item.as_ref()))
            .collect();
        self.build(&keys)
    }
}
