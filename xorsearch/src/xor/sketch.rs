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

use tracing::debug;
use tracing::warn;

use crate::common::try_with_capacity;
use crate::error::Error;
use crate::error::ErrorKind;
use crate::hash::DerivedLocation;
use crate::hash::mix64;
use crate::hash::seed_hash;
use crate::hash::splitmix64;
use crate::xor::XorFilterBuilder;
use crate::xor::peel::Peeling;
use crate::xor::peel::try_build_fingerprints;

/// Smallest load factor accepted by the builder.
pub const MIN_LOAD_FACTOR: f64 = 1.23;
const MIN_CAPACITY: u32 = 3;

/// Maps a key hash to its derivation input for one construction attempt.
///
/// The first attempt offsets the hash by the seed. An offset leaves keys spaced
/// by multiples of [`GOLDEN`](crate::hash::GOLDEN) on one progression, so
/// retries remix the hash instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum KeyPlacement {
    Offset(u64),
    Remix(u64),
}

impl KeyPlacement {
    fn for_attempt(attempt: u32, seed: u64) -> Self {
        if attempt == 0 {
            KeyPlacement::Offset(seed)
        } else {
            KeyPlacement::Remix(seed)
        }
    }

    fn seed(self) -> u64 {
        match self {
            KeyPlacement::Offset(seed) | KeyPlacement::Remix(seed) => seed,
        }
    }

    pub(super) fn locate(self, hash: u64, capacity: u32) -> DerivedLocation {
        let input = match self {
            KeyPlacement::Offset(seed) => hash.wrapping_add(seed),
            KeyPlacement::Remix(seed) => mix64(hash ^ seed),
        };
        DerivedLocation::derive(input, capacity)
    }
}

/// Xor8 filter with 8-bit fingerprints.
///
/// Every key hash is mapped to three slots of a single fingerprint array whose
/// xor equals the key's fingerprint. Lookups never miss a key the filter was
/// built from; unrelated hashes match with probability close to 1/256.
///
/// A filter built from no keys has capacity 0 and answers `true` for every
/// query.
///
/// # Examples
///
/// ```
/// use xorsearch::hash::seed_hash;
/// use xorsearch::xor::Xor8;
///
/// let words = ["apple", "quick", "brown"];
/// let keys: Vec<u64> = words.iter().map(|w| seed_hash(w.as_bytes())).collect();
/// let filter = Xor8::builder().build(&keys).unwrap();
///
/// assert!(filter.contains(seed_hash(b"quick")));
/// assert!(filter.contains_bytes(b"apple"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xor8 {
    placement: KeyPlacement,
    fingerprints: Vec<u8>,
}

impl Xor8 {
    /// Creates a builder for Xor8 filters.
    ///
    /// # Examples
    ///
    /// ```
    /// use xorsearch::xor::Xor8;
    ///
    /// let keys: Vec<u64> = (0..1_000).collect();
    /// let filter = Xor8::builder().build(&keys).unwrap();
    /// assert!(filter.contains(42));
    /// ```
    pub fn builder() -> XorFilterBuilder {
        XorFilterBuilder::default()
    }

    /// Returns `true` if the filter may contain the key with seed hash `hash`.
    ///
    /// There are no false negatives, but false positives are possible.
    ///
    /// # Examples
    ///
    /// ```
    /// use xorsearch::xor::Xor8;
    ///
    /// let keys: Vec<u64> = (0..1_000).collect();
    /// let filter = Xor8::builder().build(&keys).unwrap();
    /// assert!(filter.contains(7));
    ///
    /// let empty = Xor8::builder().build(&[]).unwrap();
    /// assert!(empty.contains(7));
    /// ```
    pub fn contains(&self, hash: u64) -> bool {
        if self.fingerprints.is_empty() {
            return true;
        }

        let location = self.placement.locate(hash, self.capacity());
        let [b0, b1, b2] = location.buckets;
        location.fingerprint
            == self.fingerprints[b0 as usize]
                ^ self.fingerprints[b1 as usize]
                ^ self.fingerprints[b2 as usize]
    }

    /// Hashes `bytes` with [`seed_hash`] and queries the filter.
    pub fn contains_bytes(&self, bytes: &[u8]) -> bool {
        self.contains(seed_hash(bytes))
    }

    /// Returns the number of fingerprint slots.
    pub fn capacity(&self) -> u32 {
        self.fingerprints.len() as u32
    }

    /// Returns the number of fingerprints stored by the filter.
    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    /// Returns true if the filter was built from no keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use xorsearch::xor::Xor8;
    ///
    /// let filter = Xor8::builder().build(&[]).unwrap();
    /// assert!(filter.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }

    /// Returns the seed of the attempt that built the filter.
    ///
    /// This is the builder seed when the first attempt succeeded.
    pub fn seed(&self) -> u64 {
        self.placement.seed()
    }

    /// Returns the bits of fingerprint storage spent per key.
    ///
    /// `num_keys` is the number of keys the filter represents; for a
    /// [`SubstringIndex`](crate::index::SubstringIndex) that is its distinct
    /// window count. Returns 0.0 when `num_keys` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use xorsearch::xor::Xor8;
    ///
    /// let keys: Vec<u64> = (0..10_000).collect();
    /// let filter = Xor8::builder().build(&keys).unwrap();
    /// assert!(filter.bits_per_entry(keys.len()) < 10.0);
    /// ```
    pub fn bits_per_entry(&self, num_keys: usize) -> f64 {
        if num_keys == 0 {
            return 0.0;
        }
        (self.fingerprints.len() as f64) * 8.0 / (num_keys as f64)
    }

    /// Returns the fingerprint array.
    pub fn fingerprints(&self) -> &[u8] {
        &self.fingerprints
    }

    pub(super) fn build_from_keys(
        keys: &[u64],
        seed: u64,
        max_attempts: u32,
        load_factor: f64,
        padding: u32,
    ) -> Result<Self, Error> {
        if max_attempts == 0 {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "max_attempts must be at least 1",
            ));
        }
        if !load_factor.is_finite() || load_factor < MIN_LOAD_FACTOR {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!("load_factor must be a finite value of at least {MIN_LOAD_FACTOR}"),
            )
            .with_context("load_factor", load_factor));
        }

        let keys = distinct_keys(keys)?;
        if keys.is_empty() {
            return Ok(Self {
                placement: KeyPlacement::Offset(seed),
                fingerprints: Vec::new(),
            });
        }

        let capacity = compute_capacity(keys.len(), load_factor, padding)?;

        let mut rng_state = seed;
        let mut attempt_seed = seed;
        for attempt in 0..max_attempts {
            if attempt > 0 {
                attempt_seed = splitmix64(&mut rng_state);
            }

            let placement = KeyPlacement::for_attempt(attempt, attempt_seed);
            match try_build_fingerprints(&keys, placement, capacity)? {
                Peeling::Complete(fingerprints) => {
                    debug!(
                        keys = keys.len(),
                        capacity,
                        attempts = attempt + 1,
                        "built xor filter"
                    );
                    return Ok(Self {
                        placement,
                        fingerprints,
                    });
                }
                Peeling::Stalled { peeled } => debug!(
                    attempt,
                    seed = attempt_seed,
                    capacity,
                    peeled,
                    keys = keys.len(),
                    "peeling stalled"
                ),
            }
        }

        warn!(
            keys = keys.len(),
            capacity, max_attempts, "xor filter construction exhausted its attempts"
        );
        Err(Error::new(
            ErrorKind::BuildFailed,
            "failed to construct xor filter; peeling left unresolved keys",
        )
        .with_context("attempts", max_attempts)
        .with_context("keys", keys.len())
        .with_context("capacity", capacity))
    }
}

/// Sorted copy of `keys` without repeats. Two identical keys share all three
/// buckets and can never be peeled.
fn distinct_keys(keys: &[u64]) -> Result<Vec<u64>, Error> {
    let mut distinct = try_with_capacity(keys.len(), "key buffer")?;
    distinct.extend_from_slice(keys);
    distinct.sort_unstable();
    distinct.dedup();
    if distinct.len() < keys.len() {
        debug!(
            duplicates = keys.len() - distinct.len(),
            "dropped duplicate keys"
        );
    }
    Ok(distinct)
}

fn compute_capacity(num_keys: usize, load_factor: f64, padding: u32) -> Result<u32, Error> {
    let estimated = ((num_keys as f64) * load_factor).ceil();
    if estimated > (u32::MAX as f64) {
        return Err(Error::new(
            ErrorKind::InvalidArgument,
            "key set too large to allocate xor filter",
        )
        .with_context("keys", num_keys));
    }

    let capacity = (estimated as u32)
        .checked_add(padding)
        .ok_or_else(|| Error::new(ErrorKind::InvalidArgument, "xor filter size overflow"))?;
    Ok(capacity.max(MIN_CAPACITY))
}
