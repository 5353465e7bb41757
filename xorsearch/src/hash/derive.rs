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

/// Golden-ratio increment separating the three bucket derivations.
pub const GOLDEN: u64 = 0x9e37_79b9_7f4a_7c15;

/// Bucket indices and fingerprint of one seed hash within a filter of a given capacity.
///
/// Two or all three buckets may coincide; the builder and the query both
/// handle that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedLocation {
    pub buckets: [u32; 3],
    pub fingerprint: u8,
}

impl DerivedLocation {
    /// Derives the three buckets and the fingerprint of `seed` for a filter of `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use xorsearch::hash::DerivedLocation;
    ///
    /// let loc = DerivedLocation::derive(42, 100);
    /// assert!(loc.buckets.iter().all(|&b| b < 100));
    /// assert_eq!(loc, DerivedLocation::derive(42, 100));
    /// ```
    #[inline]
    pub fn derive(seed: u64, capacity: u32) -> Self {
        assert!(capacity > 0, "capacity must be positive");
        let first = mix64(seed);
        let second = mix64(seed.wrapping_add(GOLDEN));
        let third = mix64(seed.wrapping_add(GOLDEN.wrapping_mul(2)));
        let n = capacity as u64;
        Self {
            buckets: [(first % n) as u32, (second % n) as u32, (third % n) as u32],
            fingerprint: first as u8,
        }
    }

    /// Returns the two buckets other than `assigned`, as referenced by this key.
    ///
    /// When `assigned` occurs once among the three buckets, the remaining two are
    /// returned in order. Duplicate references are preserved so that xoring the
    /// returned slots cancels them out.
    #[inline]
    pub(crate) fn others(&self, assigned: u32) -> [u32; 2] {
        let [b0, b1, b2] = self.buckets;
        if b0 == assigned {
            [b1, b2]
        } else if b1 == assigned {
            [b0, b2]
        } else {
            [b0, b1]
        }
    }
}

/// SplitMix64 finalizer.
#[inline]
pub fn mix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

/// Advances a SplitMix64 state and returns the next value.
#[inline]
pub(crate) fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(GOLDEN);
    mix64(*state)
}
