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

//! One peeling attempt over a fixed capacity and key placement.
//!
//! Keys are hyperedges over the `capacity` buckets. Buckets referenced by a single
//! live key are peeled off one at a time; a key whose buckets can no longer be
//! reduced to degree 1 leaves a 2-core behind and the attempt fails.

use crate::common::try_filled;
use crate::common::try_with_capacity;
use crate::error::Error;
use crate::hash::DerivedLocation;
use crate::xor::sketch::KeyPlacement;

#[derive(Debug, Clone, Copy)]
struct KeyRecord {
    location: DerivedLocation,
    removed: bool,
}

/// Bucket to key adjacency, flattened: keys referencing bucket `b` are
/// `members[offsets[b]..offsets[b + 1]]`.
struct BucketIndex {
    offsets: Vec<usize>,
    members: Vec<u32>,
}

impl BucketIndex {
    fn build(records: &[KeyRecord], capacity: usize) -> Result<Self, Error> {
        let mut offsets: Vec<usize> = try_filled(capacity + 1, "bucket offsets")?;
        for record in records {
            for &b in &record.location.buckets {
                offsets[b as usize + 1] += 1;
            }
        }
        for b in 0..capacity {
            offsets[b + 1] += offsets[b];
        }

        let mut members: Vec<u32> = try_filled(offsets[capacity], "bucket members")?;
        let mut cursor: Vec<usize> = try_with_capacity(capacity, "bucket cursors")?;
        cursor.extend_from_slice(&offsets[..capacity]);
        for (key, record) in records.iter().enumerate() {
            for &b in &record.location.buckets {
                let slot = &mut cursor[b as usize];
                members[*slot] = key as u32;
                *slot += 1;
            }
        }

        Ok(Self { offsets, members })
    }

    fn degree(&self, bucket: usize) -> u32 {
        (self.offsets[bucket + 1] - self.offsets[bucket]) as u32
    }

    fn keys(&self, bucket: usize) -> &[u32] {
        &self.members[self.offsets[bucket]..self.offsets[bucket + 1]]
    }
}

/// Result of one peeling attempt.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Peeling {
    Complete(Vec<u8>),
    Stalled { peeled: usize },
}

/// Tries to assign fingerprints for `keys` into `capacity` slots.
///
/// All scratch is dropped before returning on every path.
pub(super) fn try_build_fingerprints(
    keys: &[u64],
    placement: KeyPlacement,
    capacity: u32,
) -> Result<Peeling, Error> {
    let cap = capacity as usize;

    let mut records: Vec<KeyRecord> = try_with_capacity(keys.len(), "key records")?;
    records.extend(keys.iter().map(|&hash| KeyRecord {
        location: placement.locate(hash, capacity),
        removed: false,
    }));

    let index = BucketIndex::build(&records, cap)?;
    let mut degree: Vec<u32> = try_with_capacity(cap, "bucket degrees")?;
    degree.extend((0..cap).map(|b| index.degree(b)));

    // A bucket is pushed at most once when it starts at degree 1 and at most once
    // when it drops to 1, and never both.
    let mut stack: Vec<u32> = try_with_capacity(cap, "peel stack")?;
    stack.extend((0..capacity).filter(|&b| degree[b as usize] == 1));

    let mut order: Vec<(u32, u32)> = try_with_capacity(keys.len(), "peel order")?;
    while let Some(bucket) = stack.pop() {
        let b = bucket as usize;
        if degree[b] != 1 {
            continue;
        }
        let Some(key) = index
            .keys(b)
            .iter()
            .copied()
            .find(|&k| !records[k as usize].removed)
        else {
            continue;
        };

        let record = &mut records[key as usize];
        record.removed = true;
        order.push((key, bucket));
        degree[b] = 0;

        for other in record.location.others(bucket) {
            let o = other as usize;
            degree[o] -= 1;
            if degree[o] == 1 {
                stack.push(other);
            }
        }
    }

    if order.len() != keys.len() {
        return Ok(Peeling::Stalled {
            peeled: order.len(),
        });
    }

    let mut fingerprints: Vec<u8> = try_filled(cap, "fingerprints")?;
    for &(key, bucket) in order.iter().rev() {
        let location = records[key as usize].location;
        let [o1, o2] = location.others(bucket);
        fingerprints[bucket as usize] =
            location.fingerprint ^ fingerprints[o1 as usize] ^ fingerprints[o2 as usize];
    }

    Ok(Peeling::Complete(fingerprints))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::GOLDEN;

    fn satisfies(fingerprints: &[u8], hash: u64, placement: KeyPlacement) -> bool {
        let loc = placement.locate(hash, fingerprints.len() as u32);
        let [b0, b1, b2] = loc.buckets;
        loc.fingerprint
            == fingerprints[b0 as usize] ^ fingerprints[b1 as usize] ^ fingerprints[b2 as usize]
    }

    fn complete(peeling: Peeling) -> Vec<u8> {
        match peeling {
            Peeling::Complete(fingerprints) => fingerprints,
            Peeling::Stalled { peeled } => panic!("peeling stalled after {peeled} keys"),
        }
    }

    #[test]
    fn test_bucket_index_counts_repeated_buckets() {
        let records = [
            KeyRecord {
                location: DerivedLocation {
                    buckets: [1, 1, 3],
                    fingerprint: 0,
                },
                removed: false,
            },
            KeyRecord {
                location: DerivedLocation {
                    buckets: [0, 3, 2],
                    fingerprint: 0,
                },
                removed: false,
            },
        ];
        let index = BucketIndex::build(&records, 4).unwrap();
        assert_eq!(index.degree(0), 1);
        assert_eq!(index.degree(1), 2);
        assert_eq!(index.degree(2), 1);
        assert_eq!(index.degree(3), 2);
        assert_eq!(index.keys(1), &[0, 0]);
        assert_eq!(index.keys(3), &[0, 1]);
    }

    #[test]
    fn test_peeled_fingerprints_satisfy_every_key() {
        let keys: Vec<u64> = (0..500u64).map(|i| i.wrapping_mul(0x9e37_79b9)).collect();
        let placement = KeyPlacement::Offset(0);
        let fingerprints = complete(try_build_fingerprints(&keys, placement, 700).unwrap());
        assert_eq!(fingerprints.len(), 700);
        for &key in &keys {
            assert!(satisfies(&fingerprints, key, placement));
        }
    }

    #[test]
    fn test_remixed_attempt_satisfies_every_key() {
        let keys: Vec<u64> = (0..500u64).map(|i| i.wrapping_mul(GOLDEN)).collect();
        let placement = KeyPlacement::Remix(0x5eed);
        let fingerprints = complete(try_build_fingerprints(&keys, placement, 700).unwrap());
        for &key in &keys {
            assert!(satisfies(&fingerprints, key, placement));
        }
    }

    #[test]
    fn test_duplicate_keys_cannot_be_peeled() {
        let keys = [11u64, 11];
        assert_eq!(
            try_build_fingerprints(&keys, KeyPlacement::Offset(0), 64).unwrap(),
            Peeling::Stalled { peeled: 0 }
        );
    }

    #[test]
    fn test_stall_reports_partial_progress() {
        // The duplicated 11 always stays in the 2-core.
        let keys = [11u64, 11, 12, 13];
        match try_build_fingerprints(&keys, KeyPlacement::Offset(0), 64).unwrap() {
            Peeling::Stalled { peeled } => assert!(peeled < keys.len()),
            Peeling::Complete(_) => panic!("duplicated key was peeled"),
        }
    }

    #[test]
    fn test_attempt_is_deterministic() {
        let keys: Vec<u64> = (1..=64).collect();
        let first = try_build_fingerprints(&keys, KeyPlacement::Remix(99), 120).unwrap();
        let second = try_build_fingerprints(&keys, KeyPlacement::Remix(99), 120).unwrap();
        assert_eq!(first, second);
    }
}
