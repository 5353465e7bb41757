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

//! Two-stage substring lookup over one corpus and one window length.
//!
//! [`SubstringIndex`] hashes every window of length `m` of the corpus into an
//! [`Xor8`] filter. A pattern of length `m` is first checked against the filter;
//! only filter hits pay for a full Rabin–Karp scan of the corpus.
//!
//! Patterns of different lengths need one index per length. Grouping patterns
//! by length is left to the caller.
//!
//! # Examples
//!
//! ```
//! use xorsearch::index::Classification;
//! use xorsearch::index::SubstringIndex;
//! use xorsearch::xor::Xor8;
//!
//! let text = b"the quick brown fox";
//! let index = SubstringIndex::build(text, 5, Xor8::builder()).unwrap();
//!
//! assert_eq!(index.num_keys(), 15);
//! assert_eq!(
//!     index.classify(b"quick").unwrap(),
//!     Classification::ConfirmedPresent(4)
//! );
//! ```

use tracing::trace;

use crate::common::try_with_capacity;
use crate::error::Error;
use crate::error::ErrorKind;
use crate::hash::seed_hash;
use crate::rabin_karp;
use crate::xor::Xor8;
use crate::xor::XorFilterBuilder;

/// Outcome of looking a pattern up in a [`SubstringIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// The filter rules the pattern out; the corpus was not scanned.
    DefiniteAbsent,
    /// The filter reported a possible hit and the exact scan found the pattern
    /// at this index.
    ConfirmedPresent(usize),
    /// The filter reported a possible hit but the exact scan found nothing.
    FalsePositive,
}

impl Classification {
    /// Returns the match position for confirmed hits.
    pub fn position(&self) -> Option<usize> {
        match self {
            Classification::ConfirmedPresent(index) => Some(*index),
            _ => None,
        }
    }

    /// Returns true if the filter let the pattern through to the exact scan.
    pub fn passed_filter(&self) -> bool {
        !matches!(self, Classification::DefiniteAbsent)
    }
}

/// Per-pattern results of [`SubstringIndex::classify_all`] with their tallies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// One entry per input pattern, in input order.
    pub classifications: Vec<Classification>,
    /// Patterns the filter reported as possibly present.
    pub maybe: usize,
    /// Patterns the exact scan found.
    pub confirmed: usize,
    /// Filter hits the exact scan could not find.
    pub false_positives: usize,
    /// Patterns the filter ruled out.
    pub definite_absent: usize,
}

impl ScanSummary {
    fn record(&mut self, classification: Classification) {
        match classification {
            Classification::DefiniteAbsent => self.definite_absent += 1,
            Classification::ConfirmedPresent(_) => {
                self.maybe += 1;
                self.confirmed += 1;
            }
            Classification::FalsePositive => {
                self.maybe += 1;
                self.false_positives += 1;
            }
        }
        self.classifications.push(classification);
    }
}

/// An xor filter over all length-`m` windows of a borrowed corpus.
#[derive(Debug, Clone)]
pub struct SubstringIndex<'a> {
    text: &'a [u8],
    window_len: usize,
    num_keys: usize,
    filter: Xor8,
}

impl<'a> SubstringIndex<'a> {
    /// Builds the filter over every window `text[i..i + window_len]`.
    ///
    /// A corpus shorter than `window_len`, or a zero `window_len`, yields no
    /// keys and an empty filter that lets every pattern through to the exact scan.
    ///
    /// # Errors
    ///
    /// Propagates allocation and construction errors from the filter builder.
    pub fn build(
        text: &'a [u8],
        window_len: usize,
        builder: XorFilterBuilder,
    ) -> Result<Self, Error> {
        let keys = window_hashes(text, window_len)?;
        let filter = builder
            .build(&keys)
            .map_err(|err| err.with_context("window_len", window_len))?;
        Ok(Self {
            text,
            window_len,
            num_keys: keys.len(),
            filter,
        })
    }

    /// Looks `pattern` up, scanning the corpus only on a filter hit.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`] if the pattern length differs from
    /// the index's window length.
    pub fn classify(&self, pattern: &[u8]) -> Result<Classification, Error> {
        if pattern.len() != self.window_len {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "pattern length must equal the index window length",
            )
            .with_context("window_len", self.window_len)
            .with_context("pattern_len", pattern.len()));
        }

        let classification = if !self.filter.contains(seed_hash(pattern)) {
            Classification::DefiniteAbsent
        } else {
            match rabin_karp::find(self.text, pattern) {
                Some(index) => Classification::ConfirmedPresent(index),
                None => Classification::FalsePositive,
            }
        };
        trace!(
            window_len = self.window_len,
            ?classification,
            "classified pattern"
        );
        Ok(classification)
    }

    /// Classifies every pattern and tallies the outcomes.
    ///
    /// # Errors
    ///
    /// Fails on the first pattern whose length differs from the window length.
    pub fn classify_all<I, P>(&self, patterns: I) -> Result<ScanSummary, Error>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let mut summary = ScanSummary::default();
        for pattern in patterns {
            summary.record(self.classify(pattern.as_ref())?);
        }
        Ok(summary)
    }

    /// Returns the indexed corpus.
    pub fn text(&self) -> &'a [u8] {
        self.text
    }

    /// Returns the window length `m`; only patterns of this length can be classified.
    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// Returns the number of windows hashed, repeats included.
    pub fn num_keys(&self) -> usize {
        self.num_keys
    }

    /// Returns the filter built over the window hashes.
    pub fn filter(&self) -> &Xor8 {
        &self.filter
    }
}

/// Seed hashes of every window of `text` of length `window_len`.
fn window_hashes(text: &[u8], window_len: usize) -> Result<Vec<u64>, Error> {
    if window_len == 0 || text.len() < window_len {
        return Ok(Vec::new());
    }
    let count = text.len() - window_len + 1;
    let mut keys = try_with_capacity(count, "window hashes")?;
    keys.extend(text.windows(window_len).map(seed_hash));
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_hashes() {
        let keys = window_hashes(b"abcd", 2).unwrap();
        assert_eq!(keys, vec![seed_hash(b"ab"), seed_hash(b"bc"), seed_hash(b"cd")]);
        assert!(window_hashes(b"abcd", 5).unwrap().is_empty());
        assert!(window_hashes(b"abcd", 0).unwrap().is_empty());
        assert_eq!(window_hashes(b"abcd", 4).unwrap(), vec![seed_hash(b"abcd")]);
    }

    #[test]
    fn test_summary_tallies() {
        let mut summary = ScanSummary::default();
        summary.record(Classification::ConfirmedPresent(3));
        summary.record(Classification::FalsePositive);
        summary.record(Classification::DefiniteAbsent);
        summary.record(Classification::DefiniteAbsent);
        assert_eq!(summary.maybe, 2);
        assert_eq!(summary.confirmed, 1);
        assert_eq!(summary.false_positives, 1);
        assert_eq!(summary.definite_absent, 2);
        assert_eq!(summary.classifications.len(), 4);
    }
}
