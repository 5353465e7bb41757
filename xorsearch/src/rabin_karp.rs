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

//! Exact substring search with a Rabin–Karp rolling hash.
//!
//! Window hashes are polynomials in an odd base evaluated with wrapping `u64`
//! arithmetic. Equal hashes are only candidates: every hit is confirmed by a
//! byte comparison before it is reported.
//!
//! An empty pattern never matches, and a pattern longer than the text is
//! reported absent without touching the text.
//!
//! ```
//! use xorsearch::rabin_karp::find;
//!
//! assert_eq!(find(b"the quick brown fox", b"quick"), Some(4));
//! assert_eq!(find(b"the quick brown fox", b"slow"), None);
//! assert_eq!(find(b"fox", b""), None);
//! ```

/// Default polynomial base.
pub const DEFAULT_BASE: u64 = 911_382_323;

/// A pattern prepared for rolling-hash search.
#[derive(Debug, Clone)]
pub struct RabinKarp<'a> {
    pattern: &'a [u8],
    base: u64,
    pattern_hash: u64,
    // base^(m-1), the weight of the byte leaving the window
    leading_weight: u64,
}

impl<'a> RabinKarp<'a> {
    /// Prepares `pattern` with [`DEFAULT_BASE`].
    pub fn new(pattern: &'a [u8]) -> Self {
        Self::with_base(pattern, DEFAULT_BASE)
    }

    /// Prepares `pattern` with a caller-chosen base.
    ///
    /// # Panics
    ///
    /// Panics if `base` is even.
    pub fn with_base(pattern: &'a [u8], base: u64) -> Self {
        assert!(base % 2 == 1, "base must be odd");
        let leading_weight = (1..pattern.len()).fold(1u64, |acc, _| acc.wrapping_mul(base));
        Self {
            pattern,
            base,
            pattern_hash: polynomial_hash(pattern, base),
            leading_weight,
        }
    }

    /// Returns the pattern this matcher searches for.
    pub fn pattern(&self) -> &'a [u8] {
        self.pattern
    }

    /// Returns the lowest index at which the pattern occurs in `text`.
    pub fn find(&self, text: &[u8]) -> Option<usize> {
        self.find_iter(text).next()
    }

    /// Iterates over every start index of the pattern in `text`, in ascending
    /// order. Overlapping occurrences are all reported.
    ///
    /// # Examples
    ///
    /// ```
    /// use xorsearch::rabin_karp::RabinKarp;
    ///
    /// let matcher = RabinKarp::new(b"aa");
    /// let found: Vec<usize> = matcher.find_iter(b"aaab").collect();
    /// assert_eq!(found, vec![0, 1]);
    /// ```
    pub fn find_iter<'t>(&'t self, text: &'t [u8]) -> Matches<'a, 't> {
        Matches {
            matcher: self,
            text,
            next_start: 0,
            window_hash: None,
        }
    }

    fn is_match_at(&self, text: &[u8], start: usize, window_hash: u64) -> bool {
        window_hash == self.pattern_hash && &text[start..start + self.pattern.len()] == self.pattern
    }
}

/// Iterator over match positions, returned by [`RabinKarp::find_iter`].
#[derive(Debug)]
pub struct Matches<'a, 't> {
    matcher: &'t RabinKarp<'a>,
    text: &'t [u8],
    next_start: usize,
    // hash of the window starting at `next_start`, once computed
    window_hash: Option<u64>,
}

impl Iterator for Matches<'_, '_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let m = self.matcher.pattern.len();
        let n = self.text.len();
        if m == 0 || m > n {
            return None;
        }

        let mut hash = match self.window_hash {
            Some(hash) => hash,
            None if self.next_start == 0 => polynomial_hash(&self.text[..m], self.matcher.base),
            None => return None,
        };

        while self.next_start + m <= n {
            let start = self.next_start;
            let found = self.matcher.is_match_at(self.text, start, hash);

            self.next_start += 1;
            if start + m < n {
                hash = roll(
                    hash,
                    self.text[start],
                    self.text[start + m],
                    self.matcher.base,
                    self.matcher.leading_weight,
                );
                self.window_hash = Some(hash);
            } else {
                self.window_hash = None;
            }

            if found {
                return Some(start);
            }
        }

        None
    }
}

/// Returns the lowest index of `pattern` in `text`, or `None` when the pattern
/// is empty, longer than the text, or absent.
pub fn find(text: &[u8], pattern: &[u8]) -> Option<usize> {
    RabinKarp::new(pattern).find(text)
}

fn polynomial_hash(bytes: &[u8], base: u64) -> u64 {
    bytes
        .iter()
        .fold(0u64, |h, &b| h.wrapping_mul(base).wrapping_add(b as u64))
}

#[inline]
fn roll(hash: u64, outgoing: u8, incoming: u8, base: u64, leading_weight: u64) -> u64 {
    hash.wrapping_sub((outgoing as u64).wrapping_mul(leading_weight))
        .wrapping_mul(base)
        .wrapping_add(incoming as u64)
}
