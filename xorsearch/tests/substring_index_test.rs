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

use googletest::assert_that;
use googletest::prelude::contains_substring;
use proptest::collection::vec;
use proptest::prelude::*;
use xorsearch::error::ErrorKind;
use xorsearch::index::Classification;
use xorsearch::index::SubstringIndex;
use xorsearch::xor::Xor8;

const FOX: &[u8] = b"the quick brown fox";

#[test]
fn test_confirmed_match() {
    let index = SubstringIndex::build(FOX, 5, Xor8::builder()).unwrap();
    assert_eq!(index.text(), FOX);
    assert_eq!(index.num_keys(), 15);
    assert_eq!(index.window_len(), 5);
    assert_eq!(index.filter().capacity(), 51);
    assert_eq!(
        index.classify(b"quick").unwrap(),
        Classification::ConfirmedPresent(4)
    );
    assert_eq!(
        index.classify(b"n fox").unwrap(),
        Classification::ConfirmedPresent(14)
    );
}

#[test]
fn test_absent_pattern_is_never_reported_present() {
    let index = SubstringIndex::build(FOX, 5, Xor8::builder()).unwrap();
    assert_eq!(
        index.classify(b"zzzzz").unwrap(),
        Classification::DefiniteAbsent
    );
}

#[test]
fn test_pattern_equal_to_text() {
    let index = SubstringIndex::build(FOX, FOX.len(), Xor8::builder()).unwrap();
    assert_eq!(index.num_keys(), 1);
    assert_eq!(
        index.classify(FOX).unwrap(),
        Classification::ConfirmedPresent(0)
    );
}

#[test]
fn test_text_shorter_than_window() {
    let index = SubstringIndex::build(b"fox", 5, Xor8::builder()).unwrap();
    assert_eq!(index.num_keys(), 0);
    assert!(index.filter().is_empty());
    // The empty filter lets everything through; the exact scan rejects it.
    assert_eq!(
        index.classify(b"foxes").unwrap(),
        Classification::FalsePositive
    );
}

#[test]
fn test_empty_corpus_builds() {
    let index = SubstringIndex::build(b"", 3, Xor8::builder()).unwrap();
    assert_eq!(index.num_keys(), 0);
    let summary = index.classify_all(Vec::<&[u8]>::new()).unwrap();
    assert!(summary.classifications.is_empty());
}

#[test]
fn test_repeated_windows() {
    let text = b"abababababab";
    let index = SubstringIndex::build(text, 2, Xor8::builder()).unwrap();
    assert_eq!(index.num_keys(), 11);
    assert_eq!(
        index.classify(b"ba").unwrap(),
        Classification::ConfirmedPresent(1)
    );
    assert_eq!(
        index.classify(b"ab").unwrap(),
        Classification::ConfirmedPresent(0)
    );
}

#[test]
fn test_length_mismatch_is_rejected() {
    let index = SubstringIndex::build(FOX, 5, Xor8::builder()).unwrap();
    let err = index.classify(b"fox").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(err.context("pattern_len"), Some("3"));
    assert_that!(err.to_string(), contains_substring("window_len: 5"));
}

#[test]
fn test_build_failure_names_window_len() {
    let text = b"the quick brown fox jumps over the lazy dog";
    let builder = Xor8::builder().max_attempts(1).padding(0);
    let err = SubstringIndex::build(text, 5, builder).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BuildFailed);
    assert_eq!(err.context("window_len"), Some("5"));
    assert_eq!(err.context("keys"), Some("39"));
    assert_eq!(err.context("capacity"), Some("48"));
}

#[test]
fn test_classify_all_summary() {
    let index = SubstringIndex::build(FOX, 5, Xor8::builder()).unwrap();
    let patterns = ["quick", "brown", "apple", "hello", "zzzzz"];
    let summary = index.classify_all(patterns).unwrap();

    assert_eq!(
        summary.classifications,
        vec![
            Classification::ConfirmedPresent(4),
            Classification::ConfirmedPresent(10),
            Classification::DefiniteAbsent,
            Classification::DefiniteAbsent,
            Classification::DefiniteAbsent,
        ]
    );
    assert_eq!(summary.maybe, 2);
    assert_eq!(summary.confirmed, 2);
    assert_eq!(summary.false_positives, 0);
    assert_eq!(summary.definite_absent, 3);
}

#[test]
fn test_queries_are_idempotent() {
    let index = SubstringIndex::build(FOX, 4, Xor8::builder()).unwrap();
    for pattern in [b"quic", b"xxxx", b"own ", b"fox!"] {
        let first = index.classify(pattern).unwrap();
        for _ in 0..3 {
            assert_eq!(index.classify(pattern).unwrap(), first);
        }
    }
}

#[test]
fn test_one_index_per_length() {
    let text = b"data science pattern filter";
    let by_length: [&[u8]; 4] = [b"data", b"pattern", b"filter", b"karp"];
    for pattern in by_length {
        let index = SubstringIndex::build(text, pattern.len(), Xor8::builder()).unwrap();
        let expected = text
            .windows(pattern.len())
            .position(|w| w == pattern)
            .map(Classification::ConfirmedPresent);
        let got = index.classify(pattern).unwrap();
        match expected {
            Some(found) => assert_eq!(got, found),
            None => assert_eq!(got.position(), None),
        }
    }
}

proptest! {
    #[test]
    fn prop_every_window_is_confirmed(
        text in vec(0u8..6, 1..200),
        window in 1usize..6,
    ) {
        prop_assume!(window <= text.len());
        let index = SubstringIndex::build(&text, window, Xor8::builder()).unwrap();
        for (start, pattern) in text.windows(window).enumerate() {
            let got = index.classify(pattern).unwrap();
            let first = text.windows(window).position(|w| w == pattern).unwrap();
            prop_assert!(first <= start);
            prop_assert_eq!(got, Classification::ConfirmedPresent(first));
        }
    }
}
