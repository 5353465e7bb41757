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

//! Scans a corpus for a list of patterns, one xor filter per pattern length.
//!
//! ```text
//! RUST_LOG=xorsearch=debug cargo run -p demos --bin substring_scan -- \
//!     --corpus input.txt quick brown quantum
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use xorsearch::index::Classification;
use xorsearch::index::SubstringIndex;
use xorsearch::xor::Xor8;

const SAMPLE_CORPUS: &str = "The quick brown fox jumps over the lazy dog. \
    Data science relies on pattern matching; the Rabin-Karp algorithm finds a \
    substring match quickly, and an xor filter rules most candidates out first.";

const DEFAULT_PATTERNS: &[&str] = &[
    "apple",
    "quick",
    "brown",
    "quantum",
    "lazy",
    "data",
    "science",
    "pattern",
    "filter",
    "rabin",
    "karp",
    "algorithm",
    "substr",
    "match",
    "hello",
];

#[derive(Parser, Debug)]
#[command(about = "Find patterns in a corpus with an xor filter and a Rabin-Karp pass")]
struct Args {
    /// Corpus file to scan. A built-in sample is used when omitted.
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Patterns to look for. A built-in list is used when omitted.
    patterns: Vec<String>,

    /// Seed of the first filter construction attempt.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Construction attempts per pattern length.
    #[arg(long, default_value_t = 20)]
    max_attempts: u32,

    /// Filter slots per key.
    #[arg(long, default_value_t = 1.23)]
    load_factor: f64,

    /// Match case exactly instead of lowercasing corpus and patterns.
    #[arg(long)]
    case_sensitive: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if args.max_attempts == 0 {
        anyhow::bail!("--max-attempts must be at least 1");
    }

    let mut text = match &args.corpus {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("failed to read corpus {}", path.display()))?,
        None => SAMPLE_CORPUS.as_bytes().to_vec(),
    };
    let mut patterns: Vec<Vec<u8>> = if args.patterns.is_empty() {
        DEFAULT_PATTERNS.iter().map(|p| p.as_bytes().to_vec()).collect()
    } else {
        args.patterns.iter().map(|p| p.as_bytes().to_vec()).collect()
    };
    if !args.case_sensitive {
        text.make_ascii_lowercase();
        patterns.iter_mut().for_each(|p| p.make_ascii_lowercase());
    }

    let mut by_length: BTreeMap<usize, Vec<&[u8]>> = BTreeMap::new();
    for pattern in patterns.iter().filter(|p| !p.is_empty()) {
        by_length.entry(pattern.len()).or_default().push(pattern);
    }

    let builder = Xor8::builder()
        .seed(args.seed)
        .max_attempts(args.max_attempts)
        .load_factor(args.load_factor);

    for (len, group) in &by_length {
        if text.len() < *len {
            println!("Text shorter than m={len}, skipping length");
            continue;
        }
        println!(
            "\n=== Processing patterns of length {len} (count={}) ===",
            group.len()
        );

        let index = match SubstringIndex::build(&text, *len, builder) {
            Ok(index) => index,
            Err(err) => {
                eprintln!("Failed to build xor filter for m={len}: {err}");
                continue;
            }
        };
        println!(
            "Built {} substring keys, filter capacity={}",
            index.num_keys(),
            index.filter().capacity()
        );

        let summary = index.classify_all(group.iter().copied())?;
        for (pattern, classification) in group.iter().zip(&summary.classifications) {
            let shown = String::from_utf8_lossy(pattern);
            match classification {
                Classification::ConfirmedPresent(at) => {
                    println!("Pattern \"{shown}\" => FOUND at {at}")
                }
                Classification::FalsePositive => {
                    println!("Pattern \"{shown}\" => filter maybe, exact scan found nothing")
                }
                Classification::DefiniteAbsent => {
                    println!("Pattern \"{shown}\" => definitely NOT present")
                }
            }
        }
        println!(
            "Summary for length {len}: maybe={}, confirmed={}, false_positives={}",
            summary.maybe, summary.confirmed, summary.false_positives
        );
    }

    Ok(())
}
