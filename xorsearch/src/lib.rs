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

//! Substring membership in two stages.
//!
//! 1. An [`xor::Xor8`] filter built once over the hashed length-`m` windows of a
//!    corpus rules most absent patterns out in constant time.
//! 2. Patterns that pass the filter are resolved by an exact
//!    [Rabin–Karp](rabin_karp) scan, which reports either the match position or a
//!    false positive.
//!
//! [`index::SubstringIndex`] ties both stages together for one window length.
//!
//! Reading corpora, case folding and grouping patterns by length are left to
//! the caller.

pub mod error;
pub mod hash;
pub mod index;
pub mod rabin_karp;
pub mod xor;

mod common;
