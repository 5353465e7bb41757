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

//! Hashing of byte sequences into filter seeds, and derivation of filter slots from a seed.
//!
//! Every key goes through two steps:
//!
//! 1. [`seed_hash`] folds the bytes into a 64-bit FNV-1a value.
//! 2. [`DerivedLocation::derive`] mixes that value three times (offset by [`GOLDEN`])
//!    to pick three bucket indices, and keeps the low byte of the first mix as the
//!    fingerprint.
//!
//! Both steps are pure, so a pattern hashed at query time lands on exactly the
//! slots its matching substring was assigned at build time.

mod derive;
mod fnv;

pub use self::derive::DerivedLocation;
pub use self::derive::GOLDEN;
pub use self::derive::mix64;
pub(crate) use self::derive::splitmix64;
pub use self::fnv::FNV_OFFSET_BASIS;
pub use self::fnv::FNV_PRIME;
pub use self::fnv::Fnv1a64;
pub use self::fnv::seed_hash;
