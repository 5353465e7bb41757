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

//! Shared helpers for fallible allocation.

use crate::error::Error;
use crate::error::ErrorKind;

/// Returns an empty vector able to hold `len` elements without reallocating.
pub(crate) fn try_with_capacity<T>(len: usize, what: &'static str) -> Result<Vec<T>, Error> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|err| {
        Error::new(ErrorKind::AllocationFailed, format!("failed to allocate {what}"))
            .with_context("len", len)
            .set_source(err)
    })?;
    Ok(v)
}

/// Returns a vector of `len` default values.
pub(crate) fn try_filled<T: Clone + Default>(len: usize, what: &'static str) -> Result<Vec<T>, Error> {
    let mut v = try_with_capacity(len, what)?;
    v.resize(len, T::default());
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_request_reports_allocation_failure() {
        let err = try_with_capacity::<u64>(usize::MAX, "fingerprints").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AllocationFailed);
        assert_eq!(err.message(), "failed to allocate fingerprints");
        assert_eq!(err.context("len"), Some(usize::MAX.to_string().as_str()));
    }

    #[test]
    fn test_filled_is_zeroed() {
        let v = try_filled::<u32>(5, "degrees").unwrap();
        assert_eq!(v, vec![0; 5]);
    }
}
