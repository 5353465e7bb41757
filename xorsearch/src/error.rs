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

//! Error types for xorsearch operations

use std::fmt;

/// ErrorKind is all kinds of Error of xorsearch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An argument or builder setting is out of range.
    InvalidArgument,
    /// Memory for the filter or its construction scratch could not be obtained.
    AllocationFailed,
    /// Peeling did not resolve every key within the configured number of attempts.
    BuildFailed,
}

impl ErrorKind {
    /// Convert this error kind instance into static str.
    pub const fn into_static(self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::AllocationFailed => "AllocationFailed",
            ErrorKind::BuildFailed => "BuildFailed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.into_static())
    }
}

/// Error is the error struct returned by all xorsearch functions.
pub struct Error {
    kind: ErrorKind,
    message: String,
    context: Vec<(&'static str, String)>,
    source: Option<anyhow::Error>,
}

impl Error {
    /// Create a new Error with error kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: Vec::default(),
            source: None,
        }
    }

    /// Add more context in error.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.push((key, value.to_string()));
        self
    }

    /// Set source for error.
    ///
    /// # Panics
    ///
    /// Panics if the source has been set.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::error::Error as _;
    /// use xorsearch::error::{Error, ErrorKind};
    ///
    /// let mut error = Error::new(ErrorKind::AllocationFailed, "failed to reserve bucket lists");
    /// assert!(error.source().is_none());
    /// let reserve = Vec::<u8>::new().try_reserve_exact(usize::MAX).unwrap_err();
    /// error = error.set_source(reserve);
    /// assert!(error.source().is_some());
    /// ```
    pub fn set_source(mut self, src: impl Into<anyhow::Error>) -> Self {
        assert!(self.source.is_none(), "the source error has been set");
        self.source = Some(src.into());
        self
    }

    /// Return error's kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return error's message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Return the value recorded under `key` by [`Error::with_context`], if any.
    pub fn context(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return f
                .debug_struct("Error")
                .field("kind", &self.kind)
                .field("message", &self.message)
                .field("context", &self.context)
                .field("source", &self.source)
                .finish();
        }

        write!(f, "{}", self.kind)?;
        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }
        for (i, (key, value)) in self.context.iter().enumerate() {
            if i == 0 {
                f.write_str("\n\nContext:")?;
            }
            write!(f, "\n   {key}: {value}")?;
        }
        if let Some(source) = &self.source {
            write!(f, "\n\nSource:\n   {source:#}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        let mut pairs = self.context.iter();
        if let Some((key, value)) = pairs.next() {
            write!(f, ", context: {{ {key}: {value}")?;
            for (key, value) in pairs {
                write!(f, ", {key}: {value}")?;
            }
            f.write_str(" }")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }
        if let Some(source) = &self.source {
            write!(f, ", source: {source}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        let source: &(dyn std::error::Error + 'static) = self.source.as_deref()?;
        Some(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context_and_message() {
        let err = Error::new(ErrorKind::BuildFailed, "peeling did not converge")
            .with_context("attempts", 3)
            .with_context("keys", 10);
        assert_eq!(
            err.to_string(),
            "BuildFailed, context: { attempts: 3, keys: 10 } => peeling did not converge"
        );
        assert_eq!(err.context("keys"), Some("10"));
        assert_eq!(err.context("capacity"), None);
    }

    #[test]
    fn test_debug_lists_context_per_line() {
        let err = Error::new(ErrorKind::BuildFailed, "peeling stalled")
            .with_context("window_len", 5)
            .with_context("keys", 39);
        assert_eq!(
            format!("{err:?}"),
            "BuildFailed => peeling stalled\n\nContext:\n   window_len: 5\n   keys: 39\n"
        );
        assert!(format!("{err:#?}").starts_with("Error {"));

        let bare = Error::new(ErrorKind::InvalidArgument, "");
        assert_eq!(format!("{bare:?}"), "InvalidArgument\n");
        assert_eq!(bare.to_string(), "InvalidArgument");
    }

    #[test]
    fn test_source_is_exposed() {
        use std::error::Error as _;

        let reserve = Vec::<u8>::new().try_reserve_exact(usize::MAX).unwrap_err();
        let err = Error::new(ErrorKind::AllocationFailed, "").set_source(reserve);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("AllocationFailed, source: "));
    }

    #[test]
    #[should_panic(expected = "the source error has been set")]
    fn test_source_set_twice_panics() {
        let reserve = || Vec::<u8>::new().try_reserve_exact(usize::MAX).unwrap_err();
        let _ = Error::new(ErrorKind::AllocationFailed, "")
            .set_source(reserve())
            .set_source(reserve());
    }
}
