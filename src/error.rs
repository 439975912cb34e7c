// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Library error type.
//!
//! Lookup misses and bad amounts are not errors: the former surface as
//! [`Change::NotFound`](crate::recurrence::Change::NotFound), the latter are
//! coerced to zero. What remains is storage and input parsing.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("storage: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("serialization: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid month '{0}'")]
    InvalidMonth(String),
    #[error("Invalid transaction type '{0}', expected income or expense")]
    InvalidKind(String),
    #[error("Could not determine platform-specific data dir")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, Error>;
