// Copyright 2025 the Groupbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors.

use thiserror::Error;

/// Errors returned when parsing a chart configuration payload.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The payload is not valid configuration JSON.
    #[error("invalid chart configuration: {0}")]
    Json(#[from] serde_json::Error),
}
