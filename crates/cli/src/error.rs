// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the rplan library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: run 'resplan init' first")]
    NotInitialized,

    #[error("already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("workspace not found: {0}\n  hint: the workspace directory must exist before linking to it")]
    WorkspaceNotFound(String),

    #[error("no month selected\n  hint: add one with 'resplan month add YYYY-MM' or pass --month")]
    NoMonthSelected,

    #[error("unknown attribute '{attr}'\n  hint: valid attributes are: {valid}")]
    UnknownAttribute { attr: String, valid: &'static str },

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("some allocations failed: {succeeded} applied, {failed} failed")]
    PartialBulkFailure { succeeded: usize, failed: usize },

    #[error(transparent)]
    Core(#[from] rp_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

/// A specialized Result type for rplan operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
