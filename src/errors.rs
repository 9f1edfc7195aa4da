/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error conditions that can be returned by the SIM API client
#[derive(Error, Debug)]
pub enum SimApiError {
    #[error("{status}: {message}")]
    Http { status: u16, message: String },

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Expected JSON response")]
    ExpectedJson(#[source] serde_json::Error),

    #[error("API returned error code {code}: {message}")]
    ApiResponse { code: String, message: String },

    #[error("Unexpected response payload {0}")]
    UnexpectedPayload(&'static str),

    #[error("Expected exactly one result but received {0}")]
    ExpectedSingleResult(usize),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("Unable to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl SimApiError {
    /// HTTP status code of the failed response, if the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SimApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human readable message without the status code prefix
    pub fn message(&self) -> String {
        match self {
            SimApiError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Failures while resolving credentials from a netrc file.
///
/// These never escape [`crate::Client::new`]; the client logs them and continues
/// without authentication.
#[derive(Error, Debug)]
pub enum NetrcError {
    #[error("netrc file not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Cannot resolve {} without a home directory", .0.display())]
    NoHomeDirectory(PathBuf),

    #[error("Unable to read netrc file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{message} ({}, line {line})", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Could not parse host from base URL {0:?}")]
    InvalidBaseUrl(String),

    #[error("No credentials for host {host:?} in {}", .path.display())]
    NoCredentials { host: String, path: PathBuf },

    #[error("Incomplete credentials for host {host:?} in {}", .path.display())]
    IncompleteCredentials { host: String, path: PathBuf },
}

impl NetrcError {
    /// True for the conditions where a netrc file exists but does not yield
    /// usable credentials for the requested host.
    pub fn is_value_error(&self) -> bool {
        matches!(
            self,
            NetrcError::InvalidBaseUrl(_)
                | NetrcError::NoCredentials { .. }
                | NetrcError::IncompleteCredentials { .. }
        )
    }
}
