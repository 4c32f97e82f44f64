// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Core error types with error code system

use chrono::format::{ParseError as ChronoParseError, ParseErrorKind};
use thiserror::Error;

pub use super::error_code::*;

/// Main error type for the temporal value types and their record glue
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatesError {
    /// Text could not be parsed under an explicit layout
    #[error("{error_code}: cannot parse '{value}' with layout '{layout}': {source}")]
    Parse {
        error_code: ErrorCode,
        layout: String,
        value: String,
        #[source]
        source: ChronoParseError,
    },

    /// The database handed back a value of an unsupported kind
    #[error("{error_code}: {target} data is not a timestamp or text but {kind}")]
    ScanType {
        error_code: ErrorCode,
        target: &'static str,
        kind: &'static str,
    },

    /// Structured JSON value with the wrong shape or element types
    #[error("{error_code}: {message}")]
    Decode { error_code: ErrorCode, message: String },

    /// Invalid layout configuration
    #[error("{error_code}: {message}")]
    Config { error_code: ErrorCode, message: String },
}

impl DatesError {
    /// Create a parse error, picking the code from the chrono failure kind
    pub fn parse_error(
        layout: impl Into<String>,
        value: impl Into<String>,
        source: ChronoParseError,
    ) -> Self {
        let error_code = match source.kind() {
            ParseErrorKind::OutOfRange | ParseErrorKind::Impossible => MD0002,
            _ => MD0001,
        };
        Self::Parse {
            error_code,
            layout: layout.into(),
            value: value.into(),
            source,
        }
    }

    /// Create a scan type mismatch error
    pub fn scan_type(target: &'static str, kind: &'static str) -> Self {
        Self::ScanType {
            error_code: MD0010,
            target,
            kind,
        }
    }

    /// Create a JSON decode error
    pub fn decode_error(message: impl Into<String>) -> Self {
        Self::Decode {
            error_code: MD0020,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            error_code: MD0030,
            message: message.into(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &ErrorCode {
        match self {
            Self::Parse { error_code, .. } => error_code,
            Self::ScanType { error_code, .. } => error_code,
            Self::Decode { error_code, .. } => error_code,
            Self::Config { error_code, .. } => error_code,
        }
    }

    /// Get error information with help text
    pub fn error_info(&self) -> &'static ErrorInfo {
        self.error_code().info()
    }
}

/// Result type for temporal operations
pub type Result<T> = std::result::Result<T, DatesError>;
