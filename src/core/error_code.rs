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

//! Error code system in the style of the Rust compiler (E0001, E0002, etc.)
//!
//! Every [`DatesError`](super::DatesError) carries one of the `MDxxxx` codes
//! defined here. Codes are grouped by the boundary that raised them.

use std::fmt;

/// Error categories for organizing error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Text boundary errors (MD0001-MD0009)
    Text,
    /// Database boundary errors (MD0010-MD0019)
    Database,
    /// JSON boundary errors (MD0020-MD0029)
    Json,
    /// Configuration errors (MD0030-MD0039)
    Config,
}

/// Error code following the compiler pattern (MD0001, MD0002, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode {
    pub code: u16,
}

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self { code }
    }

    /// Get the full error code string (e.g., "MD0001")
    pub fn code_str(&self) -> String {
        format!("MD{:04}", self.code)
    }

    /// Get error information from the registry
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_REGISTRY.get_error_info(self)
    }

    /// Get error category for this error code
    pub fn category(&self) -> ErrorCategory {
        match self.code {
            10..=19 => ErrorCategory::Database,
            20..=29 => ErrorCategory::Json,
            30..=39 => ErrorCategory::Config,
            _ => ErrorCategory::Text,
        }
    }

    /// Get human-readable description for this error code
    pub fn description(&self) -> &'static str {
        self.info().title
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MD{:04}", self.code)
    }
}

/// Error information attached to a code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Error code number
    pub code: u16,
    /// Human-readable error title
    pub title: &'static str,
    /// Detailed description of the error
    pub description: &'static str,
    /// Help information and suggested solutions
    pub help: &'static str,
}

impl ErrorInfo {
    pub const fn new(
        code: u16,
        title: &'static str,
        description: &'static str,
        help: &'static str,
    ) -> Self {
        Self {
            code,
            title,
            description,
            help,
        }
    }
}

/// Central error registry containing all error definitions
pub struct ErrorRegistry;

impl ErrorRegistry {
    /// Get error information for a given error code
    pub fn get_error_info(&self, error_code: &ErrorCode) -> &'static ErrorInfo {
        match error_code.code {
            1 => &MD0001_INFO,
            2 => &MD0002_INFO,
            10 => &MD0010_INFO,
            20 => &MD0020_INFO,
            30 => &MD0030_INFO,
            _ => &UNKNOWN_ERROR_INFO,
        }
    }
}

/// Global error registry instance
pub static ERROR_REGISTRY: ErrorRegistry = ErrorRegistry;

pub const MD0001: ErrorCode = ErrorCode::new(1); // Text does not match layout
pub const MD0002: ErrorCode = ErrorCode::new(2); // Parsed value out of range
pub const MD0010: ErrorCode = ErrorCode::new(10); // Unsupported scan source
pub const MD0020: ErrorCode = ErrorCode::new(20); // Malformed JSON shape
pub const MD0030: ErrorCode = ErrorCode::new(30); // Invalid layout configuration

static MD0001_INFO: ErrorInfo = ErrorInfo::new(
    1,
    "Text does not match layout",
    "The input could not be parsed with the requested layout. Either a field is missing, a component is not numeric, or there is trailing input.",
    "Dates use YYYY-MM-DD and date-times use YYYY-MM-DD HH:MM:SS. Check the layout passed to parse_with_layout.",
);

static MD0002_INFO: ErrorInfo = ErrorInfo::new(
    2,
    "Parsed value out of range",
    "The text was well formed but does not describe a real calendar date or time.",
    "Check the month (1-12), the day against the month length, and the time fields.",
);

static MD0010_INFO: ErrorInfo = ErrorInfo::new(
    10,
    "Unsupported scan source",
    "The database driver returned a value whose kind cannot be converted into a date or date-time.",
    "Temporal columns must come back as timestamps, text or UTF-8 bytes. Use Option<T> for nullable columns.",
);

static MD0020_INFO: ErrorInfo = ErrorInfo::new(
    20,
    "Malformed JSON shape",
    "The JSON value has the wrong shape or element types for the target type.",
    "Record references are encoded as [id, name]. Dates are encoded as strings or false.",
);

static MD0030_INFO: ErrorInfo = ErrorInfo::new(
    30,
    "Invalid layout configuration",
    "A configured layout cannot be used to format or parse values.",
    "Layouts use chrono strftime syntax, for example %d/%m/%Y.",
);

static UNKNOWN_ERROR_INFO: ErrorInfo = ErrorInfo::new(
    0,
    "Unknown error",
    "An unknown error occurred that is not registered in the error code system.",
    "This may indicate a bug in the library. Please report this issue with the error details.",
);
