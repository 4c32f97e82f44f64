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

//! Database value boundary
//!
//! [`DriverValue`] mirrors the shapes a SQL driver accepts and hands back.
//! [`Valuer`] is the outbound conversion into such a value and [`Scanner`]
//! the inbound one.

use crate::core::Result;
use chrono::NaiveDateTime;

/// A value as exchanged with a database driver
#[derive(Debug, Clone, PartialEq)]
pub enum DriverValue {
    /// SQL NULL
    Null,
    /// Boolean column
    Bool(bool),
    /// Integer column
    Integer(i64),
    /// Floating point column
    Float(f64),
    /// Text column
    Text(String),
    /// Raw bytes; text columns are often returned this way
    Bytes(Vec<u8>),
    /// Date, time or timestamp column
    Timestamp(NaiveDateTime),
    /// Array column
    List(Vec<DriverValue>),
}

impl DriverValue {
    /// Short name of the value kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Timestamp(_) => "timestamp",
            Self::List(_) => "list",
        }
    }

    /// Check for SQL NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the textual content of `Text`, or of `Bytes` holding UTF-8
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Bytes(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }
}

impl From<&str> for DriverValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DriverValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for DriverValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for DriverValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDateTime> for DriverValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<DriverValue>> From<Vec<T>> for DriverValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// Outbound conversion into a driver value
pub trait Valuer {
    /// Convert `self` into the value handed to the driver
    fn value(&self) -> Result<DriverValue>;
}

/// Inbound conversion from a driver value
pub trait Scanner: Sized {
    /// Build a value from what the driver returned
    fn scan(src: &DriverValue) -> Result<Self>;
}
