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

//! Date and date-time values for data models
//!
//! [`Date`] and [`DateTime`] wrap a naive instant and carry a null state
//! (the zero instant) through every boundary a model value crosses: text,
//! JSON and the database driver.

pub mod config;
pub mod core;
pub mod dates;
pub mod driver;
pub mod models;

// Value types
pub use dates::{DEFAULT_SERVER_DATE_FORMAT, DEFAULT_SERVER_DATETIME_FORMAT, Date, DateTime};

// Errors
pub use core::{DatesError, ErrorCode, Result};

// Database boundary
pub use driver::{DriverValue, Scanner, Valuer};

// Model vocabulary
pub use models::{
    FieldMap, FieldName, KeySubstitution, ModelName, RecordIdWithName, RecordRef, Selection,
};

pub use config::LayoutConfig;
