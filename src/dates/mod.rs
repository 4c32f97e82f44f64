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

//! Date and date-time value types
//!
//! Both types follow the same contract at every boundary:
//!
//! | Boundary | Null value                 | Non-null value              |
//! |----------|----------------------------|-----------------------------|
//! | text     | `0001-01-01[ 00:00:00]`    | canonical layout            |
//! | JSON     | `false` (reads `null` too) | quoted canonical layout     |
//! | database | zero instant timestamp     | wrapped instant timestamp   |

pub mod calendar;
mod date;
mod datetime;
mod json;
pub mod layout;
mod temporal;

pub use date::Date;
pub use datetime::DateTime;
pub use layout::{DEFAULT_SERVER_DATE_FORMAT, DEFAULT_SERVER_DATETIME_FORMAT, zero_instant};
