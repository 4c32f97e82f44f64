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

//! Layout configuration for user-facing text
//!
//! Canonical layouts are fixed: JSON, database and `Display` always use
//! them. [`LayoutConfig`] only drives the layouts shown to and read from
//! users.

use crate::core::{DatesError, Result};
use crate::dates::layout::validate_layout;
use crate::dates::{DEFAULT_SERVER_DATE_FORMAT, DEFAULT_SERVER_DATETIME_FORMAT, Date, DateTime};
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`LayoutConfig::date_layout`]
pub const DATE_LAYOUT_ENV: &str = "MODEL_DATES_DATE_LAYOUT";

/// Environment variable overriding [`LayoutConfig::datetime_layout`]
pub const DATETIME_LAYOUT_ENV: &str = "MODEL_DATES_DATETIME_LAYOUT";

/// User-facing layouts, in chrono strftime syntax
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Layout for dates, e.g. `%d/%m/%Y`
    pub date_layout: String,
    /// Layout for date-times, e.g. `%d/%m/%Y %H:%M`
    pub datetime_layout: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            date_layout: DEFAULT_SERVER_DATE_FORMAT.to_string(),
            datetime_layout: DEFAULT_SERVER_DATETIME_FORMAT.to_string(),
        }
    }
}

impl LayoutConfig {
    /// Create a configuration from explicit layouts
    pub fn new(date_layout: impl Into<String>, datetime_layout: impl Into<String>) -> Result<Self> {
        let config = Self {
            date_layout: date_layout.into(),
            datetime_layout: datetime_layout.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON document; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| DatesError::config_error(format!("invalid layout config: {err}")))?;
        config.validate()?;
        log::trace!("loaded layout config {config:?}");
        Ok(config)
    }

    /// Defaults overridden by [`DATE_LAYOUT_ENV`] and [`DATETIME_LAYOUT_ENV`]
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(layout) = lookup(DATE_LAYOUT_ENV) {
            self.date_layout = layout;
        }
        if let Some(layout) = lookup(DATETIME_LAYOUT_ENV) {
            self.datetime_layout = layout;
        }
        if let Err(err) = self.validate() {
            log::warn!("rejected layout overrides: {err}");
            return Err(err);
        }
        Ok(self)
    }

    /// Check that both layouts can be used
    pub fn validate(&self) -> Result<()> {
        validate_layout(&self.date_layout)?;
        validate_layout(&self.datetime_layout)
    }

    pub fn format_date(&self, date: &Date) -> Result<String> {
        if date.is_zero() {
            return Ok(String::new());
        }
        date.format(&self.date_layout)
    }

    pub fn format_datetime(&self, datetime: &DateTime) -> Result<String> {
        if datetime.is_zero() {
            return Ok(String::new());
        }
        datetime.format(&self.datetime_layout)
    }

    /// Parse user text, empty text being the null date
    pub fn parse_date(&self, value: &str) -> Result<Date> {
        Date::parse_with_layout(&self.date_layout, value.trim())
    }

    /// Parse user text, empty text being the null date-time
    pub fn parse_datetime(&self, value: &str) -> Result<DateTime> {
        DateTime::parse_with_layout(&self.datetime_layout, value.trim())
    }
}
