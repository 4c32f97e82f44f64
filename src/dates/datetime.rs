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

//! Date-time value type with second precision

use super::calendar;
use super::date::Date;
use super::json;
use super::layout::{
    DEFAULT_SERVER_DATE_FORMAT, DEFAULT_SERVER_DATETIME_FORMAT, format_instant, parse_instant,
    zero_instant,
};
use super::temporal::{self, TemporalValue};
use crate::core::Result;
use crate::driver::{DriverValue, Scanner, Valuer};
use chrono::{Datelike, Local, NaiveDateTime, TimeDelta, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A date-time that encodes as `"YYYY-MM-DD HH:MM:SS"`.
///
/// Sub-second parts of the wrapped instant are kept in memory but ignored by
/// equality, hashing, formatting and null detection. Ordering predicates and
/// [`DateTime::sub`] work on the full instant.
///
/// The null value formats as `0001-01-01 00:00:00` and encodes as `false` in
/// JSON, like [`Date`].
#[derive(Debug, Clone, Copy)]
pub struct DateTime(NaiveDateTime);

impl DateTime {
    /// Wrap an instant
    pub fn new(instant: NaiveDateTime) -> Self {
        Self(instant)
    }

    /// The null date-time
    pub fn zero() -> Self {
        Self(zero_instant())
    }

    /// The current local date-time
    pub fn now() -> Self {
        Self(Local::now().naive_local())
    }

    /// Returns true if the value formats as `0001-01-01 00:00:00`
    pub fn is_zero(&self) -> bool {
        self.to_string() == Self::zero().to_string()
    }

    /// Same as [`DateTime::is_zero`]
    pub fn is_null(&self) -> bool {
        self.is_zero()
    }

    /// Parse a trusted `YYYY-MM-DD HH:MM:SS` literal.
    ///
    /// # Panics
    ///
    /// Panics if `value` does not match the canonical layout. Never call
    /// this on user input.
    pub fn parse(value: &str) -> Self {
        match Self::parse_with_layout(DEFAULT_SERVER_DATETIME_FORMAT, value) {
            Ok(datetime) => datetime,
            Err(err) => panic!("{err}"),
        }
    }

    /// Parse `value` formatted with a chrono `layout`.
    ///
    /// An empty string gives the null value. A date-only layout aligns the
    /// result at midnight.
    pub fn parse_with_layout(layout: &str, value: &str) -> Result<Self> {
        if value.is_empty() {
            return Ok(Self::zero());
        }
        parse_instant(layout, value).map(Self)
    }

    /// Render with an arbitrary chrono layout
    pub fn format(&self, layout: &str) -> Result<String> {
        format_instant(&self.0, layout)
    }

    /// The calendar day of this instant, carrying the time of day along
    pub fn to_date(&self) -> Date {
        Date::new(self.0)
    }

    /// Reports whether both values are the same to the second
    pub fn equal(&self, other: &DateTime) -> bool {
        self.to_string() == other.to_string()
    }

    /// Returns true if `self` is strictly after `other`
    pub fn greater(&self, other: &DateTime) -> bool {
        self.sub(other) > TimeDelta::zero()
    }

    /// Returns true if `self` is after or at `other`
    pub fn greater_equal(&self, other: &DateTime) -> bool {
        self.sub(other) >= TimeDelta::zero()
    }

    /// Returns true if `self` is strictly before `other`
    pub fn lower(&self, other: &DateTime) -> bool {
        self.sub(other) < TimeDelta::zero()
    }

    /// Returns true if `self` is before or at `other`
    pub fn lower_equal(&self, other: &DateTime) -> bool {
        self.sub(other) <= TimeDelta::zero()
    }

    /// The signed duration `self - other`
    pub fn sub(&self, other: &DateTime) -> TimeDelta {
        self.0.signed_duration_since(other.0)
    }

    /// Add years, months and days with calendar normalization
    pub fn add_date(&self, years: i32, months: i32, days: i32) -> Self {
        Self(calendar::add_date(self.0, years, months, days))
    }

    /// Add a fixed duration, saturating at the representable bounds
    pub fn add(&self, delta: TimeDelta) -> Self {
        match self.0.checked_add_signed(delta) {
            Some(instant) => Self(instant),
            None if delta < TimeDelta::zero() => Self(NaiveDateTime::MIN),
            None => Self(NaiveDateTime::MAX),
        }
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    pub fn as_naive(&self) -> &NaiveDateTime {
        &self.0
    }

    pub fn into_naive(self) -> NaiveDateTime {
        self.0
    }
}

impl TemporalValue for DateTime {
    const TYPE_NAME: &'static str = "datetime";
    const LAYOUT: &'static str = DEFAULT_SERVER_DATETIME_FORMAT;
    const FALLBACK_LAYOUT: &'static str = DEFAULT_SERVER_DATE_FORMAT;

    fn zero() -> Self {
        DateTime::zero()
    }

    fn from_instant(instant: NaiveDateTime) -> Self {
        Self(instant)
    }

    fn is_zero(&self) -> bool {
        DateTime::is_zero(self)
    }

    fn instant(&self) -> NaiveDateTime {
        self.0
    }
}

impl Default for DateTime {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0.format(DEFAULT_SERVER_DATETIME_FORMAT).to_string())
    }
}

impl FromStr for DateTime {
    type Err = crate::core::DatesError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_with_layout(DEFAULT_SERVER_DATETIME_FORMAT, s)
    }
}

impl PartialEq for DateTime {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl Eq for DateTime {}

impl Hash for DateTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl From<NaiveDateTime> for DateTime {
    fn from(instant: NaiveDateTime) -> Self {
        Self(instant)
    }
}

impl From<Date> for DateTime {
    fn from(date: Date) -> Self {
        date.to_datetime()
    }
}

impl From<DateTime> for NaiveDateTime {
    fn from(datetime: DateTime) -> Self {
        datetime.0
    }
}

impl Serialize for DateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        json::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for DateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        json::deserialize(deserializer)
    }
}

impl Valuer for DateTime {
    fn value(&self) -> Result<DriverValue> {
        Ok(temporal::driver_value(self))
    }
}

impl Scanner for DateTime {
    fn scan(src: &DriverValue) -> Result<Self> {
        temporal::scan_value(src)
    }
}

impl Valuer for Option<DateTime> {
    fn value(&self) -> Result<DriverValue> {
        match self {
            Some(datetime) => datetime.value(),
            None => Ok(DriverValue::Null),
        }
    }
}

impl Scanner for Option<DateTime> {
    fn scan(src: &DriverValue) -> Result<Self> {
        if src.is_null() {
            return Ok(None);
        }
        DateTime::scan(src).map(Some)
    }
}
