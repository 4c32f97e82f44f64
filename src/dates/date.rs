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

//! Calendar date value type

use super::calendar;
use super::datetime::DateTime;
use super::json;
use super::layout::{
    DEFAULT_SERVER_DATE_FORMAT, DEFAULT_SERVER_DATETIME_FORMAT, format_instant, parse_instant,
    zero_instant,
};
use super::temporal::{self, TemporalValue};
use crate::core::Result;
use crate::driver::{DriverValue, Scanner, Valuer};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A calendar date that encodes as `"YYYY-MM-DD"`.
///
/// The wrapped instant may carry a time of day. It is kept in memory and
/// through [`Date::to_datetime`], but equality, hashing, formatting and null
/// detection only look at the calendar day.
///
/// The null date is the one whose day is `0001-01-01`. It is what
/// [`Date::default`] returns and it encodes as `false` in JSON.
#[derive(Debug, Clone, Copy)]
pub struct Date(NaiveDateTime);

impl Date {
    /// Wrap an instant
    pub fn new(instant: NaiveDateTime) -> Self {
        Self(instant)
    }

    /// Create a date at midnight, `None` if the day does not exist
    pub fn from_ymd_opt(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from)
    }

    /// The null date
    pub fn zero() -> Self {
        Self(zero_instant())
    }

    /// The current local date. The time of day is kept.
    pub fn today() -> Self {
        Self(Local::now().naive_local())
    }

    /// Returns true if the calendar day is `0001-01-01`
    pub fn is_zero(&self) -> bool {
        self.to_string() == Self::zero().to_string()
    }

    /// Same as [`Date::is_zero`]
    pub fn is_null(&self) -> bool {
        self.is_zero()
    }

    /// Parse a trusted `YYYY-MM-DD` literal.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not a valid `YYYY-MM-DD` date. Never call this on
    /// user input; use [`Date::parse_with_layout`] or [`str::parse`] instead.
    pub fn parse(value: &str) -> Self {
        match Self::parse_with_layout(DEFAULT_SERVER_DATE_FORMAT, value) {
            Ok(date) => date,
            Err(err) => panic!("{err}"),
        }
    }

    /// Parse `value` formatted with a chrono `layout`.
    ///
    /// An empty string gives the null date. A layout with time fields keeps
    /// the parsed time of day in the wrapped instant.
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

    /// Promote to a [`DateTime`] carrying the same instant
    pub fn to_datetime(&self) -> DateTime {
        DateTime::new(self.0)
    }

    /// Reports whether both values are the same calendar day
    pub fn equal(&self, other: &Date) -> bool {
        self.to_string() == other.to_string()
    }

    /// Returns true if `self` is strictly after `other`
    pub fn greater(&self, other: &Date) -> bool {
        self.sub(other) > TimeDelta::zero()
    }

    /// Returns true if `self` is after or at `other`
    pub fn greater_equal(&self, other: &Date) -> bool {
        self.sub(other) >= TimeDelta::zero()
    }

    /// Returns true if `self` is strictly before `other`
    pub fn lower(&self, other: &Date) -> bool {
        self.sub(other) < TimeDelta::zero()
    }

    /// Returns true if `self` is before or at `other`
    pub fn lower_equal(&self, other: &Date) -> bool {
        self.sub(other) <= TimeDelta::zero()
    }

    /// The signed duration `self - other` between the wrapped instants.
    ///
    /// `TimeDelta` spans every representable instant, so the result is
    /// always exact and never needs to saturate.
    pub fn sub(&self, other: &Date) -> TimeDelta {
        self.0.signed_duration_since(other.0)
    }

    /// Add years, months and days with calendar normalization
    pub fn add_date(&self, years: i32, months: i32, days: i32) -> Self {
        Self(calendar::add_date(self.0, years, months, days))
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

    /// The calendar day of the wrapped instant
    pub fn naive_date(&self) -> NaiveDate {
        self.0.date()
    }

    /// The wrapped instant, including any carried time of day
    pub fn as_naive(&self) -> &NaiveDateTime {
        &self.0
    }

    pub fn into_naive(self) -> NaiveDateTime {
        self.0
    }
}

impl TemporalValue for Date {
    const TYPE_NAME: &'static str = "date";
    const LAYOUT: &'static str = DEFAULT_SERVER_DATE_FORMAT;
    const FALLBACK_LAYOUT: &'static str = DEFAULT_SERVER_DATETIME_FORMAT;

    fn zero() -> Self {
        Date::zero()
    }

    fn from_instant(instant: NaiveDateTime) -> Self {
        Self(instant)
    }

    fn is_zero(&self) -> bool {
        Date::is_zero(self)
    }

    fn instant(&self) -> NaiveDateTime {
        self.0
    }
}

impl Default for Date {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0.format(DEFAULT_SERVER_DATE_FORMAT).to_string())
    }
}

impl FromStr for Date {
    type Err = crate::core::DatesError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_with_layout(DEFAULT_SERVER_DATE_FORMAT, s)
    }
}

impl PartialEq for Date {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl Eq for Date {}

impl Hash for Date {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::default()))
    }
}

impl From<NaiveDateTime> for Date {
    fn from(instant: NaiveDateTime) -> Self {
        Self(instant)
    }
}

impl From<Date> for NaiveDateTime {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        json::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        json::deserialize(deserializer)
    }
}

impl Valuer for Date {
    fn value(&self) -> Result<DriverValue> {
        Ok(temporal::driver_value(self))
    }
}

impl Scanner for Date {
    fn scan(src: &DriverValue) -> Result<Self> {
        temporal::scan_value(src)
    }
}

impl Valuer for Option<Date> {
    fn value(&self) -> Result<DriverValue> {
        match self {
            Some(date) => date.value(),
            None => Ok(DriverValue::Null),
        }
    }
}

impl Scanner for Option<Date> {
    fn scan(src: &DriverValue) -> Result<Self> {
        if src.is_null() {
            return Ok(None);
        }
        Date::scan(src).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DatesError, MD0010};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn check_date(date: &Date) {
        assert_eq!((date.year(), date.month(), date.day()), (2017, 8, 1));
    }

    fn sample() -> Date {
        Date::parse_with_layout(DEFAULT_SERVER_DATETIME_FORMAT, "2017-08-01 10:02:57").unwrap()
    }

    #[test]
    fn test_parse_with_datetime_layout() {
        let date = sample();
        check_date(&date);
        assert_eq!(date.to_string(), "2017-08-01");
    }

    #[test]
    fn test_parse_panics_only_on_bad_input() {
        assert!(std::panic::catch_unwind(|| Date::parse("2017-08-01")).is_ok());
        assert!(std::panic::catch_unwind(|| Date::parse("2017-08-01 11:23:32")).is_err());
    }

    #[test]
    fn test_parse_empty_is_zero() {
        assert!(Date::parse_with_layout(DEFAULT_SERVER_DATE_FORMAT, "").unwrap().is_zero());
        assert!("".parse::<Date>().unwrap().is_zero());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "2017-0a-01".parse::<Date>(),
            Err(DatesError::Parse { .. })
        ));
        assert!("2017-08".parse::<Date>().is_err());
    }

    #[test]
    fn test_zero_detection_ignores_time_of_day() {
        assert!(Date::zero().is_zero());
        assert!(Date::default().is_null());
        let noon = zero_instant() + TimeDelta::hours(12);
        assert!(Date::new(noon).is_zero());
        assert!(!sample().is_zero());
    }

    #[test]
    fn test_equality_is_per_day() {
        let morning = Date::parse("2017-08-01");
        assert_eq!(morning, sample());
        assert!(morning.equal(&sample()));
        assert_ne!(morning, Date::parse("2017-08-02"));
    }

    #[test]
    fn test_json_encoding() {
        assert_eq!(serde_json::to_string(&sample()).unwrap(), "\"2017-08-01\"");
        assert_eq!(serde_json::to_string(&Date::zero()).unwrap(), "false");
    }

    #[test]
    fn test_json_decoding() {
        let date: Date = serde_json::from_str("\"2017-08-01\"").unwrap();
        check_date(&date);
        let zero: Date = serde_json::from_str("false").unwrap();
        assert!(zero.is_zero());
        let zero: Date = serde_json::from_str("null").unwrap();
        assert!(zero.is_zero());
        assert!(serde_json::from_str::<Date>("true").is_err());
        assert!(serde_json::from_str::<Date>("20170801").is_err());
        assert!(serde_json::from_str::<Date>("\"01/08/2017\"").is_err());
    }

    #[test]
    fn test_scan_text() {
        let date = Date::scan(&DriverValue::from("2017-08-01 10:02:57")).unwrap();
        check_date(&date);
        assert!(date.equal(&sample()));

        let date = Date::scan(&DriverValue::from("2017-08-01")).unwrap();
        check_date(&date);

        assert!(Date::scan(&DriverValue::from("")).unwrap().is_zero());
        assert!(Date::scan(&DriverValue::from("yesterday")).is_err());
    }

    #[test]
    fn test_scan_timestamp_and_bytes() {
        let date = Date::scan(&DriverValue::Timestamp(*sample().as_naive())).unwrap();
        check_date(&date);
        assert_eq!(date.as_naive(), sample().as_naive());

        assert!(Date::scan(&DriverValue::Timestamp(zero_instant())).unwrap().is_zero());

        let date = Date::scan(&DriverValue::Bytes(b"2017-08-01".to_vec())).unwrap();
        check_date(&date);
    }

    #[test]
    fn test_scan_wrong_type() {
        let err = Date::scan(&DriverValue::from(vec!["foo", "bar"])).unwrap_err();
        assert_eq!(err.error_code(), &MD0010);
        assert!(err.to_string().contains("list"));
        assert!(Date::scan(&DriverValue::Null).is_err());
    }

    #[test]
    fn test_value() {
        let date = sample();
        assert_eq!(date.value().unwrap(), DriverValue::Timestamp(*date.as_naive()));
        assert_eq!(
            Date::zero().value().unwrap(),
            DriverValue::Timestamp(zero_instant())
        );
    }

    #[test]
    fn test_optional_column_round_trip() {
        assert_eq!(None::<Date>.value().unwrap(), DriverValue::Null);
        assert_eq!(Option::<Date>::scan(&DriverValue::Null).unwrap(), None);
        let scanned = Option::<Date>::scan(&DriverValue::from("2017-08-01")).unwrap();
        assert_eq!(scanned, Some(Date::parse("2017-08-01")));
    }

    #[test]
    fn test_to_datetime_keeps_instant() {
        let datetime = DateTime::parse("2017-08-01 10:02:57");
        assert!(sample().to_datetime().equal(&datetime));
        assert_eq!(
            Date::parse("2017-08-01").to_datetime().to_string(),
            "2017-08-01 00:00:00"
        );
    }

    #[test]
    fn test_comparisons() {
        let date1 = Date::parse("2017-08-01");
        let date2 = Date::parse("2017-08-03");
        assert!(date2.greater(&date1));
        assert!(!date1.greater(&date2));
        assert!(date2.greater_equal(&date1));
        assert!(date2.greater_equal(&date2));
        assert!(!date2.lower(&date1));
        assert!(!date2.lower_equal(&date1));
        assert!(date2.lower_equal(&date2));
        assert_eq!(date2.sub(&date1), TimeDelta::days(2));
    }

    #[test]
    fn test_add_date() {
        let date = Date::parse("2017-08-01");
        assert!(date.add_date(0, 2, 3).equal(&Date::parse("2017-10-04")));
        assert_eq!(sample().add_date(0, 0, 1).as_naive().time(), sample().as_naive().time());
    }

    #[test]
    fn test_today_is_not_zero() {
        assert!(!Date::today().is_zero());
    }

    #[test]
    fn test_format_custom_layout() {
        assert_eq!(sample().format("%d/%m/%Y").unwrap(), "01/08/2017");
    }

    #[rstest]
    #[case::first_day(1, 1, 1)]
    #[case::last_day(9999, 12, 31)]
    #[case::leap_day(2016, 2, 29)]
    #[case::leap_century(2000, 2, 29)]
    #[case::common_february(2017, 2, 28)]
    #[case::common_century(1900, 2, 28)]
    #[case::long_month_end(2017, 1, 31)]
    #[case::short_month_end(2017, 4, 30)]
    #[case::year_end(2017, 12, 31)]
    fn test_parse_reproduces_components(#[case] year: i32, #[case] month: u32, #[case] day: u32) {
        let text = format!("{year:04}-{month:02}-{day:02}");
        let date = Date::parse(&text);
        assert_eq!((date.year(), date.month(), date.day()), (year, month, day));
        assert_eq!(date.to_string(), text);
    }

    #[test]
    fn test_every_day_of_a_leap_cycle_round_trips() {
        let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
        for day in start.iter_days().take(4 * 365 + 1) {
            let date = Date::from(day);
            let parsed: Date = date.to_string().parse().unwrap();
            assert_eq!(parsed.naive_date(), day);

            let json = serde_json::to_string(&date).unwrap();
            let decoded: Date = serde_json::from_str(&json).unwrap();
            assert!(decoded.equal(&date));
        }
    }

    #[rstest]
    #[case("2017-02-29")]
    #[case("1900-02-29")]
    #[case("2017-04-31")]
    #[case("2017-13-01")]
    fn test_parse_rejects_days_that_do_not_exist(#[case] input: &str) {
        assert!(input.parse::<Date>().is_err());
    }

    #[test]
    fn test_display_honours_padding() {
        assert_eq!(format!("{:>12}", sample()), "  2017-08-01");
        assert_eq!(format!("{:<11}|", Date::zero()), "0001-01-01 |");
    }
}
