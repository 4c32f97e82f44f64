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

//! Calendar-unit arithmetic
//!
//! Offsets are applied the way a normalizing calendar does it: years and
//! months are folded into a month count first, then the day offset is applied
//! from the first of the resulting month. An out-of-range day therefore rolls
//! into the following month instead of being clamped, so
//! `2017-08-31 + 1 month` is `2017-10-01`.

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};

/// Shift `instant` by whole years, months and days, keeping its time of day.
///
/// Results outside the representable range saturate to
/// [`NaiveDateTime::MIN`] or [`NaiveDateTime::MAX`].
pub fn add_date(instant: NaiveDateTime, years: i32, months: i32, days: i32) -> NaiveDateTime {
    let date = instant.date();
    let total_months = i64::from(date.year()) * 12
        + i64::from(date.month0())
        + i64::from(years) * 12
        + i64::from(months);

    let year = total_months.div_euclid(12);
    let month = total_months.rem_euclid(12) as u32 + 1;
    let first_of_month = i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, 1));
    let Some(first_of_month) = first_of_month else {
        return saturate(year < 0);
    };

    let offset = i64::from(date.day0()) + i64::from(days);
    TimeDelta::try_days(offset)
        .and_then(|delta| first_of_month.checked_add_signed(delta))
        .map(|shifted| shifted.and_time(instant.time()))
        .unwrap_or_else(|| saturate(offset < 0))
}

fn saturate(negative: bool) -> NaiveDateTime {
    if negative {
        NaiveDateTime::MIN
    } else {
        NaiveDateTime::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn at(date: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{date} 08:30:00"), "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[rstest]
    #[case("2017-08-01", 0, 2, 3, "2017-10-04")]
    #[case("2017-08-31", 0, 1, 0, "2017-10-01")]
    #[case("2017-01-31", 0, 1, 0, "2017-03-03")]
    #[case("2016-02-29", 1, 0, 0, "2017-03-01")]
    #[case("2017-12-15", 0, 1, 0, "2018-01-15")]
    #[case("2017-01-15", 0, -1, 0, "2016-12-15")]
    #[case("2017-03-01", 0, 0, -1, "2017-02-28")]
    #[case("2017-08-01", -1, -13, 0, "2015-07-01")]
    #[case("2017-08-01", 0, 0, 365, "2018-08-01")]
    fn test_add_date_normalizes(
        #[case] start: &str,
        #[case] years: i32,
        #[case] months: i32,
        #[case] days: i32,
        #[case] expected: &str,
    ) {
        let shifted = add_date(at(start), years, months, days);
        assert_eq!(shifted, at(expected));
    }

    #[test]
    fn test_add_date_saturates() {
        assert_eq!(add_date(at("2017-08-01"), i32::MAX, 0, 0), NaiveDateTime::MAX);
        assert_eq!(add_date(at("2017-08-01"), i32::MIN, 0, 0), NaiveDateTime::MIN);
        assert_eq!(add_date(NaiveDateTime::MAX, 0, 0, 1), NaiveDateTime::MAX);
    }
}
