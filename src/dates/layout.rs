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

//! Canonical layouts and layout-driven parsing

use crate::core::{DatesError, Result};
use chrono::format::{self, Item, Parsed, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt::Write;

/// Canonical layout of [`Date`](super::Date) values (`YYYY-MM-DD`)
pub const DEFAULT_SERVER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Canonical layout of [`DateTime`](super::DateTime) values (`YYYY-MM-DD HH:MM:SS`)
pub const DEFAULT_SERVER_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The zero instant: 0001-01-01 00:00:00.
///
/// Formatting this instant with a type's canonical layout gives the null
/// sentinel of that type.
pub fn zero_instant() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .unwrap_or_default()
        .and_time(NaiveTime::default())
}

/// Check that `layout` compiles to chrono items and can render a naive
/// instant. Time zone specifiers such as `%Z` or `%z` are rejected.
pub fn validate_layout(layout: &str) -> Result<()> {
    let mut items = 0usize;
    for item in StrftimeItems::new(layout) {
        if matches!(item, Item::Error) {
            return Err(DatesError::config_error(format!(
                "layout '{layout}' contains an unsupported specifier"
            )));
        }
        items += 1;
    }
    if items == 0 {
        return Err(DatesError::config_error("layout is empty"));
    }

    let mut rendered = String::new();
    if write!(rendered, "{}", zero_instant().format(layout)).is_err() {
        return Err(DatesError::config_error(format!(
            "layout '{layout}' needs a time zone and cannot render a naive date-time"
        )));
    }
    Ok(())
}

/// Render `instant` with an arbitrary layout
pub fn format_instant(instant: &NaiveDateTime, layout: &str) -> Result<String> {
    validate_layout(layout)?;
    let mut rendered = String::new();
    write!(rendered, "{}", instant.format(layout)).map_err(|_| {
        DatesError::config_error(format!("layout '{layout}' cannot render {instant}"))
    })?;
    Ok(rendered)
}

/// Parse `value` under `layout` into an instant.
///
/// The layout must provide the calendar day. When it carries no time field
/// the instant is aligned at midnight. When it carries an hour, missing
/// minutes and seconds count as zero. Any other partial time is an error.
pub fn parse_instant(layout: &str, value: &str) -> Result<NaiveDateTime> {
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, value, StrftimeItems::new(layout))
        .map_err(|err| DatesError::parse_error(layout, value, err))?;

    let date = parsed
        .to_naive_date()
        .map_err(|err| DatesError::parse_error(layout, value, err))?;
    if !has_time_fields(&parsed) {
        return Ok(date.and_time(NaiveTime::default()));
    }

    if parsed.minute().is_none() && parsed.hour_mod_12().is_some() {
        parsed
            .set_minute(0)
            .map_err(|err| DatesError::parse_error(layout, value, err))?;
    }
    let time = parsed
        .to_naive_time()
        .map_err(|err| DatesError::parse_error(layout, value, err))?;

    Ok(date.and_time(time))
}

fn has_time_fields(parsed: &Parsed) -> bool {
    parsed.hour_div_12().is_some()
        || parsed.hour_mod_12().is_some()
        || parsed.minute().is_some()
        || parsed.second().is_some()
        || parsed.nanosecond().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MD0001, MD0002, MD0030};
    use chrono::{Datelike, Timelike};
    use rstest::rstest;

    #[test]
    fn test_zero_instant_renders_sentinels() {
        let zero = zero_instant();
        assert_eq!(zero.format(DEFAULT_SERVER_DATE_FORMAT).to_string(), "0001-01-01");
        assert_eq!(
            zero.format(DEFAULT_SERVER_DATETIME_FORMAT).to_string(),
            "0001-01-01 00:00:00"
        );
    }

    #[test]
    fn test_parse_date_only_layout_aligns_at_midnight() {
        let instant = parse_instant(DEFAULT_SERVER_DATE_FORMAT, "2017-08-01").unwrap();
        assert_eq!((instant.year(), instant.month(), instant.day()), (2017, 8, 1));
        assert_eq!(instant.num_seconds_from_midnight(), 0);
    }

    #[test]
    fn test_parse_datetime_layout_keeps_time() {
        let instant = parse_instant(DEFAULT_SERVER_DATETIME_FORMAT, "2017-08-01 10:02:57").unwrap();
        assert_eq!((instant.hour(), instant.minute(), instant.second()), (10, 2, 57));
    }

    #[test]
    fn test_parse_rejects_trailing_input() {
        let err = parse_instant(DEFAULT_SERVER_DATE_FORMAT, "2017-08-01 10:02:57").unwrap_err();
        assert_eq!(err.error_code(), &MD0001);
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        assert!(parse_instant(DEFAULT_SERVER_DATETIME_FORMAT, "2017-08-01").is_err());
        assert!(parse_instant("%H:%M", "10:02").is_err());
    }

    #[test]
    fn test_parse_reports_impossible_dates() {
        let err = parse_instant(DEFAULT_SERVER_DATE_FORMAT, "2017-02-30").unwrap_err();
        assert_eq!(err.error_code(), &MD0002);
    }

    #[test]
    fn test_validate_layout() {
        assert!(validate_layout("%d/%m/%Y").is_ok());
        assert_eq!(validate_layout("").unwrap_err().error_code(), &MD0030);
        assert!(validate_layout("%Q").is_err());
    }

    #[test]
    fn test_format_instant_with_custom_layout() {
        let instant = parse_instant(DEFAULT_SERVER_DATE_FORMAT, "2017-08-01").unwrap();
        assert_eq!(format_instant(&instant, "%d/%m/%Y").unwrap(), "01/08/2017");
        assert!(format_instant(&instant, "%Q").is_err());
    }

    #[rstest]
    #[case::zone_name("%Y-%m-%d %Z")]
    #[case::offset("%Y-%m-%d %z")]
    #[case::offset_colon("%H:%M%:z")]
    #[case::rfc3339("%+")]
    fn test_time_zone_layouts_are_rejected(#[case] layout: &str) {
        assert_eq!(validate_layout(layout).unwrap_err().error_code(), &MD0030);
        let instant = parse_instant(DEFAULT_SERVER_DATE_FORMAT, "2017-08-01").unwrap();
        assert_eq!(format_instant(&instant, layout).unwrap_err().error_code(), &MD0030);
    }

    #[test]
    fn test_parse_hour_only_layout_keeps_hour() {
        let instant = parse_instant("%Y-%m-%d %H", "2017-08-01 17").unwrap();
        assert_eq!((instant.hour(), instant.minute(), instant.second()), (17, 0, 0));

        let instant = parse_instant("%Y-%m-%d %H:%M", "2017-08-01 10:02").unwrap();
        assert_eq!((instant.hour(), instant.minute(), instant.second()), (10, 2, 0));
    }

    #[test]
    fn test_parse_rejects_partial_time_without_hour() {
        assert!(parse_instant("%Y-%m-%d %M", "2017-08-01 30").is_err());
        assert!(parse_instant("%Y-%m-%d %I", "2017-08-01 10").is_err());
    }
}
