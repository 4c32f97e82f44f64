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

//! Contract shared by [`Date`](super::Date) and [`DateTime`](super::DateTime)

use super::layout::{parse_instant, zero_instant};
use crate::core::{DatesError, Result};
use crate::driver::DriverValue;
use chrono::NaiveDateTime;

/// A temporal value type with a canonical layout and a zero sentinel.
///
/// The JSON and database boundaries are written once against this trait.
pub(crate) trait TemporalValue: Sized {
    /// Name used in error messages ("date", "datetime")
    const TYPE_NAME: &'static str;
    /// Canonical layout
    const LAYOUT: &'static str;
    /// Layout of the sibling type, tried when the canonical one fails
    const FALLBACK_LAYOUT: &'static str;

    fn zero() -> Self;

    fn from_instant(instant: NaiveDateTime) -> Self;

    fn is_zero(&self) -> bool;

    fn instant(&self) -> NaiveDateTime;
}

/// Parse text coming from an external boundary (database or JSON).
///
/// Empty text is the zero value. Otherwise the canonical layout is tried
/// first, then the sibling type's layout, so a date-time string can land in a
/// date column and the other way round. The error of the last attempt is
/// returned.
pub(crate) fn parse_lenient<T: TemporalValue>(value: &str) -> Result<T> {
    if value.is_empty() {
        return Ok(T::zero());
    }
    match parse_instant(T::LAYOUT, value) {
        Ok(instant) => Ok(T::from_instant(instant)),
        Err(err) => {
            log::debug!(
                "{} '{}' does not match '{}' ({}), retrying with '{}'",
                T::TYPE_NAME,
                value,
                T::LAYOUT,
                err,
                T::FALLBACK_LAYOUT
            );
            parse_instant(T::FALLBACK_LAYOUT, value).map(T::from_instant)
        }
    }
}

/// Inbound database conversion shared by both temporal types.
///
/// Timestamps are copied through, text goes through [`parse_lenient`], and
/// any other kind is a [`DatesError::ScanType`].
pub(crate) fn scan_value<T: TemporalValue>(src: &DriverValue) -> Result<T> {
    if let DriverValue::Timestamp(instant) = src {
        return Ok(T::from_instant(*instant));
    }
    match src.as_text() {
        Some(text) => {
            log::trace!("scanning {} from text '{}'", T::TYPE_NAME, text);
            parse_lenient(text)
        }
        None => Err(DatesError::scan_type(T::TYPE_NAME, src.kind())),
    }
}

/// Outbound database conversion: never a SQL NULL, the zero instant instead
pub(crate) fn driver_value<T: TemporalValue>(value: &T) -> DriverValue {
    if value.is_zero() {
        DriverValue::Timestamp(zero_instant())
    } else {
        DriverValue::Timestamp(value.instant())
    }
}
