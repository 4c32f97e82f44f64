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

//! JSON encoding of temporal values.
//!
//! A null value is written as the literal `false`. Non-null values are
//! written as their canonical string. Reading accepts the canonical string,
//! the sibling type's string, `""`, `false` and `null`; the last three give
//! the zero value.

use super::temporal::{TemporalValue, parse_lenient};
use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;
use std::marker::PhantomData;

pub(crate) fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: TemporalValue + fmt::Display,
    S: Serializer,
{
    if value.is_zero() {
        serializer.serialize_bool(false)
    } else {
        serializer.collect_str(value)
    }
}

pub(crate) fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: TemporalValue,
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(TemporalVisitor(PhantomData))
}

struct TemporalVisitor<T>(PhantomData<T>);

impl<'de, T: TemporalValue> Visitor<'de> for TemporalVisitor<T> {
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "a {} string formatted as '{}', false or null",
            T::TYPE_NAME,
            T::LAYOUT
        )
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<T, E> {
        parse_lenient(value).map_err(E::custom)
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<T, E> {
        if value {
            Err(E::invalid_value(de::Unexpected::Bool(true), &self))
        } else {
            Ok(T::zero())
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<T, E> {
        Ok(T::zero())
    }

    fn visit_none<E: de::Error>(self) -> Result<T, E> {
        Ok(T::zero())
    }
}
