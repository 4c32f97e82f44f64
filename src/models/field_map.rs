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

//! Column values of a single record

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Primary key column names
const PK_KEYS: [&str; 2] = ["id", "ID"];

/// A string-keyed map of column values.
///
/// Values are stored in their JSON form, so a [`Date`](crate::Date) lands in
/// the map as `"YYYY-MM-DD"` (or `false`) and is read back with
/// [`FieldMap::get_as`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(HashMap<String, JsonValue>);

/// Renames `orig` to `new` in a [`FieldMap`], keeping `orig` if `keep` is set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySubstitution {
    pub orig: String,
    pub new: String,
    pub keep: bool,
}

impl KeySubstitution {
    pub fn new(orig: impl Into<String>, new: impl Into<String>, keep: bool) -> Self {
        Self {
            orig: orig.into(),
            new: new.into(),
            keep,
        }
    }
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Option<JsonValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Insert any serializable value under its JSON form
    pub fn insert_serialized<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> serde_json::Result<Option<JsonValue>> {
        let value = serde_json::to_value(value)?;
        Ok(self.0.insert(key.into(), value))
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    /// Decode the value stored under `key`, `None` if the key is absent
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<serde_json::Result<T>> {
        self.0.get(key).map(|value| T::deserialize(value))
    }

    pub fn remove(&mut self, key: &str) -> Option<JsonValue> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The keys, in no particular order
    pub fn keys(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    /// The values, in no particular order
    pub fn values(&self) -> Vec<&JsonValue> {
        self.0.values().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &JsonValue)> {
        self.0.iter()
    }

    /// Remove the entries referencing the ID field
    pub fn remove_pk(&mut self) {
        for key in PK_KEYS {
            self.0.remove(key);
        }
    }

    /// Remove the entries referencing the ID field when the id is 0.
    ///
    /// Ids that are not integers are left in place.
    pub fn remove_pk_if_zero(&mut self) {
        for key in PK_KEYS {
            if self.0.get(key).and_then(JsonValue::as_i64) == Some(0) {
                log::trace!("dropping zero primary key '{key}'");
                self.0.remove(key);
            }
        }
    }

    /// Apply the substitutions in order.
    ///
    /// A substitution whose original key is missing is skipped.
    pub fn substitute_keys(&mut self, substs: &[KeySubstitution]) {
        for subst in substs {
            let value = if subst.keep {
                self.0.get(&subst.orig).cloned()
            } else {
                self.0.remove(&subst.orig)
            };
            if let Some(value) = value {
                self.0.insert(subst.new.clone(), value);
            }
        }
    }
}

impl From<HashMap<String, JsonValue>> for FieldMap {
    fn from(map: HashMap<String, JsonValue>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<JsonValue>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, JsonValue);
    type IntoIter = std::collections::hash_map::IntoIter<String, JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
