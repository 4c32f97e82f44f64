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

//! Record identification and labelling vocabulary

use crate::core::DatesError;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// The name of a model
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelName(String);

/// The name of a field in a model
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(String);

macro_rules! string_name {
    ($name:ident) => {
        impl $name {
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self(name.to_string())
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self(name)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_name!(ModelName);
string_name!(FieldName);

/// Uniquely identifies a record by its model and id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordRef {
    pub model_name: ModelName,
    pub id: i64,
}

impl RecordRef {
    pub fn new(model_name: impl Into<ModelName>, id: i64) -> Self {
        Self {
            model_name: model_name.into(),
            id,
        }
    }
}

/// The id and display name of a record, encoded as `[id, name]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RecordIdWithName {
    pub id: i64,
    pub name: String,
}

impl RecordIdWithName {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Serialize for RecordIdWithName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.id)?;
        tuple.serialize_element(&self.name)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for RecordIdWithName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(RecordIdWithNameVisitor)
    }
}

struct RecordIdWithNameVisitor;

impl<'de> Visitor<'de> for RecordIdWithNameVisitor {
    type Value = RecordIdWithName;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an array [id, name]")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let id: i64 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let name: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;

        let mut extra = 0usize;
        while seq.next_element::<de::IgnoredAny>()?.is_some() {
            extra += 1;
        }
        if extra > 0 {
            return Err(de::Error::custom(DatesError::decode_error(format!(
                "record reference must have 2 elements, got {}",
                2 + extra
            ))));
        }

        Ok(RecordIdWithName { id, name })
    }
}

/// Possible `(key, label)` values of a selection field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(BTreeMap<String, String>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), label.into())
    }

    /// The label shown for `key`
    pub fn label(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Selection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_record_id_with_name_encodes_as_array() {
        let rec = RecordIdWithName::new(7, "Jane Doe");
        assert_eq!(serde_json::to_string(&rec).unwrap(), r#"[7,"Jane Doe"]"#);
        let decoded: RecordIdWithName = serde_json::from_str(r#"[7,"Jane Doe"]"#).unwrap();
        assert_eq!(decoded, rec);
    }

    #[rstest]
    #[case::empty("[]")]
    #[case::too_short("[1]")]
    #[case::too_long(r#"[1, "a", 2]"#)]
    #[case::id_is_text(r#"["1", "a"]"#)]
    #[case::name_is_number("[1, 2]")]
    #[case::id_is_float(r#"[1.5, "a"]"#)]
    #[case::object(r#"{"id": 1, "name": "a"}"#)]
    fn test_record_id_with_name_rejects(#[case] input: &str) {
        assert!(serde_json::from_str::<RecordIdWithName>(input).is_err());
    }

    #[test]
    fn test_record_ref() {
        let rec = RecordRef::new("res.partner", 3);
        assert_eq!(rec.model_name.as_str(), "res.partner");
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json, serde_json::json!({"model_name": "res.partner", "id": 3}));
    }

    #[test]
    fn test_selection() {
        let selection: Selection = [("draft", "Draft"), ("done", "Done")].into_iter().collect();
        assert_eq!(selection.label("done"), Some("Done"));
        assert_eq!(selection.label("cancel"), None);
        assert_eq!(selection.keys().collect::<Vec<_>>(), vec!["done", "draft"]);
        assert_eq!(
            serde_json::to_string(&selection).unwrap(),
            r#"{"done":"Done","draft":"Draft"}"#
        );
    }

    #[test]
    fn test_names_are_transparent() {
        let field = FieldName::from("birthday");
        assert_eq!(field.to_string(), "birthday");
        assert_eq!(serde_json::to_string(&field).unwrap(), r#""birthday""#);
        let model: ModelName = serde_json::from_str(r#""res.partner""#).unwrap();
        assert_eq!(model, ModelName::new("res.partner"));
    }
}
