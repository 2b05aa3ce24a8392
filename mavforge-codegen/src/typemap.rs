/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Schema-to-target type mapping.
//!
//! Unreal reflection rejects the `_t` C integer names, so every schema scalar
//! type is translated to the engine's sized type names before rendering.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Standard mapping from MAVLink schema types to Unreal type names.
const UE4_TYPES: &[(&str, &str)] = &[
    ("float", "float"),
    ("double", "double"),
    ("char", "uint8"),
    ("int8_t", "int8"),
    ("uint8_t", "uint8"),
    ("uint8_t_mavlink_version", "uint8"),
    ("int16_t", "int16"),
    ("uint16_t", "uint16"),
    ("int32_t", "int32"),
    ("uint32_t", "uint32"),
    ("int64_t", "int64"),
    ("uint64_t", "uint64"),
];

/// Lookup table from schema type names to target type names.
///
/// Lookups are exact; a miss is reported by the transform pass as a fatal
/// schema error rather than defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeMap {
    entries: BTreeMap<String, String>,
}

impl TypeMap {
    /// Creates an empty table.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Creates the standard Unreal Engine table.
    #[must_use]
    pub fn ue4() -> Self {
        UE4_TYPES.iter().copied().collect()
    }

    /// Adds or replaces one mapping.
    #[must_use]
    pub fn with(mut self, schema_type: impl Into<String>, target_type: impl Into<String>) -> Self {
        self.entries.insert(schema_type.into(), target_type.into());
        self
    }

    /// Looks up the target type for a schema type name.
    #[must_use]
    pub fn lookup(&self, schema_type: &str) -> Option<&str> {
        self.entries.get(schema_type).map(String::as_str)
    }

    /// Returns true if the schema type has a mapping.
    #[must_use]
    pub fn contains(&self, schema_type: &str) -> bool {
        self.entries.contains_key(schema_type)
    }

    /// Returns the number of mappings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no mappings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over `(schema_type, target_type)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for TypeMap {
    fn default() -> Self {
        Self::ue4()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TypeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
