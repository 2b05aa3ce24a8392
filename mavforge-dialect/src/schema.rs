/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Schema definitions for MAVLink dialects.
//!
//! This module defines the structures produced by the dialect parser:
//! - [`Field`]: One typed member of a message, optionally a fixed-size array
//! - [`Message`]: One protocol message with its ordered fields
//! - [`Dialect`]: One parsed dialect document with its ordered messages
//!
//! The model is read-only once validated. Derived values used by templates
//! (mapped types, array casts, the owning dialect name) live in the codegen
//! views, never on these structures.

use mavforge_core::error::SchemaError;
use mavforge_core::ident::{is_identifier, is_lower_identifier};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Schema type of the protocol-version marker field.
///
/// The field is encoded as an unsigned byte but carries a constant value, so
/// it is not passed as an argument to pack functions.
pub const VERSION_MARKER_TYPE: &str = "uint8_t_mavlink_version";

/// Definition of a message field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Schema-level scalar type name (e.g. `uint8_t`).
    #[serde(rename = "type")]
    pub type_name: String,
    /// Array length; 0 for scalars.
    #[serde(default)]
    pub array_length: u32,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Free-text units.
    #[serde(default)]
    pub units: String,
}

impl Field {
    /// Creates a new scalar field.
    ///
    /// # Arguments
    /// * `name` - The field name
    /// * `type_name` - The schema type name
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            array_length: 0,
            description: String::new(),
            units: String::new(),
        }
    }

    /// Makes this field a fixed-size array.
    #[must_use]
    pub const fn with_array_length(mut self, length: u32) -> Self {
        self.array_length = length;
        self
    }

    /// Adds a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds units.
    #[must_use]
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Returns true if this field is a fixed-size array.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        self.array_length != 0
    }

    /// Returns true if this field is left out of pack function arguments.
    #[must_use]
    pub fn omits_argument(&self) -> bool {
        self.type_name == VERSION_MARKER_TYPE
    }
}

/// Definition of a protocol message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message id.
    #[serde(default)]
    pub id: u32,
    /// Canonical message name.
    pub name: String,
    /// Lowercased name used for file and symbol naming.
    ///
    /// Filled from `name` by [`Dialect::validate`] when left empty.
    #[serde(default)]
    pub name_lower: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Message {
    /// Creates a new message with no fields.
    ///
    /// # Arguments
    /// * `id` - The message id
    /// * `name` - The message name
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            name_lower: name.to_lowercase(),
            name,
            description: String::new(),
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    fn validate(&self) -> Result<(), SchemaError> {
        if !is_identifier(&self.name) {
            return Err(SchemaError::InvalidIdentifier {
                kind: "message",
                value: self.name.clone(),
            });
        }
        let expected = self.name.to_lowercase();
        if self.name_lower != expected || !is_lower_identifier(&self.name_lower) {
            return Err(SchemaError::NameLowerMismatch {
                name: self.name.clone(),
                name_lower: self.name_lower.clone(),
                expected,
            });
        }

        let mut seen = HashSet::with_capacity(self.fields.len());
        for field in &self.fields {
            if !is_identifier(&field.name) {
                return Err(SchemaError::InvalidIdentifier {
                    kind: "field",
                    value: field.name.clone(),
                });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    message: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// A parsed dialect document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialect {
    /// Identifier derived from the source file name.
    #[serde(default)]
    pub basename: String,
    /// Messages in declaration order.
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Dialect {
    /// Creates a new empty dialect.
    ///
    /// # Arguments
    /// * `basename` - The dialect basename
    #[must_use]
    pub fn new(basename: impl Into<String>) -> Self {
        Self {
            basename: basename.into(),
            messages: Vec::new(),
        }
    }

    /// Appends a message, builder style.
    #[must_use]
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Gets a message definition by name.
    #[must_use]
    pub fn get_message(&self, name: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.name == name)
    }

    /// Fills derived names and checks every identifier that ends up in an
    /// output path or generated symbol.
    ///
    /// # Errors
    /// Returns a [`SchemaError`] for unsafe identifiers, a `name_lower` that
    /// does not match its `name`, or duplicate message/field names.
    pub fn validate(&mut self) -> Result<(), SchemaError> {
        for message in &mut self.messages {
            if message.name_lower.is_empty() {
                message.name_lower = message.name.to_lowercase();
            }
        }
        self.check()
    }

    /// Checks the dialect without filling anything in.
    ///
    /// # Errors
    /// See [`Dialect::validate`].
    pub fn check(&self) -> Result<(), SchemaError> {
        if !is_identifier(&self.basename) {
            return Err(SchemaError::InvalidIdentifier {
                kind: "dialect",
                value: self.basename.clone(),
            });
        }

        let mut seen = HashSet::with_capacity(self.messages.len());
        for message in &self.messages {
            message.validate()?;
            if !seen.insert(message.name_lower.as_str()) {
                return Err(SchemaError::DuplicateMessage {
                    dialect: self.basename.clone(),
                    name_lower: message.name_lower.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heartbeat() -> Message {
        Message::new(0, "HEARTBEAT")
            .with_field(Field::new("type", "uint8_t"))
            .with_field(Field::new("custom_mode", "uint32_t"))
            .with_field(Field::new("mavlink_version", VERSION_MARKER_TYPE))
    }

    #[test]
    fn test_message_new_lowercases_name() {
        let msg = Message::new(0, "Heartbeat");
        assert_eq!(msg.name_lower, "heartbeat");
    }

    #[test]
    fn test_field_flags() {
        let field = Field::new("name", "char").with_array_length(16);
        assert!(field.is_array());
        assert!(!field.omits_argument());
        assert!(Field::new("v", VERSION_MARKER_TYPE).omits_argument());
    }

    #[test]
    fn test_dialect_validate_ok() {
        let mut dialect = Dialect::new("common").with_message(heartbeat());
        assert!(dialect.validate().is_ok());
        assert!(dialect.get_message("HEARTBEAT").is_some());
        assert!(dialect.get_message("PING").is_none());
    }

    #[test]
    fn test_validate_fills_name_lower() {
        let json = r#"{
            "basename": "common",
            "messages": [
                {"id": 0, "name": "HEARTBEAT", "fields": [
                    {"name": "type", "type": "uint8_t"},
                    {"name": "data", "type": "int8_t", "array_length": 3}
                ]}
            ]
        }"#;
        let mut dialect: Dialect = serde_json::from_str(json).unwrap();
        dialect.validate().unwrap();
        let msg = &dialect.messages[0];
        assert_eq!(msg.name_lower, "heartbeat");
        assert_eq!(msg.fields[1].type_name, "int8_t");
        assert_eq!(msg.fields[1].array_length, 3);
        assert_eq!(msg.fields[0].array_length, 0);
    }

    #[test]
    fn test_rejects_unsafe_basename() {
        let mut dialect = Dialect::new("../common");
        assert!(matches!(
            dialect.validate(),
            Err(SchemaError::InvalidIdentifier { kind: "dialect", .. })
        ));
    }

    #[test]
    fn test_rejects_name_lower_mismatch() {
        let mut msg = heartbeat();
        msg.name_lower = "ping".to_string();
        let mut dialect = Dialect::new("common").with_message(msg);
        assert!(matches!(
            dialect.validate(),
            Err(SchemaError::NameLowerMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_messages() {
        let mut dialect = Dialect::new("common")
            .with_message(Message::new(0, "HEARTBEAT"))
            .with_message(Message::new(1, "Heartbeat"));
        assert_eq!(
            dialect.validate(),
            Err(SchemaError::DuplicateMessage {
                dialect: "common".to_string(),
                name_lower: "heartbeat".to_string(),
            })
        );
    }

    #[test]
    fn test_rejects_duplicate_and_invalid_fields() {
        let msg = Message::new(0, "PING")
            .with_field(Field::new("seq", "uint32_t"))
            .with_field(Field::new("seq", "uint32_t"));
        let mut dialect = Dialect::new("common").with_message(msg);
        assert!(matches!(
            dialect.validate(),
            Err(SchemaError::DuplicateField { .. })
        ));

        let msg = Message::new(0, "PING").with_field(Field::new("a-b", "uint32_t"));
        let mut dialect = Dialect::new("common").with_message(msg);
        assert!(matches!(
            dialect.validate(),
            Err(SchemaError::InvalidIdentifier { kind: "field", .. })
        ));
    }
}
