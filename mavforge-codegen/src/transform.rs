/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Field transform pass.
//!
//! Builds read-only views over a [`Dialect`] that carry both the schema type
//! and the mapped target type of every field, plus the derived attributes the
//! templates consume. The schema itself is never modified.

use crate::template::{Context, Value};
use crate::typemap::TypeMap;
use mavforge_core::error::SchemaError;
use mavforge_dialect::{Dialect, Field, Message};

/// A field with its mapped type and derived attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView<'a> {
    field: &'a Field,
    mapped_type: &'a str,
    array_cast: String,
    array_suffix: String,
}

impl<'a> FieldView<'a> {
    fn new(
        dialect: &Dialect,
        message: &Message,
        field: &'a Field,
        types: &'a TypeMap,
    ) -> Result<Self, SchemaError> {
        let Some(mapped_type) = types.lookup(&field.type_name) else {
            return Err(SchemaError::UnknownType {
                dialect: dialect.basename.clone(),
                message: message.name.clone(),
                field: field.name.clone(),
                type_name: field.type_name.clone(),
            });
        };

        let (array_cast, array_suffix) = if field.is_array() {
            let cast = if field.type_name == mapped_type {
                String::new()
            } else {
                format!("({}*)", field.type_name)
            };
            (cast, format!("[{}]", field.array_length))
        } else {
            (String::new(), String::new())
        };

        Ok(Self {
            field,
            mapped_type,
            array_cast,
            array_suffix,
        })
    }

    /// Returns the schema type name.
    #[must_use]
    pub fn original_type(&self) -> &'a str {
        &self.field.type_name
    }

    /// Returns the mapped target type name.
    #[must_use]
    pub const fn mapped_type(&self) -> &'a str {
        self.mapped_type
    }

    /// Returns the pointer cast for arrays whose element type was renamed,
    /// or an empty string.
    #[must_use]
    pub fn array_cast(&self) -> &str {
        &self.array_cast
    }
}

impl Context for FieldView<'_> {
    fn kind(&self) -> &'static str {
        "field"
    }

    fn lookup(&self, name: &str) -> Option<Value<'_>> {
        Some(match name {
            "name" => Value::text(&self.field.name),
            "type" | "mapped_type" => Value::text(self.mapped_type),
            "original_type" => Value::text(&self.field.type_name),
            "array_length" => Value::display(self.field.array_length),
            "array_suffix" => Value::text(&self.array_suffix),
            "array_cast" => Value::text(&self.array_cast),
            "description" => Value::text(&self.field.description),
            "units" => Value::text(&self.field.units),
            _ => return None,
        })
    }
}

/// A message with transformed fields and its owning dialect name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView<'a> {
    message: &'a Message,
    dialect_name: &'a str,
    fields: Vec<FieldView<'a>>,
}

impl<'a> MessageView<'a> {
    /// Returns the basename of the owning dialect.
    #[must_use]
    pub const fn dialect_name(&self) -> &'a str {
        self.dialect_name
    }

    /// Returns the transformed fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldView<'a>] {
        &self.fields
    }

    /// Returns the fields passed as pack function arguments.
    pub fn arg_fields(&self) -> impl Iterator<Item = &FieldView<'a>> {
        self.fields.iter().filter(|f| !f.field.omits_argument())
    }
}

impl Context for MessageView<'_> {
    fn kind(&self) -> &'static str {
        "message"
    }

    fn lookup(&self, name: &str) -> Option<Value<'_>> {
        Some(match name {
            "name" => Value::text(&self.message.name),
            "name_lower" => Value::text(&self.message.name_lower),
            "id" => Value::display(self.message.id),
            "description" => Value::text(&self.message.description),
            "dialect_name" => Value::text(self.dialect_name),
            "field_count" => Value::display(self.fields.len()),
            "fields" => Value::List(self.fields.iter().map(|f| f as &dyn Context).collect()),
            "arg_fields" => Value::List(self.arg_fields().map(|f| f as &dyn Context).collect()),
            _ => return None,
        })
    }
}

/// A dialect with transformed messages and its position in the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectView<'a> {
    dialect: &'a Dialect,
    index: usize,
    messages: Vec<MessageView<'a>>,
}

impl<'a> DialectView<'a> {
    /// Returns the dialect basename.
    #[must_use]
    pub fn basename(&self) -> &'a str {
        &self.dialect.basename
    }

    /// Returns the position of the dialect in the generation run.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the transformed messages in declaration order.
    #[must_use]
    pub fn messages(&self) -> &[MessageView<'a>] {
        &self.messages
    }
}

impl Context for DialectView<'_> {
    fn kind(&self) -> &'static str {
        "dialect"
    }

    fn lookup(&self, name: &str) -> Option<Value<'_>> {
        Some(match name {
            "basename" => Value::text(&self.dialect.basename),
            "index" => Value::display(self.index),
            "message_count" => Value::display(self.messages.len()),
            "messages" => Value::List(self.messages.iter().map(|m| m as &dyn Context).collect()),
            _ => return None,
        })
    }
}

/// Runs the transform pass over one dialect.
///
/// Every field type is looked up in `types`; the array cast is derived from
/// the schema type, which the view keeps alongside the mapped one.
///
/// # Arguments
/// * `dialect` - The dialect to transform
/// * `index` - Position of the dialect in the generation run
/// * `types` - The type mapping table
///
/// # Errors
/// Returns [`SchemaError::UnknownType`] for the first field whose type is not
/// in the table.
pub fn transform<'a>(
    dialect: &'a Dialect,
    index: usize,
    types: &'a TypeMap,
) -> Result<DialectView<'a>, SchemaError> {
    let messages = dialect
        .messages
        .iter()
        .map(|message| {
            let fields = message
                .fields
                .iter()
                .map(|field| FieldView::new(dialect, message, field, types))
                .collect::<Result<Vec<_>, _>>()?;
            Ok::<_, SchemaError>(MessageView {
                message,
                dialect_name: &dialect.basename,
                fields,
            })
        })
        .collect::<Result<Vec<_>, SchemaError>>()?;

    Ok(DialectView {
        dialect,
        index,
        messages,
    })
}
