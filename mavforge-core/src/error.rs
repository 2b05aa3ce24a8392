/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Error types for the mavforge code generator.
//!
//! This module provides a unified error hierarchy using `thiserror`. Every
//! error is fatal for the generation run: nothing is downgraded to a warning
//! and no partial output is produced.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`GenError`] as the error type.
pub type Result<T> = std::result::Result<T, GenError>;

/// Top-level error type for all mavforge operations.
#[derive(Debug, Error)]
pub enum GenError {
    /// Schema could not be ingested or transformed.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Template could not be parsed or rendered.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Directory creation or file write failed.
    #[error("io error on {}: {source}", .path.display())]
    Io {
        /// Path being created or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl GenError {
    /// Wraps an I/O error together with the path it occurred on.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors caused by the schema itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A field type has no entry in the type mapping table.
    #[error("unknown type '{type_name}' for field {dialect}.{message}.{field}")]
    UnknownType {
        /// Dialect basename.
        dialect: String,
        /// Message name.
        message: String,
        /// Field name.
        field: String,
        /// The unmapped schema type.
        type_name: String,
    },

    /// An identifier contains characters unsafe for file or symbol names.
    #[error("invalid {kind} identifier: '{value}'")]
    InvalidIdentifier {
        /// What the identifier names (dialect, message, field).
        kind: &'static str,
        /// The offending value.
        value: String,
    },

    /// `name_lower` does not equal the lowercased message name.
    #[error("message '{name}' has name_lower '{name_lower}', expected '{expected}'")]
    NameLowerMismatch {
        /// Message name.
        name: String,
        /// Declared lowercase name.
        name_lower: String,
        /// Lowercase name derived from `name`.
        expected: String,
    },

    /// Two messages of one dialect share a lowercase name.
    #[error("duplicate message '{name_lower}' in dialect '{dialect}'")]
    DuplicateMessage {
        /// Dialect basename.
        dialect: String,
        /// Colliding lowercase name.
        name_lower: String,
    },

    /// Two fields of one message share a name.
    #[error("duplicate field '{field}' in message '{message}'")]
    DuplicateField {
        /// Message name.
        message: String,
        /// Colliding field name.
        field: String,
    },

    /// A rendered artifact file name is not a plain file name.
    #[error("artifact '{kind}' rendered invalid file name '{file_name}'")]
    InvalidOutputName {
        /// Artifact kind.
        kind: String,
        /// Rendered file name.
        file_name: String,
    },

    /// Two artifacts resolved to the same output path.
    #[error("multiple artifacts target {}", .path.display())]
    DuplicateOutput {
        /// The contested output path.
        path: PathBuf,
    },
}

/// Errors raised while parsing or rendering a template.
///
/// Every variant carries the template name and the offending placeholder text
/// so failures can be attributed to one artifact.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// Malformed placeholder delimiters or name.
    #[error("{template}: malformed placeholder '{placeholder}' at byte {offset}: {reason}")]
    Syntax {
        /// Template name.
        template: String,
        /// Byte offset of the placeholder start.
        offset: usize,
        /// Placeholder text as written.
        placeholder: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// A list block was opened inside another list block.
    #[error("{template}: nested list block '{placeholder}' at byte {offset}")]
    NestedListBlock {
        /// Template name.
        template: String,
        /// Byte offset of the inner block.
        offset: usize,
        /// Placeholder text as written.
        placeholder: String,
    },

    /// The placeholder names an attribute absent from the context.
    #[error("{template}: unresolved placeholder '{placeholder}' on {context}")]
    Unresolved {
        /// Template name.
        template: String,
        /// Attribute name.
        placeholder: String,
        /// Kind of context the lookup ran against.
        context: &'static str,
    },

    /// A list block targets a scalar attribute.
    #[error("{template}: '{placeholder}' on {context} is not a list")]
    NotAList {
        /// Template name.
        template: String,
        /// Attribute name.
        placeholder: String,
        /// Kind of context the lookup ran against.
        context: &'static str,
    },

    /// A scalar placeholder targets a list attribute.
    #[error("{template}: '{placeholder}' on {context} is a list, not a scalar")]
    NotAScalar {
        /// Template name.
        template: String,
        /// Attribute name.
        placeholder: String,
        /// Kind of context the lookup ran against.
        context: &'static str,
    },
}

impl TemplateError {
    /// Returns the name of the template the error occurred in.
    #[must_use]
    pub fn template(&self) -> &str {
        match self {
            Self::Syntax { template, .. }
            | Self::NestedListBlock { template, .. }
            | Self::Unresolved { template, .. }
            | Self::NotAList { template, .. }
            | Self::NotAScalar { template, .. } => template,
        }
    }

    /// Returns the offending placeholder text.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        match self {
            Self::Syntax { placeholder, .. }
            | Self::NestedListBlock { placeholder, .. }
            | Self::Unresolved { placeholder, .. }
            | Self::NotAList { placeholder, .. }
            | Self::NotAScalar { placeholder, .. } => placeholder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_display() {
        let err = SchemaError::UnknownType {
            dialect: "common".to_string(),
            message: "HEARTBEAT".to_string(),
            field: "type".to_string(),
            type_name: "uint128_t".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown type 'uint128_t' for field common.HEARTBEAT.type"
        );
    }

    #[test]
    fn test_template_error_accessors() {
        let err = TemplateError::Unresolved {
            template: "header".to_string(),
            placeholder: "nonexistent_attr".to_string(),
            context: "message",
        };
        assert_eq!(err.template(), "header");
        assert_eq!(err.placeholder(), "nonexistent_attr");
        assert!(err.to_string().contains("nonexistent_attr"));
    }

    #[test]
    fn test_gen_error_from_schema() {
        let err: GenError = SchemaError::InvalidIdentifier {
            kind: "message",
            value: "a/b".to_string(),
        }
        .into();
        assert!(matches!(err, GenError::Schema(_)));
        assert!(err.to_string().starts_with("schema error"));
    }

    #[test]
    fn test_gen_error_io_keeps_path() {
        let err = GenError::io(
            "/out/a.h",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/out/a.h"));
    }
}
