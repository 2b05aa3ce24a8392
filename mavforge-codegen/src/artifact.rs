/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Artifact specifications.
//!
//! An artifact is one kind of generated file (e.g. a header or a source file).
//! Its file name is itself a template, rendered against the same context as
//! its contents.

use crate::template::{Context, Template};
use mavforge_core::error::{SchemaError, TemplateError};

/// Which schema element an artifact is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// One file per message.
    Message,
    /// One file per dialect.
    Dialect,
}

/// One kind of generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSpec {
    kind: String,
    scope: Scope,
    directory: String,
    file_name: Template,
    template: Template,
}

impl ArtifactSpec {
    /// Creates a new artifact specification.
    ///
    /// # Arguments
    /// * `kind` - Artifact kind, also used as the template name in errors
    /// * `scope` - Element the artifact is rendered for
    /// * `directory` - Directory below the module path; the dialect basename is
    ///   appended to it
    /// * `file_name` - File name template (e.g. `MavLinkMsg_${name_lower}.h`)
    /// * `template` - Content template
    ///
    /// # Errors
    /// Returns a [`TemplateError`] if either template fails to parse.
    pub fn new(
        kind: impl Into<String>,
        scope: Scope,
        directory: impl Into<String>,
        file_name: &str,
        template: &str,
    ) -> Result<Self, TemplateError> {
        let kind = kind.into();
        Ok(Self {
            file_name: Template::parse(format!("{kind} file name"), file_name)?,
            template: Template::parse(kind.clone(), template)?,
            kind,
            scope,
            directory: directory.into(),
        })
    }

    /// Returns the artifact kind.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the artifact scope.
    #[must_use]
    pub const fn scope(&self) -> Scope {
        self.scope
    }

    /// Returns the directory below the module path.
    #[must_use]
    pub fn directory(&self) -> &str {
        &self.directory
    }

    /// Returns a copy of this specification with another content template.
    ///
    /// # Errors
    /// Returns a [`TemplateError`] if the template fails to parse.
    pub fn with_template(mut self, template: &str) -> Result<Self, TemplateError> {
        self.template = Template::parse(self.kind.clone(), template)?;
        Ok(self)
    }

    /// Renders the file name and rejects anything that is not a plain file name.
    ///
    /// # Errors
    /// Returns a [`mavforge_core::GenError`] on template or naming failures.
    pub fn render_file_name(&self, ctx: &dyn Context) -> mavforge_core::Result<String> {
        let file_name = self.file_name.render(ctx)?;
        let plain = !file_name.is_empty()
            && file_name != "."
            && file_name != ".."
            && !file_name.contains(['/', '\\', '\0']);
        if !plain {
            return Err(SchemaError::InvalidOutputName {
                kind: self.kind.clone(),
                file_name,
            }
            .into());
        }
        Ok(file_name)
    }

    /// Renders the file contents.
    ///
    /// # Errors
    /// Returns a [`TemplateError`] if rendering fails.
    pub fn render_contents(&self, ctx: &dyn Context) -> Result<String, TemplateError> {
        self.template.render(ctx)
    }
}
