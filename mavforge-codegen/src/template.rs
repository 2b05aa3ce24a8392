/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Minimal text templates.
//!
//! Two constructs are supported and nothing else:
//! - `${attr}` is replaced by the scalar attribute `attr` of the context.
//! - `${{list:body}}` renders `body` once per element of the list attribute
//!   `list`, resolving the placeholders of `body` against each element.
//!
//! The block body ends at the first `}}` that is not the tail of a `${...}`
//! placeholder. List blocks cannot be nested. A `$` not followed by `{` is
//! plain text.

use mavforge_core::error::TemplateError;
use std::borrow::Cow;

/// Value of a context attribute.
pub enum Value<'a> {
    /// Scalar text.
    Text(Cow<'a, str>),
    /// Ordered child contexts for list blocks.
    List(Vec<&'a dyn Context>),
}

impl<'a> Value<'a> {
    /// Creates a scalar from anything displayable.
    #[must_use]
    pub fn display(value: impl std::fmt::Display) -> Self {
        Self::Text(Cow::Owned(value.to_string()))
    }

    /// Creates a borrowed scalar.
    #[must_use]
    pub fn text(value: &'a str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }
}

/// Attribute source a template is rendered against.
pub trait Context {
    /// Short name of the context kind, used in error messages.
    fn kind(&self) -> &'static str;

    /// Resolves an attribute by name.
    fn lookup(&self, name: &str) -> Option<Value<'_>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Scalar { name: String },
    List { name: String, body: Vec<Segment> },
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parses template text.
    ///
    /// # Arguments
    /// * `name` - Name reported in errors (usually the artifact kind)
    /// * `text` - The template source
    ///
    /// # Errors
    /// Returns [`TemplateError::Syntax`] for unbalanced delimiters or invalid
    /// attribute names, and [`TemplateError::NestedListBlock`] for a list block
    /// inside another.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, TemplateError> {
        let name = name.into();
        let mut parser = Parser {
            template: &name,
            src: text,
            pos: 0,
        };
        let (segments, _) = parser.parse_sequence(false)?;
        Ok(Self { name, segments })
    }

    /// Renders the template against a context.
    ///
    /// # Errors
    /// Returns a [`TemplateError`] when a placeholder cannot be resolved or
    /// has the wrong shape (scalar vs. list).
    pub fn render(&self, ctx: &dyn Context) -> Result<String, TemplateError> {
        let mut out = String::new();
        self.render_segments(&self.segments, ctx, &mut out)?;
        Ok(out)
    }

    fn render_segments(
        &self,
        segments: &[Segment],
        ctx: &dyn Context,
        out: &mut String,
    ) -> Result<(), TemplateError> {
        for segment in segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Scalar { name } => match ctx.lookup(name) {
                    Some(Value::Text(text)) => out.push_str(&text),
                    Some(Value::List(_)) => {
                        return Err(TemplateError::NotAScalar {
                            template: self.name.clone(),
                            placeholder: name.clone(),
                            context: ctx.kind(),
                        });
                    }
                    None => return Err(self.unresolved(name, ctx)),
                },
                Segment::List { name, body } => match ctx.lookup(name) {
                    Some(Value::List(items)) => {
                        for item in items {
                            self.render_segments(body, item, out)?;
                        }
                    }
                    Some(Value::Text(_)) => {
                        return Err(TemplateError::NotAList {
                            template: self.name.clone(),
                            placeholder: name.clone(),
                            context: ctx.kind(),
                        });
                    }
                    None => return Err(self.unresolved(name, ctx)),
                },
            }
        }
        Ok(())
    }

    fn unresolved(&self, name: &str, ctx: &dyn Context) -> TemplateError {
        TemplateError::Unresolved {
            template: self.name.clone(),
            placeholder: name.to_string(),
            context: ctx.kind(),
        }
    }
}

/// Parses and renders a template in one step.
///
/// # Errors
/// See [`Template::parse`] and [`Template::render`].
pub fn render(template_text: &str, ctx: &dyn Context) -> Result<String, TemplateError> {
    Template::parse("<inline>", template_text)?.render(ctx)
}

struct Parser<'a> {
    template: &'a str,
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    /// Parses until end of input or, inside a list block, until `}}`.
    /// The flag reports whether the closing `}}` was found.
    fn parse_sequence(&mut self, in_list: bool) -> Result<(Vec<Segment>, bool), TemplateError> {
        let src = self.src;
        let bytes = src.as_bytes();
        let mut segments = Vec::new();
        let mut text_start = self.pos;

        while self.pos < bytes.len() {
            let rest = &bytes[self.pos..];
            if in_list && rest.starts_with(b"}}") {
                self.flush(&mut segments, text_start);
                self.pos += 2;
                return Ok((segments, true));
            }
            if rest.starts_with(b"${{") {
                self.flush(&mut segments, text_start);
                if in_list {
                    return Err(TemplateError::NestedListBlock {
                        template: self.template.to_string(),
                        offset: self.pos,
                        placeholder: self.snippet(self.pos),
                    });
                }
                segments.push(self.parse_list()?);
                text_start = self.pos;
                continue;
            }
            if rest.starts_with(b"${") {
                self.flush(&mut segments, text_start);
                segments.push(self.parse_scalar()?);
                text_start = self.pos;
                continue;
            }
            self.pos += 1;
        }

        self.flush(&mut segments, text_start);
        Ok((segments, false))
    }

    fn parse_scalar(&mut self) -> Result<Segment, TemplateError> {
        let src = self.src;
        let start = self.pos;
        let Some(close) = src[start + 2..].find('}') else {
            return Err(self.syntax(start, self.snippet(start), "missing closing '}'"));
        };
        let end = start + 2 + close;
        let raw = &src[start..=end];
        let name = src[start + 2..end].trim();
        if !is_attribute_name(name) {
            return Err(self.syntax(start, raw.to_string(), "invalid attribute name"));
        }
        self.pos = end + 1;
        Ok(Segment::Scalar {
            name: name.to_string(),
        })
    }

    fn parse_list(&mut self) -> Result<Segment, TemplateError> {
        let src = self.src;
        let start = self.pos;
        let header_start = start + 3;
        let Some(colon) = src[header_start..].find(':') else {
            return Err(self.syntax(start, self.snippet(start), "list block missing ':'"));
        };
        let name_end = header_start + colon;
        let name = src[header_start..name_end].trim();
        if !is_attribute_name(name) {
            return Err(self.syntax(
                start,
                src[start..=name_end].to_string(),
                "invalid list attribute name",
            ));
        }

        self.pos = name_end + 1;
        let (body, closed) = self.parse_sequence(true)?;
        if !closed {
            return Err(self.syntax(start, self.snippet(start), "unterminated list block"));
        }
        Ok(Segment::List {
            name: name.to_string(),
            body,
        })
    }

    fn flush(&self, segments: &mut Vec<Segment>, text_start: usize) {
        if text_start < self.pos {
            segments.push(Segment::Text(self.src[text_start..self.pos].to_string()));
        }
    }

    /// Placeholder text for error messages: up to the end of the line.
    fn snippet(&self, start: usize) -> String {
        let rest = &self.src[start..];
        rest.lines().next().unwrap_or(rest).to_string()
    }

    fn syntax(&self, offset: usize, placeholder: String, reason: &'static str) -> TemplateError {
        TemplateError::Syntax {
            template: self.template.to_string(),
            offset,
            placeholder,
            reason,
        }
    }
}

fn is_attribute_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
