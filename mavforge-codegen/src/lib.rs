/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # mavforge Codegen
//!
//! Source generation for MAVLink dialects.
//!
//! The pipeline runs in four steps:
//! - [`TypeMap`] translates schema scalar types to target type names
//! - [`transform`] builds read-only views carrying both original and mapped
//!   types plus derived attributes such as the array cast
//! - [`Template`] renders `${attr}` and `${{list:...}}` placeholders against a view
//! - [`CodeGenerator`] renders every artifact for every message and writes the
//!   results to deterministic paths

pub mod artifact;
pub mod generator;
pub mod template;
pub mod transform;
pub mod typemap;
pub mod ue4;

pub use artifact::{ArtifactSpec, Scope};
pub use generator::{CodeGenerator, GenerationReport, GeneratorConfig};
pub use template::{Context, Template, Value, render};
pub use transform::{DialectView, FieldView, MessageView, transform};
pub use typemap::TypeMap;
