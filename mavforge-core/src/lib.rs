/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # mavforge Core
//!
//! Error definitions and shared helpers for the mavforge code generator.
//!
//! This crate provides the building blocks used across all mavforge crates:
//! - **Error types**: Unified error handling with `thiserror`
//! - **Identifiers**: Validation of schema identifiers used in paths and symbols

pub mod error;
pub mod ident;

pub use error::{GenError, Result, SchemaError, TemplateError};
pub use ident::{is_identifier, is_lower_identifier};
