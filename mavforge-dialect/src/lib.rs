/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # mavforge Dialect
//!
//! In-memory model of parsed MAVLink dialects for the mavforge generator.
//!
//! This crate provides:
//! - **Schema definitions**: Dialect, message and field definitions
//! - **Ingestion validation**: Identifier and naming checks run before any
//!   output is produced

pub mod schema;

pub use schema::{Dialect, Field, Message, VERSION_MARKER_TYPE};
