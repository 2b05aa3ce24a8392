/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Identifier validation.
//!
//! Schema identifiers end up in file names and generated symbols, so they are
//! restricted to ASCII letters, digits and underscores.

/// Returns true if `s` is a non-empty identifier that does not start with a digit.
#[must_use]
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Returns true if `s` is an identifier without uppercase letters.
#[must_use]
pub fn is_lower_identifier(s: &str) -> bool {
    is_identifier(s) && !s.chars().any(|c| c.is_ascii_uppercase())
}
