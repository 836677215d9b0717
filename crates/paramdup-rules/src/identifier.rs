//! PHP variable-name validation
//!
//! PHP's grammar for a variable name (after the `$`) is
//! `[a-zA-Z_\x80-\xff][a-zA-Z0-9_\x80-\xff]*` over bytes, which for UTF-8
//! text means any non-ASCII character is allowed anywhere.

/// Whether `name` (without `$`) can be used as a parameter name
///
/// `$this` is rejected: PHP refuses it as a parameter.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    if !(first == '_' || first.is_ascii_alphabetic() || !first.is_ascii()) {
        return false;
    }
    if !chars.all(|c| c == '_' || c.is_ascii_alphanumeric() || !c.is_ascii()) {
        return false;
    }

    name != "this"
}

/// Strip surrounding whitespace and an optional leading `$` from user input
pub fn normalize_identifier(input: &str) -> &str {
    let trimmed = input.trim();
    trimmed.strip_prefix('$').unwrap_or(trimmed)
}
