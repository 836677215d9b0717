//! paramdup-core: Core abstractions for PHP parameter rewriting
//!
//! This crate provides:
//! - `Edit`: A span-based code modification
//! - `apply_edits()`: Function to apply edits preserving formatting
//! - `DeclarationVisitor`: Trait for finding function-like declarations in a PHP AST

mod edit;
pub mod visitor;

pub use edit::{apply_edits, span_text, Edit, EditError};
pub use visitor::{visit, DeclarationKind, DeclarationVisitor};
