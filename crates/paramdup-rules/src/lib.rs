//! paramdup-rules: the single-parameter duplication rule
//!
//! - `suggest_name`: heuristic for the duplicate's name
//! - `is_valid_identifier`: PHP variable-name validation
//! - `NameConfirmer`: injected strategy that settles the final name
//! - `SingleParamDuplicator`: rewrites declarations with exactly one parameter

pub mod confirm;
pub mod declaration;
pub mod duplicate;
pub mod identifier;
pub mod naming;
pub mod prompt;

pub use confirm::{from_fn, AcceptSuggestion, FnConfirmer, NameConfirmer};
pub use declaration::{Declaration, Parameter};
pub use duplicate::{collect_declarations, Duplication, SingleParamDuplicator};
pub use identifier::{is_valid_identifier, normalize_identifier};
pub use naming::suggest_name;
pub use prompt::PromptConfirmer;
