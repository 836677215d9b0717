//! File processing logic for paramdup

use anyhow::{Context, Result};
use bumpalo::Bump;
use mago_database::file::FileId;
use std::path::Path;

use paramdup_core::{apply_edits, Edit};
use paramdup_rules::{NameConfirmer, SingleParamDuplicator};

use crate::output::DuplicationInfo;

/// Result of processing a single file
#[derive(Debug)]
pub struct ProcessResult {
    /// Duplications that were found/applied
    pub duplications: Vec<DuplicationInfo>,
    /// Original source code
    pub old_source: String,
    /// New source code after edits (only if duplications were found)
    pub new_source: Option<String>,
}

/// Process a single PHP file and return the duplications found
///
/// Returns `Ok(None)` when the file does not parse.
pub fn process_file<C: NameConfirmer>(
    path: &Path,
    duplicator: &mut SingleParamDuplicator<C>,
) -> Result<Option<ProcessResult>> {
    let source_code = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    tracing::debug!(path = %path.display(), bytes = source_code.len(), "processing file");

    process_source(&path.to_string_lossy(), source_code, duplicator)
        .with_context(|| format!("Failed to apply edits to {}", path.display()))
}

/// Process PHP source text; `name` identifies it to the parser
pub fn process_source<C: NameConfirmer>(
    name: &str,
    source_code: String,
    duplicator: &mut SingleParamDuplicator<C>,
) -> Result<Option<ProcessResult>> {
    // Create arena allocator and file ID for mago
    let arena = Bump::new();
    let file_id = FileId::new(name);

    let (program, parse_error) =
        mago_syntax::parser::parse_file_content(&arena, file_id, &source_code);

    // A file with syntax errors is never edited
    if let Some(error) = parse_error {
        tracing::warn!(file = name, error = ?error, "parse failed, leaving file untouched");
        return Ok(None);
    }

    let duplications = duplicator.check(program, &source_code);

    if duplications.is_empty() {
        return Ok(Some(ProcessResult {
            duplications: vec![],
            old_source: source_code,
            new_source: None,
        }));
    }

    let infos: Vec<DuplicationInfo> = duplications
        .iter()
        .map(|duplication| {
            let (line, column) =
                offset_to_line_column(&source_code, duplication.edit.start_offset());
            DuplicationInfo {
                kind: duplication.kind.as_str().to_string(),
                declaration: duplication.declaration.clone(),
                old_name: duplication.old_name.clone(),
                new_name: duplication.new_name.clone(),
                line,
                column,
                message: duplication.edit.message.clone(),
            }
        })
        .collect();

    let edits: Vec<Edit> = duplications.into_iter().map(|d| d.edit).collect();
    let new_source = apply_edits(&source_code, &edits)?;

    Ok(Some(ProcessResult {
        duplications: infos,
        old_source: source_code,
        new_source: Some(new_source),
    }))
}

/// Write the processed result to the file
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Convert byte offset to line and column numbers (1-based)
fn offset_to_line_column(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;

    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }

    (line, column)
}
