//! Output formatting for paramdup
//!
//! Supports text (colored terminal), unified diff and JSON output formats.

use colored::*;
use serde::Serialize;
use std::path::Path;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Diff,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<OutputFormat> {
        match s.to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "diff" => Some(OutputFormat::Diff),
            _ => None,
        }
    }
}

/// Information about a single parameter duplication
#[derive(Debug, Clone, Serialize)]
pub struct DuplicationInfo {
    /// "method" or "function"
    pub kind: String,
    pub declaration: String,
    pub old_name: String,
    pub new_name: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl DuplicationInfo {
    /// One-line description for text output, e.g. `method foo(): $a -> $b`
    pub fn describe(&self) -> String {
        format!(
            "{} {}(): ${} -> ${}",
            self.kind, self.declaration, self.old_name, self.new_name
        )
    }
}

/// Result of processing a single file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub duplications: Vec<DuplicationInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    pub fn success(path: &Path, duplications: Vec<DuplicationInfo>) -> Self {
        Self {
            path: path.display().to_string(),
            duplications,
            error: None,
        }
    }

    pub fn error(path: &Path, error: String) -> Self {
        Self {
            path: path.display().to_string(),
            duplications: Vec::new(),
            error: Some(error),
        }
    }
}

/// Summary statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub files_processed: usize,
    pub files_with_changes: usize,
    pub total_duplications: usize,
    pub errors: usize,
}

/// Full JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    pub version: String,
    pub summary: Summary,
    pub files: Vec<FileReport>,
}

/// Reporter for accumulating and outputting results
pub struct Reporter {
    format: OutputFormat,
    verbose: bool,
    results: Vec<FileReport>,
    summary: Summary,
}

impl Reporter {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self {
            format,
            verbose,
            results: Vec::new(),
            summary: Summary::default(),
        }
    }

    /// Report a file with changes (in check mode - showing what would change)
    pub fn report_check(
        &mut self,
        path: &Path,
        duplications: Vec<DuplicationInfo>,
        old_source: &str,
        new_source: &str,
    ) {
        self.summary.files_processed += 1;
        self.summary.files_with_changes += 1;
        self.summary.total_duplications += duplications.len();

        match self.format {
            OutputFormat::Text => {
                println!("{}", path.display().to_string().bold());
                print_diff(old_source, new_source);
                println!();
                for duplication in &duplications {
                    println!(
                        "  {}:{} {}",
                        duplication.line,
                        duplication.column,
                        duplication.describe()
                    );
                }
                println!();
            }
            OutputFormat::Diff => {
                print_unified_diff(path, old_source, new_source);
            }
            OutputFormat::Json => {
                // JSON output is handled in finish()
            }
        }

        self.results.push(FileReport::success(path, duplications));
    }

    /// Report a file after applying fixes
    pub fn report_fix(&mut self, path: &Path, duplications: Vec<DuplicationInfo>) {
        self.summary.files_processed += 1;
        self.summary.files_with_changes += 1;
        self.summary.total_duplications += duplications.len();

        if self.format == OutputFormat::Text {
            println!("{}", path.display().to_string().bold());
            for duplication in &duplications {
                println!("  {} {}", "+".green(), duplication.describe());
            }
        }

        self.results.push(FileReport::success(path, duplications));
    }

    /// Report a file that needed no changes
    pub fn report_skipped(&mut self, path: &Path) {
        self.summary.files_processed += 1;
        if self.verbose && self.format == OutputFormat::Text {
            println!("{}: No changes needed", path.display());
        }
        self.results.push(FileReport::success(path, vec![]));
    }

    /// Report an error processing a file
    pub fn report_error(&mut self, path: &Path, error: &str) {
        self.summary.files_processed += 1;
        self.summary.errors += 1;

        if self.format != OutputFormat::Json {
            eprintln!(
                "{}: {} - {}",
                "Warning".yellow(),
                path.display(),
                error
            );
        }

        self.results.push(FileReport::error(path, error.to_string()));
    }

    /// Report a path that does not exist
    pub fn report_missing(&mut self, path: &Path) {
        self.report_error(path, "File not found.");
    }

    /// Print final summary/output
    pub fn finish(self, check_mode: bool) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Text => {
                println!();
                println!("{}", "Summary".bold().underline());
                println!("  Files processed: {}", self.summary.files_processed);
                println!("  Files with changes: {}", self.summary.files_with_changes);
                println!("  Parameters duplicated: {}", self.summary.total_duplications);
                if self.summary.errors > 0 {
                    println!("  Errors: {}", self.summary.errors);
                }

                if check_mode && self.summary.total_duplications > 0 {
                    println!();
                    println!("{}", "Run without --check to apply changes".yellow());
                }
            }
            OutputFormat::Json => {
                let output = JsonOutput {
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    summary: self.summary,
                    files: self.results,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Diff => {
                // Patch-compatible output carries no summary
            }
        }
        Ok(())
    }

    /// Get summary for exit code determination
    pub fn summary(&self) -> &Summary {
        &self.summary
    }
}

/// Print a colored diff between old and new content
fn print_diff(old: &str, new: &str) {
    for diff_result in diff::lines(old, new) {
        match diff_result {
            diff::Result::Left(l) => {
                println!("  {}", format!("- {}", l).red());
            }
            diff::Result::Right(r) => {
                println!("  {}", format!("+ {}", r).green());
            }
            diff::Result::Both(_, _) => {}
        }
    }
}

/// Print unified diff format (standard diff -u compatible)
fn print_unified_diff(path: &Path, old: &str, new: &str) {
    print!("{}", unified_diff(path, old, new));
}

fn unified_diff(path: &Path, old: &str, new: &str) -> String {
    use similar::{ChangeTag, TextDiff};
    use std::fmt::Write;

    let diff = TextDiff::from_lines(old, new);
    let path_str = path.display().to_string();
    let mut out = String::new();

    let _ = writeln!(out, "--- a/{}", path_str);
    let _ = writeln!(out, "+++ b/{}", path_str);

    for hunk in diff.unified_diff().context_radius(3).iter_hunks() {
        let _ = writeln!(out, "{}", hunk.header());
        for change in hunk.iter_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => "-",
                ChangeTag::Insert => "+",
                ChangeTag::Equal => " ",
            };
            let _ = write!(out, "{}{}", sign, change);
            if change.missing_newline() {
                out.push('\n');
            }
        }
    }

    out
}
