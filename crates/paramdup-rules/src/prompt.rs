//! Interactive name confirmation over a line-based reader/writer pair

use std::io::{BufRead, Write};

use crate::confirm::NameConfirmer;
use crate::identifier::{is_valid_identifier, normalize_identifier};

/// Asks the user for each duplicate's name
///
/// An empty line or end of input accepts the suggestion. Invalid names, and
/// the name of the parameter being duplicated, are re-prompted until a valid
/// name or an empty line arrives.
pub struct PromptConfirmer<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirmer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the reader and writer
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Read one line; `None` on end of input or a read failure
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read name from input, keeping suggestion");
                None
            }
        }
    }

    fn write_prompt(&mut self, text: &str) {
        if let Err(err) = write!(self.output, "{}", text).and_then(|_| self.output.flush()) {
            tracing::warn!(error = %err, "failed to write prompt");
        }
    }
}

impl<R: BufRead, W: Write> NameConfirmer for PromptConfirmer<R, W> {
    fn confirm(&mut self, old_name: &str, declaration: &str, suggested: &str) -> String {
        self.write_prompt(&format!(
            "\nDuplicating parameter ${} in {}(). Suggested name: ${}.\n\
             Enter to accept, or type new name: ",
            old_name, declaration, suggested
        ));

        loop {
            let Some(line) = self.read_line() else {
                return suggested.to_string();
            };

            let name = normalize_identifier(&line);
            if name.is_empty() {
                return suggested.to_string();
            }
            // Reusing the original name would redefine the parameter
            if is_valid_identifier(name) && name != old_name {
                return name.to_string();
            }

            self.write_prompt("Invalid name. Try again: ");
        }
    }
}
