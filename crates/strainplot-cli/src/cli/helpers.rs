use super::CliError;
use serde_json::{json, Map, Value};
use std::path::PathBuf;

/// What a command produced, printed after it finishes.
#[derive(Debug, Clone)]
pub(super) struct CommandSummary {
    pub(super) command: &'static str,
    pub(super) output: Option<PathBuf>,
    pub(super) details: Map<String, Value>,
}

impl CommandSummary {
    pub(super) fn new(command: &'static str, output: Option<PathBuf>) -> Self {
        Self {
            command,
            output,
            details: Map::new(),
        }
    }

    pub(super) fn insert(&mut self, key: &str, value: Value) {
        self.details.insert(key.to_string(), value);
    }

    fn to_json(&self) -> Value {
        json!({
            "command": self.command,
            "output": self.output.as_ref().map(|path| path.display().to_string()),
            "details": self.details,
        })
    }

    fn to_text(&self) -> Option<String> {
        let output = self.output.as_ref()?;
        let mut lines = vec![format!("{}: wrote '{}'", self.command, output.display())];
        lines.extend(
            self.details
                .iter()
                .map(|(key, value)| format!("  {}: {}", key, value)),
        );
        Some(lines.join("\n"))
    }
}

/// Stdout carries the grid itself when `roundtrip` has no output file, so
/// nothing else is printed in that case.
pub(super) fn print_summary(summary: &CommandSummary, as_json: bool) -> Result<(), CliError> {
    if summary.output.is_none() {
        return Ok(());
    }
    if as_json {
        let line = serde_json::to_string(&summary.to_json())
            .map_err(|error| CliError::Internal(error.into()))?;
        println!("{}", line);
    } else if let Some(text) = summary.to_text() {
        println!("{}", text);
    }
    Ok(())
}
