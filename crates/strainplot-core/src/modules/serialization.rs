use crate::domain::{PlotError, PlotResult};
use std::fs;
use std::path::Path;

/// Fixed-decimal tick label; a value that rounds to zero never prints a sign.
pub fn format_tick_label(value: f64, decimals: usize) -> String {
    let label = format!("{:.*}", decimals, value);
    match label.strip_prefix('-') {
        Some(unsigned) if unsigned.chars().all(|c| c == '0' || c == '.') => unsigned.to_string(),
        _ => label,
    }
}

/// `\n` line endings with exactly the trailing newlines the content had, plus
/// one when it had none.
pub fn with_unix_newlines(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }
    let mut text = content.lines().collect::<Vec<_>>().join("\n");
    text.push('\n');
    text
}

pub fn write_text_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, with_unix_newlines(content))
}

pub fn read_text_input(path: &Path, artifact_name: &str) -> PlotResult<String> {
    fs::read_to_string(path).map_err(|source| {
        PlotError::io_system(
            "IO.INPUT_READ",
            format!(
                "failed to read {} input '{}': {}",
                artifact_name,
                path.display(),
                source
            ),
        )
    })
}
