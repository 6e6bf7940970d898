use anyhow::{Context, Result};
use chrono::Local;
use std::fmt::Write as _;
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Human-readable log of one run, written out in full at the end
#[derive(Debug, Clone)]
pub struct RunLog {
    program: String,
    text: String,
}

impl RunLog {
    pub fn start(program: impl Into<String>) -> Self {
        let program = program.into();
        let text = format!("Program {program}: Starting {}\n\n", now());
        RunLog { program, text }
    }

    pub fn input(&mut self, path: &Path) {
        let _ = writeln!(self.text, "Reading YGOB clusters from {}", path.display());
    }

    pub fn created(&mut self, path: &Path, pairs: usize) {
        let _ = writeln!(self.text, "Creating file {}", path.display());
        let _ = writeln!(self.text, "Found {pairs} ortholog pairs\n");
    }

    pub fn error(&mut self, message: &str) {
        let _ = writeln!(self.text, "ERROR: {message}");
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Append the exit line and overwrite `path` with the whole log
    pub fn finish(mut self, path: &Path) -> Result<()> {
        let _ = writeln!(self.text, "Exiting {}: {}\n", self.program, now());
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }
        std::fs::write(path, &self.text)
            .with_context(|| format!("Failed to write log file {}", path.display()))
    }
}
