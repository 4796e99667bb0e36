use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::Context;

/// Formatting collaborator applied to every document before it is written.
/// Contract: deterministic, raw text in, formatted text out.
pub trait TextFormatter {
    fn format(&self, raw: &str) -> anyhow::Result<String>;
}

/// Writes documents exactly as rendered.
pub struct PassthroughFormatter;

impl TextFormatter for PassthroughFormatter {
    fn format(&self, raw: &str) -> anyhow::Result<String> {
        Ok(raw.to_string())
    }
}

/// Pipes each document through an external formatter process, e.g.
/// `prettier --parser typescript`.
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new(command_line: &str) -> anyhow::Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next().context("empty formatter command")?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl TextFormatter for CommandFormatter {
    fn format(&self, raw: &str) -> anyhow::Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to spawn formatter {}", self.program))?;
        child
            .stdin
            .take()
            .context("formatter stdin unavailable")?
            .write_all(raw.as_bytes())?;
        let output = child.wait_with_output()?;
        if !output.status.success() {
            anyhow::bail!("formatter {} exited with {}", self.program, output.status);
        }
        String::from_utf8(output.stdout).context("formatter produced non-UTF-8 output")
    }
}
