//! Bridge to the external ESTree parser.

use anyhow::{Context, Result, bail};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

/// Turns normalized source text into ESTree JSON (with `loc` information).
pub trait SyntaxParser: Send + Sync {
    fn parse(&self, source: &str, relative_path: &str) -> Result<String>;
}

/// Runs an external command per file: normalized text on stdin, tree JSON on
/// stdout. A non-zero exit status is a parse failure and its stderr becomes
/// the error message.
#[derive(Debug, Clone)]
pub struct CommandParser {
    program: String,
    args: Vec<String>,
}

impl CommandParser {
    pub fn new(argv: &[String]) -> Result<Self> {
        let Some((program, args)) = argv.split_first() else {
            bail!("no parser configured: set \"parserCommand\" in the configuration");
        };
        Ok(CommandParser {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl SyntaxParser for CommandParser {
    fn parse(&self, source: &str, relative_path: &str) -> Result<String> {
        debug!(program = %self.program, file = relative_path, "running parser");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to start parser `{}`", self.program))?;

        let mut stdin = child.stdin.take().context("parser stdin unavailable")?;
        // stdin is fed from a second thread while stdout drains.
        let (output, written) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || stdin.write_all(source.as_bytes()));
            let output = child.wait_with_output();
            (output, writer.join())
        });
        let output =
            output.with_context(|| format!("parser `{}` did not finish", self.program))?;

        if !output.status.success() {
            bail!(
                "parser failed on {relative_path} ({}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        match written {
            Ok(result) => result
                .with_context(|| format!("failed to send {relative_path} to the parser"))?,
            Err(_) => bail!("parser input thread panicked"),
        }
        String::from_utf8(output.stdout)
            .with_context(|| format!("parser output for {relative_path} is not UTF-8"))
    }
}
