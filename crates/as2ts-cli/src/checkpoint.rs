//! Resumable-batch bookkeeping.
//!
//! Before each file is processed, `input|output|file` is written to
//! `<tmp>/last.txt`. A later run over the same input and output with
//! `continueLast` set skips every file until it reaches the recorded one,
//! then proceeds normally from there.

use anyhow::Result;
use std::path::Path;
use tracing::{debug, warn};

use crate::fs::{read_file, write_file};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    pub input: String,
    pub output: String,
    pub file: String,
}

impl Checkpoint {
    pub fn new(input: impl Into<String>, output: impl Into<String>, file: impl Into<String>) -> Self {
        Checkpoint {
            input: input.into(),
            output: output.into(),
            file: file.into(),
        }
    }

    /// Parse `input|output|file`. The file part may itself contain `|`.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.trim_end_matches(['\r', '\n']).splitn(3, '|');
        let input = parts.next()?;
        let output = parts.next()?;
        let file = parts.next()?;
        Some(Checkpoint::new(input, output, file))
    }

    pub fn render(&self) -> String {
        format!("{}|{}|{}", self.input, self.output, self.file)
    }

    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        Ok(Checkpoint::parse(&read_file(path)?))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_file(path, &self.render())
    }
}

/// Decides, file by file, whether a resumed phase has reached the recorded
/// file yet. Without a target every file is admitted.
#[derive(Debug, Clone, Default)]
pub struct ResumeGate {
    target: Option<String>,
    reached: bool,
}

impl ResumeGate {
    pub fn open() -> Self {
        Self::default()
    }

    pub fn resume_at(file: impl Into<String>) -> Self {
        ResumeGate {
            target: Some(file.into()),
            reached: false,
        }
    }

    /// The gate for a run over `input` into `output`: resumes at the
    /// checkpoint's file when `continue_last` is set and the checkpoint
    /// was written for the same input and output.
    pub fn for_run(continue_last: bool, checkpoint_path: &Path, input: &str, output: &str) -> Result<Self> {
        if !continue_last {
            return Ok(Self::open());
        }
        match Checkpoint::load(checkpoint_path)? {
            Some(checkpoint) if checkpoint.input == input && checkpoint.output == output => {
                debug!(file = %checkpoint.file, "resuming from checkpoint");
                Ok(Self::resume_at(checkpoint.file))
            }
            _ => {
                warn!(
                    path = %checkpoint_path.display(),
                    "no matching checkpoint found, continueLast has no effect"
                );
                Ok(Self::open())
            }
        }
    }

    pub fn is_resuming(&self) -> bool {
        self.target.is_some()
    }

    /// Whether `file` should be processed.
    pub fn admits(&mut self, file: &str) -> bool {
        match &self.target {
            None => true,
            Some(_) if self.reached => true,
            Some(target) => {
                self.reached = target == file;
                self.reached
            }
        }
    }

    /// A fresh gate for the next phase, targeting the same file.
    #[must_use]
    pub fn restarted(&self) -> Self {
        ResumeGate {
            target: self.target.clone(),
            reached: false,
        }
    }
}
