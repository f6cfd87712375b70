use as2ts_common::Diagnostic;
use thiserror::Error;

/// Why generation of a file stopped early.
#[derive(Debug, Error)]
pub enum EmitError {
    /// An error diagnostic was raised while terminate-on-error is set.
    #[error("{}({}:{}) - error AS{}: {}", .0.file, .0.line, .0.column, .0.code, .0.message_text)]
    Terminated(Box<Diagnostic>),
}

impl EmitError {
    pub fn diagnostic(&self) -> &Diagnostic {
        match self {
            EmitError::Terminated(diagnostic) => diagnostic,
        }
    }
}

pub type EmitResult<T = ()> = Result<T, EmitError>;
