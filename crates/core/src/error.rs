use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("task file line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CoreError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        CoreError::Parse {
            line,
            message: message.into(),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
