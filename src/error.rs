use thiserror::Error;

/// Result alias for errors emitted by ts-clippy internals.
pub type ClippyResult<T> = Result<T, TsClippyError>;

/// Structured error type for ts-clippy subsystems.
///
/// Detector logic never produces these: an inconclusive type query or an
/// unrecognised tree shape is "no finding", not an error. Only the host side
/// (reading files, loading the grammar, parsing config) can fail.
#[derive(Debug, Error)]
pub enum TsClippyError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse failure: {0}")]
    Parse(String),

    #[error("config error: {0}")]
    Config(String),
}

impl TsClippyError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_with_prefix() {
        let err: TsClippyError = std::io::Error::other("boom").into();
        assert_eq!(err.to_string(), "I/O error: boom");
    }

    #[test]
    fn parse_error_message() {
        assert_eq!(
            TsClippyError::parse("no tree").to_string(),
            "parse failure: no tree"
        );
    }
}
