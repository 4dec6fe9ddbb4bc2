//! Error types for CSV tokenizing

use thiserror::Error;

/// Result type alias for csvstream operations
pub type Result<T> = std::result::Result<T, CsvError>;

/// Errors that can occur while reading and tokenizing CSV
#[derive(Debug, Error)]
pub enum CsvError {
    /// The input is not well-formed CSV. The parse is aborted.
    #[error("Malformed CSV at row {row} (char offset {offset}): {kind}")]
    Malformed {
        /// 1-based row that was being assembled
        row: u64,
        /// Character offset from the start of the input
        offset: u64,
        /// What went wrong
        kind: MalformedKind,
    },

    /// I/O failure from the underlying chunk source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Byte sequence not valid in the configured encoding
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Failed to open or read an input file
    #[error("Read error: {0}")]
    ReadError(String),

    /// Rejected configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl CsvError {
    /// Returns the malformed-input kind if this is a parse failure
    pub fn malformed_kind(&self) -> Option<MalformedKind> {
        match self {
            CsvError::Malformed { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Ways in which CSV input can be malformed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedKind {
    /// A closing quote was followed by something other than a quote,
    /// delimiter or line ending
    #[error("unexpected character {0:?} after closing quote")]
    UnexpectedAfterQuote(char),
    /// Input ended inside a quoted field
    #[error("unterminated quoted field")]
    UnterminatedQuote,
    /// Input ended between CR and LF of a Windows line ending
    #[error("input ended in the middle of a CRLF line ending")]
    TruncatedLineEnding,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let err = CsvError::Malformed {
            row: 3,
            offset: 17,
            kind: MalformedKind::UnexpectedAfterQuote('x'),
        };
        assert_eq!(
            err.to_string(),
            "Malformed CSV at row 3 (char offset 17): unexpected character 'x' after closing quote"
        );
        assert_eq!(
            err.malformed_kind(),
            Some(MalformedKind::UnexpectedAfterQuote('x'))
        );
    }

    #[test]
    fn test_malformed_kind_messages() {
        assert_eq!(
            MalformedKind::UnexpectedAfterQuote('\r').to_string(),
            "unexpected character '\\r' after closing quote"
        );
        assert_eq!(
            MalformedKind::UnterminatedQuote.to_string(),
            "unterminated quoted field"
        );
        assert_eq!(
            MalformedKind::TruncatedLineEnding.to_string(),
            "input ended in the middle of a CRLF line ending"
        );

        let kind: Box<dyn std::error::Error> = Box::new(MalformedKind::UnterminatedQuote);
        assert!(kind.source().is_none());
    }

    #[test]
    fn test_io_error_is_not_malformed() {
        let err: CsvError = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert!(err.malformed_kind().is_none());
        assert!(err.to_string().contains("boom"));
    }
}
