//! Parse configuration: delimiter, quoting, line endings and encoding

use crate::error::{CsvError, Result};
use std::fmt;
use std::str::FromStr;

/// Default scratch buffer size in characters
pub const DEFAULT_CHUNK_CAPACITY: usize = 8 * 1024;

/// Line-ending convention that terminates rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineEnding {
    /// `\n`
    #[default]
    Unix,
    /// `\r`
    Mac,
    /// `\r\n`. A lone `\r` or lone `\n` is field content.
    Windows,
}

/// How a single character relates to the configured line ending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineBreak {
    /// Ends the row on its own
    Terminates,
    /// First half of CRLF; the next character decides
    Pending,
    /// Not a line ending in this mode
    Literal,
}

impl LineEnding {
    /// Classify `ch` under this line-ending mode
    #[inline]
    pub fn classify(self, ch: char) -> LineBreak {
        match (self, ch) {
            (LineEnding::Unix, '\n') => LineBreak::Terminates,
            (LineEnding::Mac, '\r') => LineBreak::Terminates,
            (LineEnding::Windows, '\r') => LineBreak::Pending,
            _ => LineBreak::Literal,
        }
    }

    /// The character sequence this mode writes between rows
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Unix => "\n",
            LineEnding::Mac => "\r",
            LineEnding::Windows => "\r\n",
        }
    }
}

impl FromStr for LineEnding {
    type Err = CsvError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "unix" | "lf" | "\n" => Ok(LineEnding::Unix),
            "mac" | "cr" | "\r" => Ok(LineEnding::Mac),
            "windows" | "crlf" | "\r\n" => Ok(LineEnding::Windows),
            other => Err(CsvError::InvalidConfig(format!(
                "Unknown line ending '{}'",
                other
            ))),
        }
    }
}

/// Text encoding of byte input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Encoding {
    /// UTF-8, leading byte-order mark skipped
    #[default]
    Utf8,
    /// ISO-8859-1: each byte is the code point of the same value
    Latin1,
}

impl FromStr for Encoding {
    type Err = CsvError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "latin1" | "latin-1" | "iso-8859-1" | "iso8859-1" => Ok(Encoding::Latin1),
            other => Err(CsvError::InvalidConfig(format!(
                "Unsupported encoding '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Utf8 => write!(f, "utf-8"),
            Encoding::Latin1 => write!(f, "iso-8859-1"),
        }
    }
}

/// The characters the tokenizer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: char,
    pub quote_char: char,
    pub line_ending: LineEnding,
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect {
            delimiter: ',',
            quote_char: '"',
            line_ending: LineEnding::Unix,
        }
    }
}

/// Configuration for a parse run
///
/// # Examples
///
/// ```
/// use csvstream::{CsvConfig, LineEnding};
///
/// let config = CsvConfig::new()
///     .delimiter(';')
///     .line_ending(LineEnding::Windows)
///     .chunk_capacity(4096);
/// assert_eq!(config.dialect().delimiter, ';');
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CsvConfig {
    delimiter: char,
    quote_char: char,
    line_ending: LineEnding,
    encoding: Encoding,
    chunk_capacity: usize,
    has_header: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        CsvConfig {
            delimiter: ',',
            quote_char: '"',
            line_ending: LineEnding::Unix,
            encoding: Encoding::Utf8,
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            has_header: false,
        }
    }
}

impl CsvConfig {
    /// Create a config with defaults: comma, double quote, Unix, UTF-8
    pub fn new() -> Self {
        Self::default()
    }

    /// Set field delimiter (builder pattern)
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set quote character (builder pattern)
    pub fn quote_char(mut self, quote: char) -> Self {
        self.quote_char = quote;
        self
    }

    /// Set line-ending mode (builder pattern)
    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Set byte encoding used by reader-backed sources (builder pattern)
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set scratch buffer capacity in characters. Values below 1 are raised to 1.
    pub fn chunk_capacity(mut self, capacity: usize) -> Self {
        self.chunk_capacity = capacity.max(1);
        self
    }

    /// Treat the first row as a header row (builder pattern)
    pub fn has_header(mut self, has: bool) -> Self {
        self.has_header = has;
        self
    }

    pub fn get_encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn get_chunk_capacity(&self) -> usize {
        self.chunk_capacity
    }

    pub fn get_has_header(&self) -> bool {
        self.has_header
    }

    /// Characters the tokenizer needs from this config
    pub fn dialect(&self) -> Dialect {
        Dialect {
            delimiter: self.delimiter,
            quote_char: self.quote_char,
            line_ending: self.line_ending,
        }
    }

    /// Check that delimiter, quote and line endings do not collide
    pub fn validate(&self) -> Result<()> {
        if self.delimiter == self.quote_char {
            return Err(CsvError::InvalidConfig(format!(
                "Delimiter and quote character are both {:?}",
                self.delimiter
            )));
        }
        for ch in [self.delimiter, self.quote_char] {
            if ch == '\r' || ch == '\n' {
                return Err(CsvError::InvalidConfig(format!(
                    "{:?} cannot be used as delimiter or quote character",
                    ch
                )));
            }
        }
        Ok(())
    }
}
