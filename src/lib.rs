//! # csvstream
//!
//! Incremental CSV tokenizer. Decoded characters are pulled from a
//! [ChunkSource] in bounded chunks and split into rows of column strings,
//! with RFC 4180 quoting and Unix (`\n`), Mac (`\r`) or Windows (`\r\n`)
//! line endings. Quote and CRLF decisions carry over between chunks, so
//! the result does not depend on how the input is split.
//!
//! ## Quick Start
//!
//! ```
//! use csvstream::{parse_str, CsvConfig, LineEnding};
//!
//! let config = CsvConfig::new().line_ending(LineEnding::Windows);
//! let table = parse_str("a,\"b,c\"\r\nd,e", &config)?;
//! assert_eq!(table.rows, vec![vec!["a", "b,c"], vec!["d", "e"]]);
//! # Ok::<(), csvstream::CsvError>(())
//! ```
//!
//! ## Reading files
//!
//! ```no_run
//! use csvstream::csv_reader::CsvReader;
//!
//! let table = CsvReader::open("data.csv.zst")?
//!     .delimiter(';')
//!     .has_header(true)
//!     .read_table()?;
//! println!("{:?}", table.headers());
//! # Ok::<(), csvstream::CsvError>(())
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for config and table types
//! - `parallel`: parse many files at once with rayon

pub mod config;
pub mod csv;
pub mod csv_reader;
pub mod error;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod source;
pub mod types;

pub use config::{CsvConfig, Dialect, Encoding, LineEnding};
pub use csv::{CsvParser, ScratchBuffer, Tokenizer};
pub use csv_reader::CsvReader;
pub use error::{CsvError, MalformedKind, Result};
pub use source::{ChunkSource, ReaderSource, StrSource};
pub use types::{Row, Table};

use std::io::Read;

/// Parse in-memory text into a table
pub fn parse_str(text: &str, config: &CsvConfig) -> Result<Table> {
    CsvParser::new(config.clone())?.parse(&mut StrSource::new(text))
}

/// Parse bytes from `reader`, decoded with the config's encoding
pub fn parse_reader<R: Read>(reader: R, config: &CsvConfig) -> Result<Table> {
    let mut source = ReaderSource::new(reader, config.get_encoding());
    CsvParser::new(config.clone())?.parse(&mut source)
}
