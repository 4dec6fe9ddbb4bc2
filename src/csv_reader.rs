//! CSV file reading, plain or from a ZIP archive

use crate::config::{CsvConfig, Encoding, LineEnding};
use crate::csv::CsvParser;
use crate::error::{CsvError, Result};
use crate::source::ReaderSource;
use crate::types::Table;
use s_zip::StreamingZipReader;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;
use tracing::debug;

enum Input {
    Plain(BufReader<File>),
    Decompressed(Vec<u8>),
}

/// CSV file reader
///
/// Plain files are decoded and tokenized chunk by chunk straight from disk.
/// Archives (.csv.zip, .csv.zst, .csv.gz) must be ZIP containers whose CSV
/// entry is stored with zstd or deflate, as written by `s_zip::StreamingZipWriter`.
/// The entry is decompressed into memory first. Bare gzip or zstd streams are
/// rejected with [CsvError::ReadError].
///
/// # Examples
///
/// ```no_run
/// use csvstream::csv_reader::CsvReader;
/// use csvstream::LineEnding;
///
/// let table = CsvReader::open("data.csv")?
///     .line_ending(LineEnding::Windows)
///     .read_table()?;
///
/// for row in &table {
///     println!("{:?}", row);
/// }
/// # Ok::<(), csvstream::CsvError>(())
/// ```
///
/// # With Headers
///
/// ```no_run
/// use csvstream::csv_reader::CsvReader;
///
/// let table = CsvReader::open("data.csv")?
///     .has_header(true)
///     .read_table()?;
///
/// if let Some(headers) = table.headers() {
///     println!("Headers: {:?}", headers);
/// }
/// # Ok::<(), csvstream::CsvError>(())
/// ```
pub struct CsvReader {
    input: Input,
    config: CsvConfig,
}

impl CsvReader {
    /// Open CSV file - picks plain or ZIP reading from the file extension
    ///
    /// # File Extensions
    /// - `.csv` → Uncompressed, read in chunks
    /// - `.csv.zip`, `.csv.zst`, `.csv.gz` → ZIP container; the first `.csv`
    ///   entry (zstd or deflate) is decompressed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_str().unwrap_or("");

        let input = if path_str.ends_with(".csv.zst")
            || path_str.ends_with(".csv.zip")
            || path_str.ends_with(".csv.gz")
        {
            let mut zip = StreamingZipReader::open(path_ref)
                .map_err(|e| {
                    CsvError::ReadError(format!("Failed to open ZIP container: {}", e))
                })?;

            // First .csv entry, else the first entry
            let entry_name = zip
                .entries()
                .iter()
                .find(|e| e.name.ends_with(".csv"))
                .or_else(|| zip.entries().first())
                .ok_or_else(|| CsvError::ReadError("No CSV entry found in archive".to_string()))?
                .name
                .clone();

            let data = zip
                .read_entry_by_name(&entry_name)
                .map_err(|e| CsvError::ReadError(format!("Failed to read ZIP entry: {}", e)))?;

            debug!(entry = %entry_name, bytes = data.len(), "Decompressed CSV entry");
            Input::Decompressed(data)
        } else {
            let file = File::open(path_ref)
                .map_err(|e| CsvError::ReadError(format!("Failed to open CSV file: {}", e)))?;
            Input::Plain(BufReader::new(file))
        };

        Ok(CsvReader {
            input,
            config: CsvConfig::default(),
        })
    }

    /// Replace the whole configuration (builder pattern)
    pub fn with_config(mut self, config: CsvConfig) -> Self {
        self.config = config;
        self
    }

    /// Set custom delimiter (builder pattern)
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use csvstream::csv_reader::CsvReader;
    ///
    /// let reader = CsvReader::open("data.csv")
    ///     .unwrap()
    ///     .delimiter(';');
    /// ```
    pub fn delimiter(mut self, delim: char) -> Self {
        self.config = self.config.delimiter(delim);
        self
    }

    /// Set custom quote character (builder pattern)
    pub fn quote_char(mut self, quote: char) -> Self {
        self.config = self.config.quote_char(quote);
        self
    }

    /// Set line-ending mode (builder pattern)
    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.config = self.config.line_ending(line_ending);
        self
    }

    /// Set text encoding of the file (builder pattern)
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.config = self.config.encoding(encoding);
        self
    }

    /// Indicate that the first row contains headers (builder pattern)
    ///
    /// When set to `true`, the first row is returned in [Table::headers]
    /// instead of [Table::rows].
    pub fn has_header(mut self, has: bool) -> Self {
        self.config = self.config.has_header(has);
        self
    }

    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    /// Read and tokenize the whole file
    pub fn read_table(self) -> Result<Table> {
        let parser = CsvParser::new(self.config.clone())?;
        let encoding = self.config.get_encoding();
        match self.input {
            Input::Plain(reader) => parser.parse(&mut ReaderSource::new(reader, encoding)),
            Input::Decompressed(data) => {
                parser.parse(&mut ReaderSource::new(Cursor::new(data), encoding))
            }
        }
    }
}
