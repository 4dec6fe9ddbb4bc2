//! Row and table assembly on top of the tokenizer

use super::buffer::ScratchBuffer;
use super::tokenizer::{Boundary, Tokenizer};
use crate::config::CsvConfig;
use crate::error::{CsvError, MalformedKind, Result};
use crate::source::ChunkSource;
use crate::types::{Row, Table};
use tracing::{debug, trace, warn};

/// CSV parser driving a [ChunkSource] through the tokenizer
///
/// # Examples
///
/// ```
/// use csvstream::{CsvConfig, CsvParser, StrSource};
///
/// let parser = CsvParser::new(CsvConfig::default())?;
/// let table = parser.parse(&mut StrSource::new("a,\"b,c\",d"))?;
/// assert_eq!(table.rows, vec![vec!["a", "b,c", "d"]]);
/// # Ok::<(), csvstream::CsvError>(())
/// ```
pub struct CsvParser {
    config: CsvConfig,
}

impl CsvParser {
    /// Create a parser, rejecting configs whose special characters collide
    pub fn new(config: CsvConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    /// Parse the whole source into a table using a fresh scratch buffer
    pub fn parse<S: ChunkSource + ?Sized>(&self, source: &mut S) -> Result<Table> {
        let mut scratch = ScratchBuffer::new(self.config.get_chunk_capacity());
        self.parse_with_buffer(source, &mut scratch)
    }

    /// Parse the whole source into a table, staging input in `scratch`.
    ///
    /// The buffer is cleared first; leftovers from an earlier run are not read.
    /// On malformed input no table is returned.
    pub fn parse_with_buffer<S: ChunkSource + ?Sized>(
        &self,
        source: &mut S,
        scratch: &mut ScratchBuffer,
    ) -> Result<Table> {
        scratch.clear();
        debug!(
            capacity = scratch.capacity(),
            line_ending = ?self.config.dialect().line_ending,
            "Starting CSV parse"
        );

        let mut tokenizer = Tokenizer::new(self.config.dialect());
        let mut table = Table::new();
        let mut row: Row = Vec::new();
        let mut exhausted = false;

        loop {
            if scratch.is_empty() {
                if exhausted {
                    let last = tokenizer
                        .finish(!row.is_empty())
                        .map_err(|kind| malformed(&table, &tokenizer, kind))?;
                    if let Some(field) = last {
                        row.push(field);
                        table.push(row);
                    }
                    break;
                }
                let n = scratch.refill(source)?;
                exhausted = n == 0 || source.at_end();
                trace!(chars = n, exhausted, "Refilled scratch buffer");
                continue;
            }

            let (boundary, consumed) = tokenizer
                .scan(scratch.view())
                .map_err(|kind| malformed(&table, &tokenizer, kind))?;
            scratch.consume(consumed);

            match boundary {
                Boundary::NeedMore => {}
                Boundary::Column => row.push(tokenizer.take_field()),
                Boundary::Row => {
                    row.push(tokenizer.take_field());
                    table.push(std::mem::take(&mut row));
                }
            }
        }

        if self.config.get_has_header() {
            table.split_header();
        }

        debug!(
            rows = table.len(),
            chars = tokenizer.consumed(),
            "Finished CSV parse"
        );
        Ok(table)
    }
}

fn malformed(table: &Table, tokenizer: &Tokenizer, kind: MalformedKind) -> CsvError {
    let row = table.len() as u64 + 1;
    let offset = tokenizer.consumed();
    warn!(row, offset, %kind, "Malformed CSV input");
    CsvError::Malformed { row, offset, kind }
}
