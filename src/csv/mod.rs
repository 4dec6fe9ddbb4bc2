//! Incremental CSV tokenizing and table assembly

mod buffer;
mod parser;
mod tokenizer;

pub use buffer::ScratchBuffer;
pub use parser::CsvParser;
pub use tokenizer::{scan, Boundary, ScanError, ScanState, Step, Tokenizer};
