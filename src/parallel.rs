//! Parse independent CSV inputs concurrently
//!
//! Each input still runs through its own single-threaded tokenizer with its
//! own scratch buffer; only whole parse runs are spread over the rayon pool.

use crate::config::CsvConfig;
use crate::csv_reader::CsvReader;
use crate::error::Result;
use crate::types::Table;
use rayon::prelude::*;
use std::path::Path;

/// Parse every file with the same config. Results keep the order of `paths`.
pub fn parse_files<P>(paths: &[P], config: &CsvConfig) -> Vec<Result<Table>>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|path| {
            CsvReader::open(path)?
                .with_config(config.clone())
                .read_table()
        })
        .collect()
}

/// Parse in-memory texts with the same config. Results keep the order of `texts`.
pub fn parse_strs<S>(texts: &[S], config: &CsvConfig) -> Vec<Result<Table>>
where
    S: AsRef<str> + Sync,
{
    texts
        .par_iter()
        .map(|text| crate::parse_str(text.as_ref(), config))
        .collect()
}
