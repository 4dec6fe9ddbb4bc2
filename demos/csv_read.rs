//! Read a CSV file and print its rows
//!
//! Usage: cargo run --example csv_read -- <file> [delimiter] [unix|mac|windows]
//!
//! Set RUST_LOG=csvstream=debug to see tokenizer logs.

use csvstream::csv_reader::CsvReader;
use csvstream::LineEnding;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().ok_or("missing CSV file argument")?;
    let delimiter = args
        .next()
        .and_then(|d| d.chars().next())
        .unwrap_or(',');
    let line_ending: LineEnding = match args.next() {
        Some(mode) => mode.parse()?,
        None => LineEnding::Unix,
    };

    println!("Reading {} (delimiter {:?}, {:?})", path, delimiter, line_ending);

    let start = Instant::now();
    let table = CsvReader::open(&path)?
        .delimiter(delimiter)
        .line_ending(line_ending)
        .has_header(true)
        .read_table()?;
    let elapsed = start.elapsed();

    if let Some(headers) = table.headers() {
        println!("Headers: {:?}", headers);
    }
    for (i, row) in table.iter().take(10).enumerate() {
        println!("Row {}: {:?}", i + 1, row);
    }
    if table.len() > 10 {
        println!("... {} more rows", table.len() - 10);
    }

    println!("\nParsed {} rows in {:?}", table.len(), elapsed);
    Ok(())
}
