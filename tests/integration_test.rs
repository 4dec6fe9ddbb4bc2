//! Integration tests for csvstream

use csvstream::csv_reader::CsvReader;
use csvstream::{
    parse_reader, parse_str, CsvConfig, CsvError, CsvParser, LineEnding, MalformedKind,
    ScratchBuffer, StrSource,
};
use std::io::{Read, Write};
use tempfile::NamedTempFile;

fn rows(table: csvstream::Table) -> Vec<Vec<String>> {
    table.into_rows()
}

fn windows() -> CsvConfig {
    CsvConfig::new().line_ending(LineEnding::Windows)
}

/// Inputs valid under the paired line-ending mode
fn corpus() -> Vec<(&'static str, LineEnding)> {
    vec![
        ("a,b,c\nd,e,f", LineEnding::Unix),
        ("a,\"b,c\",d\n\"x\"\"y\",,z\n", LineEnding::Unix),
        ("\"multi\nline\",\"\"\"quoted\"\"\"\n\n,", LineEnding::Unix),
        ("a,b\r\nc,d", LineEnding::Windows),
        ("a\rb,c\r\n\"q\r\n\",\"\"\r\nlone\nlf", LineEnding::Windows),
        ("x\r\r\n\"y\"\r\n", LineEnding::Windows),
        ("a,b\rc,\"d\re\"\r\"\"", LineEnding::Mac),
        ("héllo,wörld,日本\n€,\"ü,ß\"", LineEnding::Unix),
    ]
}

#[test]
fn test_unquoted_round_trip() {
    for line_ending in [LineEnding::Unix, LineEnding::Mac, LineEnding::Windows] {
        let text = ["id,name,city", "1,Alice,NYC", ",,", "2,Bob,SF"].join(line_ending.as_str());
        let config = CsvConfig::new().line_ending(line_ending);

        let table = parse_str(&text, &config).unwrap();
        let rejoined = table
            .iter()
            .map(|row| row.join(","))
            .collect::<Vec<_>>()
            .join(line_ending.as_str());

        assert_eq!(rejoined, text, "{:?}", line_ending);
    }
}

#[test]
fn test_quoted_field_with_delimiter() {
    let table = parse_str("a,\"b,c\",d", &CsvConfig::default()).unwrap();
    assert_eq!(rows(table), vec![vec!["a", "b,c", "d"]]);
}

#[test]
fn test_escaped_quote_sole_field() {
    let table = parse_str("\"a\"\"b\"", &CsvConfig::default()).unwrap();
    assert_eq!(rows(table), vec![vec!["a\"b"]]);
}

#[test]
fn test_windows_crlf_rows() {
    let table = parse_str("a,b\r\nc,d", &windows()).unwrap();
    assert_eq!(rows(table), vec![vec!["a", "b"], vec!["c", "d"]]);
}

#[test]
fn test_windows_lone_cr_kept_as_content() {
    let table = parse_str("a\rb,c", &windows()).unwrap();
    assert_eq!(rows(table), vec![vec!["a\rb", "c"]]);
}

#[test]
fn test_windows_lone_lf_kept_as_content() {
    let table = parse_str("a\nb,c\r\nd", &windows()).unwrap();
    assert_eq!(rows(table), vec![vec!["a\nb", "c"], vec!["d"]]);
}

#[test]
fn test_unterminated_quote_fails() {
    let err = parse_str("\"a,\"b", &CsvConfig::default()).unwrap_err();
    assert_eq!(
        err.malformed_kind(),
        Some(MalformedKind::UnexpectedAfterQuote('b'))
    );

    let err = parse_str("a,\"b,c\nd", &CsvConfig::default()).unwrap_err();
    assert_eq!(err.malformed_kind(), Some(MalformedKind::UnterminatedQuote));
}

#[test]
fn test_chunk_size_insensitive() {
    for (text, line_ending) in corpus() {
        let config = CsvConfig::new().line_ending(line_ending);
        let expected = parse_str(text, &config.clone().chunk_capacity(1 << 16)).unwrap();

        for capacity in [1, 2, 3, 7] {
            let table = parse_str(text, &config.clone().chunk_capacity(capacity)).unwrap();
            assert_eq!(table, expected, "{:?} with capacity {}", text, capacity);
        }
    }
}

#[test]
fn test_chunk_size_insensitive_errors() {
    let bad = [
        ("a,\"b\"x", LineEnding::Unix),
        ("\"never closed", LineEnding::Unix),
        ("a,b\r", LineEnding::Windows),
        ("\"a\"\rb", LineEnding::Windows),
    ];
    for (text, line_ending) in bad {
        let config = CsvConfig::new().line_ending(line_ending);
        let expected = parse_str(text, &config).unwrap_err().malformed_kind();
        assert!(expected.is_some(), "{:?}", text);

        for capacity in [1, 2, 3] {
            let err = parse_str(text, &config.clone().chunk_capacity(capacity)).unwrap_err();
            assert_eq!(err.malformed_kind(), expected, "{:?} with capacity {}", text, capacity);
        }
    }
}

#[test]
fn test_reparse_is_idempotent() {
    for (text, line_ending) in corpus() {
        let config = CsvConfig::new().line_ending(line_ending);
        let parser = CsvParser::new(config).unwrap();
        let mut scratch = ScratchBuffer::new(5);

        let first = parser
            .parse_with_buffer(&mut StrSource::new(text), &mut scratch)
            .unwrap();
        let second = parser
            .parse_with_buffer(&mut StrSource::new(text), &mut scratch)
            .unwrap();
        assert_eq!(first, second);
    }
}

/// Reader handing out three bytes per call, splitting UTF-8 sequences
struct Trickle<'a>(&'a [u8]);

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.0.len().min(buf.len()).min(3);
        buf[..n].copy_from_slice(&self.0[..n]);
        self.0 = &self.0[n..];
        Ok(n)
    }
}

#[test]
fn test_reader_matches_str() {
    for (text, line_ending) in corpus() {
        let config = CsvConfig::new().line_ending(line_ending).chunk_capacity(4);
        let from_reader = parse_reader(Trickle(text.as_bytes()), &config).unwrap();
        let from_str = parse_str(text, &config).unwrap();
        assert_eq!(from_reader, from_str);
    }
}

#[test]
fn test_io_error_propagates_unchanged() {
    struct Broken;
    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::TimedOut, "slow disk"))
        }
    }

    let err = parse_reader(Broken, &CsvConfig::default()).unwrap_err();
    assert!(matches!(err, CsvError::Io(e) if e.kind() == std::io::ErrorKind::TimedOut));
}

#[test]
fn test_read_file_with_header() {
    let mut temp = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    temp.write_all(b"\xEF\xBB\xBFID,Note\r\n1,\"said \"\"hi\"\"\"\r\n2,\"a\r\nb\"\r\n")
        .unwrap();
    temp.flush().unwrap();

    let table = CsvReader::open(temp.path())
        .unwrap()
        .line_ending(LineEnding::Windows)
        .has_header(true)
        .read_table()
        .unwrap();

    assert_eq!(
        table.headers(),
        Some(&["ID".to_string(), "Note".to_string()][..])
    );
    assert_eq!(
        rows(table),
        vec![vec!["1", "said \"hi\""], vec!["2", "a\r\nb"]]
    );
}

#[test]
fn test_large_dataset() {
    let mut temp = NamedTempFile::new().unwrap();
    let num_rows = 1000;

    writeln!(temp, "ID,Value,Label").unwrap();
    for i in 0..num_rows {
        writeln!(temp, "{},{},\"row, {}\"", i, i * 2, i).unwrap();
    }
    temp.flush().unwrap();

    let file = std::fs::File::open(temp.path()).unwrap();
    let config = CsvConfig::new().has_header(true).chunk_capacity(64);
    let table = parse_reader(file, &config).unwrap();

    assert_eq!(table.len(), num_rows);
    assert_eq!(table.rows[999], vec!["999", "1998", "row, 999"]);
}
