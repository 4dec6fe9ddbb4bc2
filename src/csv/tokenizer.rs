//! Character-level CSV state machine
//!
//! [scan] consumes a view of characters and stops at the first field or
//! row boundary. Everything that must survive a chunk refill lives in
//! [ScanState], which the caller threads from one call to the next:
//!
//! - a quote inside a quoted field may be an escape (`""`) or the closing
//!   quote, decided by the following character
//! - in Windows mode a CR may start a CRLF or be literal data, decided by
//!   the following character
//!
//! A lone CR in Windows mode is kept as field content, and so is a lone LF.

use crate::config::{Dialect, LineBreak};
use crate::error::MalformedKind;

/// State carried between scan calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Nothing of the current field consumed yet
    #[default]
    FieldStart,
    /// Inside an unquoted field
    Unquoted,
    /// Inside a quoted field
    InQuote,
    /// Last character was a quote inside a quoted field
    QuoteAmbiguous,
    /// Last character was a CR in Windows mode
    CrAmbiguous { within_quote: bool },
}

/// What stopped a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// View exhausted, no boundary yet
    NeedMore,
    /// Field ended at a delimiter
    Column,
    /// Field and row ended at a line ending
    Row,
}

/// Result of one scan call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub state: ScanState,
    /// Characters of the view consumed, boundary characters included
    pub consumed: usize,
    pub boundary: Boundary,
}

/// Malformed input found during a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanError {
    pub kind: MalformedKind,
    /// Index into the scanned view of the offending character
    pub index: usize,
}

enum Action {
    Continue(ScanState),
    Emit(Boundary),
}

/// Unquoted-field handling of one character
#[inline]
fn unquoted_char(ch: char, dialect: &Dialect, field: &mut String) -> Action {
    if ch == dialect.delimiter {
        return Action::Emit(Boundary::Column);
    }
    match dialect.line_ending.classify(ch) {
        LineBreak::Terminates => Action::Emit(Boundary::Row),
        LineBreak::Pending => Action::Continue(ScanState::CrAmbiguous {
            within_quote: false,
        }),
        LineBreak::Literal => {
            field.push(ch);
            Action::Continue(ScanState::Unquoted)
        }
    }
}

/// Scan `view` starting in `state`, appending field content to `field`.
///
/// Stops right after the first boundary; the returned state is then
/// [ScanState::FieldStart] and `field` holds the completed field. On
/// [Boundary::NeedMore] the whole view has been consumed.
///
/// # Errors
/// [MalformedKind::UnexpectedAfterQuote] if a closing quote is followed by
/// anything but a quote, the delimiter or the configured line ending.
pub fn scan(
    mut state: ScanState,
    view: &[char],
    dialect: &Dialect,
    field: &mut String,
) -> Result<Step, ScanError> {
    for (i, &ch) in view.iter().enumerate() {
        let action = match state {
            ScanState::FieldStart if ch == dialect.quote_char => {
                Action::Continue(ScanState::InQuote)
            }
            ScanState::FieldStart | ScanState::Unquoted => unquoted_char(ch, dialect, field),
            ScanState::InQuote => {
                if ch == dialect.quote_char {
                    Action::Continue(ScanState::QuoteAmbiguous)
                } else {
                    field.push(ch);
                    Action::Continue(ScanState::InQuote)
                }
            }
            ScanState::QuoteAmbiguous => {
                if ch == dialect.quote_char {
                    field.push(ch);
                    Action::Continue(ScanState::InQuote)
                } else if ch == dialect.delimiter {
                    Action::Emit(Boundary::Column)
                } else {
                    match dialect.line_ending.classify(ch) {
                        LineBreak::Terminates => Action::Emit(Boundary::Row),
                        LineBreak::Pending => Action::Continue(ScanState::CrAmbiguous {
                            within_quote: true,
                        }),
                        LineBreak::Literal => {
                            return Err(ScanError {
                                kind: MalformedKind::UnexpectedAfterQuote(ch),
                                index: i,
                            })
                        }
                    }
                }
            }
            ScanState::CrAmbiguous { within_quote } => {
                if ch == '\n' {
                    Action::Emit(Boundary::Row)
                } else if within_quote {
                    return Err(ScanError {
                        kind: MalformedKind::UnexpectedAfterQuote('\r'),
                        index: i,
                    });
                } else {
                    // Not a CRLF: the CR was data
                    field.push('\r');
                    unquoted_char(ch, dialect, field)
                }
            }
        };

        match action {
            Action::Continue(next) => state = next,
            Action::Emit(boundary) => {
                return Ok(Step {
                    state: ScanState::FieldStart,
                    consumed: i + 1,
                    boundary,
                })
            }
        }
    }

    Ok(Step {
        state,
        consumed: view.len(),
        boundary: Boundary::NeedMore,
    })
}

/// Incremental tokenizer: carried state plus the field accumulator
#[derive(Debug, Clone)]
pub struct Tokenizer {
    dialect: Dialect,
    state: ScanState,
    field: String,
    consumed: u64,
}

impl Tokenizer {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            state: ScanState::FieldStart,
            field: String::new(),
            consumed: 0,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Characters consumed since creation
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Scan a view of input. Returns the boundary found and how many
    /// characters of `view` were consumed.
    ///
    /// On error, [Tokenizer::consumed] points at the offending character.
    pub fn scan(&mut self, view: &[char]) -> Result<(Boundary, usize), MalformedKind> {
        let step = match scan(self.state, view, &self.dialect, &mut self.field) {
            Ok(step) => step,
            Err(e) => {
                self.consumed += e.index as u64;
                return Err(e.kind);
            }
        };
        self.state = step.state;
        self.consumed += step.consumed as u64;
        Ok((step.boundary, step.consumed))
    }

    /// Take the completed field, leaving the accumulator empty
    pub fn take_field(&mut self) -> String {
        std::mem::take(&mut self.field)
    }

    /// Resolve carried state at end of input.
    ///
    /// Returns the final field when a row is still open: `row_open` says
    /// whether the caller already holds fields of the current row.
    ///
    /// # Errors
    /// [MalformedKind::UnterminatedQuote] inside a quoted field,
    /// [MalformedKind::TruncatedLineEnding] after a pending CR.
    pub fn finish(&mut self, row_open: bool) -> Result<Option<String>, MalformedKind> {
        let state = std::mem::take(&mut self.state);
        match state {
            ScanState::InQuote => Err(MalformedKind::UnterminatedQuote),
            ScanState::CrAmbiguous { .. } => Err(MalformedKind::TruncatedLineEnding),
            ScanState::FieldStart if !row_open => Ok(None),
            ScanState::FieldStart | ScanState::Unquoted | ScanState::QuoteAmbiguous => {
                Ok(Some(self.take_field()))
            }
        }
    }
}
