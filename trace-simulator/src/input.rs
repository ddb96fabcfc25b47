//! Trace input for cache simulation
//!
//! A trace is plain whitespace-separated text:
//!
//! ```text
//! <capacity> <count> <key_1> <key_2> ... <key_count>
//! ```
//!
//! Tokens may be spread over any number of lines. Tokens after the last key
//! are ignored. Two readers are provided: [`TraceReader::read`] stops at the
//! first bad token, while [`TraceReader::read_interactive`] reprompts the
//! user and keeps going.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use thiserror::Error;

/// Capacity and keys read from a trace source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    /// Number of entries the cache under test may hold
    pub capacity: usize,
    /// Requested keys in order
    pub keys: Vec<i64>,
}

impl Trace {
    /// Create a trace from its parts
    pub fn new(capacity: usize, keys: Vec<i64>) -> Self {
        Self { capacity, keys }
    }

    /// Number of requests in the trace
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the trace holds no requests
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of distinct keys in the trace
    pub fn unique_keys(&self) -> usize {
        let mut keys = self.keys.clone();
        keys.sort_unstable();
        keys.dedup();
        keys.len()
    }

    /// Write the trace in the text format read by [`TraceReader`]
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "{} {}", self.capacity, self.keys.len())?;
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                if i % 20 == 0 {
                    writeln!(writer)?;
                } else {
                    write!(writer, " ")?;
                }
            }
            write!(writer, "{key}")?;
        }
        writeln!(writer)?;
        writer.flush()
    }
}

/// Which part of the trace a token was expected to hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// First header token
    Capacity,
    /// Second header token, the number of keys that follow
    Count,
    /// 1-based key number
    Key(usize),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Capacity => write!(f, "cache capacity"),
            Field::Count => write!(f, "element count"),
            Field::Key(n) => write!(f, "key #{n}"),
        }
    }
}

/// Error types for trace parsing
#[derive(Debug, Error)]
pub enum TraceError {
    /// Underlying reader failed
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),

    /// Input ended before `field` was read
    #[error("invalid input: missing {field} (token {position})")]
    Missing {
        /// Expected field
        field: Field,
        /// 1-based token position
        position: usize,
    },

    /// Token at `position` does not parse as an integer
    #[error("invalid input: {field} is not a valid integer: {token:?} (token {position})")]
    Invalid {
        /// Expected field
        field: Field,
        /// 1-based token position
        position: usize,
        /// Offending token text
        token: String,
    },
}

/// Splits a reader into whitespace-separated tokens, one line at a time.
struct Tokens<R> {
    reader: R,
    line: Vec<String>,
    cursor: usize,
    position: usize,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            cursor: 0,
            position: 0,
        }
    }

    /// Next token, or `None` at end of input
    fn next_token(&mut self) -> io::Result<Option<String>> {
        while self.cursor >= self.line.len() {
            let mut buf = String::new();
            if self.reader.read_line(&mut buf)? == 0 {
                return Ok(None);
            }
            self.line = buf.split_whitespace().map(str::to_owned).collect();
            self.cursor = 0;
        }
        let token = std::mem::take(&mut self.line[self.cursor]);
        self.cursor += 1;
        self.position += 1;
        Ok(Some(token))
    }

    /// Drop whatever is left of the current line
    fn discard_line(&mut self) {
        self.cursor = self.line.len();
    }
}

/// Reader for trace text
pub struct TraceReader;

impl TraceReader {
    /// Parse a trace held in memory
    pub fn parse(text: &str) -> Result<Trace, TraceError> {
        Self::read(text.as_bytes())
    }

    /// Read a trace from a file
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Trace, TraceError> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Read a trace, failing on the first missing or malformed token
    pub fn read<R: BufRead>(reader: R) -> Result<Trace, TraceError> {
        let mut tokens = Tokens::new(reader);

        let capacity = Self::expect::<usize, _>(&mut tokens, Field::Capacity)?;
        let count = Self::expect::<usize, _>(&mut tokens, Field::Count)?;

        let mut keys = Vec::with_capacity(count.min(1 << 20));
        for n in 1..=count {
            keys.push(Self::expect::<i64, _>(&mut tokens, Field::Key(n))?);
        }

        tracing::debug!(capacity, count, "parsed trace");
        Ok(Trace { capacity, keys })
    }

    /// Read a trace, reprompting on `prompt` whenever a token is malformed.
    ///
    /// A bad header discards the rest of its line and asks for both numbers
    /// again. A bad key discards the rest of its line and asks for that key
    /// again. Running out of input before the trace is complete is an error.
    pub fn read_interactive<R: BufRead, W: Write>(
        reader: R,
        mut prompt: W,
    ) -> Result<Trace, TraceError> {
        let mut tokens = Tokens::new(reader);

        let (capacity, count) = loop {
            let header = Self::expect::<usize, _>(&mut tokens, Field::Capacity).and_then(|capacity| {
                let count = Self::expect::<usize, _>(&mut tokens, Field::Count)?;
                Ok((capacity, count))
            });
            match header {
                Ok(header) => break header,
                Err(TraceError::Invalid { .. }) => {
                    tokens.discard_line();
                    write!(prompt, "Error: enter two valid integers: ")?;
                    prompt.flush()?;
                }
                Err(err) => return Err(err),
            }
        };

        let mut keys = Vec::with_capacity(count.min(1 << 20));
        for n in 1..=count {
            loop {
                match Self::expect::<i64, _>(&mut tokens, Field::Key(n)) {
                    Ok(key) => {
                        keys.push(key);
                        break;
                    }
                    Err(TraceError::Invalid { .. }) => {
                        tokens.discard_line();
                        write!(prompt, "Error: enter valid integer #{n}: ")?;
                        prompt.flush()?;
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        Ok(Trace { capacity, keys })
    }

    fn expect<T, R>(tokens: &mut Tokens<R>, field: Field) -> Result<T, TraceError>
    where
        T: std::str::FromStr,
        R: BufRead,
    {
        let token = tokens.next_token()?.ok_or(TraceError::Missing {
            field,
            position: tokens.position + 1,
        })?;
        token.parse::<T>().map_err(|_| TraceError::Invalid {
            field,
            position: tokens.position,
            token,
        })
    }
}
