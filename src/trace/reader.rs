//! Line source for the trace: a single forward pass with sentinel detection.

use std::io::BufRead;

use crate::trace::TraceError;

/// Closing sentinel printed by the library under test after its last record.
const END_SENTINEL: &str = "Done!";

/// One pull from the trace.
#[derive(Debug, PartialEq, Eq)]
pub enum Signal {
    /// A trimmed, non-empty line.
    Line(String),
    /// The sentinel, a blank line, or end of input. Terminal: once returned,
    /// the reader yields nothing further of interest.
    End,
}

/// Pulls successive logical lines out of the trace. Not restartable.
pub struct TraceReader<R> {
    source: R,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Reads the next line, trimming trailing whitespace. Leading whitespace is
    /// preserved; the digit decoder ignores it anyway.
    pub fn next_line(&mut self) -> Result<Signal, TraceError> {
        let mut raw = String::new();
        if self.source.read_line(&mut raw)? == 0 {
            return Ok(Signal::End);
        }
        let line = raw.trim_end();
        if line.is_empty() || line == END_SENTINEL {
            return Ok(Signal::End);
        }
        Ok(Signal::Line(line.to_string()))
    }
}
