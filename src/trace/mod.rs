//! Reading and interpretation of the trace emitted by the library under test.
//!
//! The trace is line-oriented with no record framing: the reader pulls trimmed
//! lines and flags the end-of-trace sentinels, the record layer turns lines into
//! typed values.

pub mod reader;
pub mod record;

use num_bigint::ParseBigIntError;
use thiserror::Error;

/// Failures that make the trace unusable.
///
/// Verification mismatches are not errors at this level; the verifier counts and
/// reports those while the run continues.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read from the trace")]
    Io(#[from] std::io::Error),
    #[error("no bracketed digit array in {line:?}")]
    MissingBrackets { line: String },
    #[error("invalid digit {token:?}")]
    BadDigit {
        token: String,
        #[source]
        source: ParseBigIntError,
    },
    #[error("unreadable digit width in {line:?}")]
    BadDigitWidth { line: String },
    #[error("operation line {line:?} carries no operator")]
    MissingOperator { line: String },
    #[error("unknown operator {token:?}")]
    UnknownOperator { token: String },
}
