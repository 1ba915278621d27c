//! The verification state machine: replays every operation record against
//! trusted arbitrary-precision arithmetic and counts disagreements.

use std::io::{BufRead, Write};

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::digits;
use crate::report::Reporter;
use crate::trace::TraceError;
use crate::trace::reader::{Signal, TraceReader};
use crate::trace::record::{self, Op, Operation};

/// How a verification run reached its terminal state.
///
/// Every variant ends the run with whatever tally has accumulated; none of
/// them abort, matching the producer's habit of stopping mid-stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Sentinel or end of input between records.
    Finished,
    /// The trace ended before a digit-size header was seen.
    MissingHeader,
    /// The trace ended before the initial modulus declaration.
    MissingModulus,
    /// The trace ended inside an operation record.
    TruncatedRecord,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub operations: u64,
    pub errors: u64,
    pub completion: Completion,
}

impl Outcome {
    /// True when the run never got as far as a single operation record.
    pub fn nothing_verified(&self) -> bool {
        matches!(
            self.completion,
            Completion::MissingHeader | Completion::MissingModulus
        )
    }
}

/// Recomputes the value the library should have produced, reduced into
/// `[0, modulus)`.
///
/// Division uses the Fermat inverse `b^(m-2)`, which is only an inverse for
/// prime moduli; the trace gives no way to check primality, so a composite
/// modulus yields wrong expectations there. `mod_exp` is evaluated against the
/// modulus installed by its own trailing record, which the caller applies
/// before calling here.
pub fn expected_value(op: Op, a: &BigUint, b: &BigUint, modulus: &BigUint) -> BigUint {
    match op {
        Op::Add => (a + b) % modulus,
        Op::Sub => ((a % modulus) + (modulus - (b % modulus))) % modulus,
        Op::Mul => (a * b) % modulus,
        Op::Div => {
            let exponent = if modulus.bits() >= 2 {
                modulus - 2u32
            } else {
                BigUint::zero()
            };
            (a * b.modpow(&exponent, modulus)) % modulus
        }
        Op::ModExp => a.modpow(b, modulus),
    }
}

/// Walks the trace once, verifying each operation record.
///
/// Owns all mutable run state: the digit width fixed by the header, the
/// working modulus (replaced after every `mod_exp`), and the tallies.
pub struct TraceVerifier<R> {
    reader: TraceReader<R>,
    digit_width: usize,
    modulus: BigUint,
    modulus_raw: String,
    operations: u64,
    errors: u64,
}

impl<R: BufRead> TraceVerifier<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: TraceReader::new(source),
            digit_width: 0,
            modulus: BigUint::one(),
            modulus_raw: String::new(),
            operations: 0,
            errors: 0,
        }
    }

    /// Runs the state machine to completion. Consumes the verifier: the trace
    /// is a single forward pass and cannot be replayed.
    ///
    /// Mismatches are counted and reported, never returned as errors; `Err` is
    /// reserved for a malformed trace.
    pub fn run<W: Write>(mut self, reporter: &mut Reporter<W>) -> Result<Outcome, TraceError> {
        log::info!("searching for the digit-size header");
        loop {
            match self.reader.next_line()? {
                Signal::End => return Ok(self.outcome(Completion::MissingHeader)),
                Signal::Line(line) => {
                    if let Some(width) = record::parse_digit_width(&line)? {
                        self.digit_width = width;
                        break;
                    }
                }
            }
        }
        log::info!("digit size: {} bytes", self.digit_width);

        log::info!("searching for the working modulus");
        loop {
            match self.reader.next_line()? {
                Signal::End => return Ok(self.outcome(Completion::MissingModulus)),
                Signal::Line(line) => {
                    if record::is_modulus_line(&line) {
                        self.install_modulus(line)?;
                        break;
                    }
                }
            }
        }
        log::info!("modulus: {}", self.modulus);

        log::info!("verifying operations");
        loop {
            let Some(a_raw) = self.pull()? else {
                return Ok(self.outcome(Completion::Finished));
            };
            let Some(b_raw) = self.pull()? else {
                return Ok(self.outcome(Completion::TruncatedRecord));
            };
            let Some(c_raw) = self.pull()? else {
                return Ok(self.outcome(Completion::TruncatedRecord));
            };

            let op = Operation::from_lines(a_raw, b_raw, c_raw, self.digit_width)?;
            if op.op == Op::ModExp {
                // The trailing record becomes the working modulus for this
                // operation and everything after it.
                let Some(m_raw) = self.pull()? else {
                    return Ok(self.outcome(Completion::TruncatedRecord));
                };
                self.install_modulus(m_raw)?;
            }

            let expected = expected_value(op.op, &op.a, &op.b, &self.modulus);
            if expected != op.claimed {
                self.errors += 1;
                reporter.mismatch(
                    &op,
                    &self.modulus_raw,
                    &self.modulus,
                    &expected,
                    self.digit_width,
                )?;
            }

            self.operations += 1;
            reporter.progress(self.operations)?;
        }
    }

    fn pull(&mut self) -> Result<Option<String>, TraceError> {
        match self.reader.next_line()? {
            Signal::Line(line) => Ok(Some(line)),
            Signal::End => Ok(None),
        }
    }

    /// Declared moduli are one past the printed array value, both for the
    /// initial record and for every `mod_exp` replacement.
    fn install_modulus(&mut self, raw: String) -> Result<(), TraceError> {
        self.modulus = digits::decode(&raw, self.digit_width)? + 1u32;
        self.modulus_raw = raw;
        Ok(())
    }

    fn outcome(&self, completion: Completion) -> Outcome {
        Outcome {
            operations: self.operations,
            errors: self.errors,
            completion,
        }
    }
}
