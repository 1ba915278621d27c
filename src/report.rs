//! Human-readable output for a verification run. The reporter only writes; it
//! never touches verifier state.

use std::io::{self, Write};

use num_bigint::BigUint;

use crate::digits;
use crate::trace::record::Operation;
use crate::verifier::{Completion, Outcome};

pub struct Reporter<W> {
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Operation counter, rewritten in place on a single line.
    pub fn progress(&mut self, count: u64) -> io::Result<()> {
        write!(self.out, " {count}\r")?;
        self.out.flush()
    }

    /// Full diagnostic block for one mismatch: the raw lines as the library
    /// printed them, then their interpretation and the corrected result.
    pub fn mismatch(
        &mut self,
        op: &Operation,
        modulus_raw: &str,
        modulus: &BigUint,
        expected: &BigUint,
        width: usize,
    ) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Operation FAILED!")?;
        writeln!(self.out, "Library output:")?;
        writeln!(self.out, "{}", op.a_raw)?;
        writeln!(self.out, "{}", op.b_raw)?;
        writeln!(self.out, "{}", op.c_raw)?;
        writeln!(self.out, "{modulus_raw}")?;
        writeln!(self.out, "Interpretation:")?;
        writeln!(self.out, "a = {}", op.a)?;
        writeln!(self.out, "b = {}", op.b)?;
        writeln!(self.out, "a {} b = {}", op.op.symbol(), op.claimed)?;
        writeln!(self.out, "mod = {modulus}")?;
        writeln!(self.out, "correct result = {expected}")?;
        writeln!(
            self.out,
            "correct result in array form = {}",
            digits::encode(expected, width)
        )
    }

    /// Final line of every run, plus a note when the run ended early.
    pub fn summary(&mut self, outcome: &Outcome) -> io::Result<()> {
        writeln!(self.out)?;
        match outcome.completion {
            Completion::Finished => {}
            Completion::MissingHeader => {
                writeln!(self.out, "No digit-size header found; no operations verified.")?;
            }
            Completion::MissingModulus => {
                writeln!(self.out, "No modulus declaration found; no operations verified.")?;
            }
            Completion::TruncatedRecord => {
                writeln!(self.out, "Trace ended inside an operation record.")?;
            }
        }
        writeln!(
            self.out,
            "Verification done with {} errors.",
            outcome.errors
        )
    }
}
