//! Typed views over raw trace lines: the digit-width header, modulus
//! declarations, and operation records.

use num_bigint::BigUint;

use crate::digits;
use crate::trace::TraceError;

/// Substrings that together identify the digit-size header among the
/// producer's banner lines.
const WIDTH_DECL_MARKER: &str = "sizeof(Bignum<";
const WIDTH_FIELD_MARKER: &str = "::Digit";
const WIDTH_UNIT_MARKER: &str = "bytes";

/// Prefix of a working-modulus declaration.
const MODULUS_MARKER: &str = "Modulo";

/// The operators a result line may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    ModExp,
}

impl Op {
    /// Maps a result line's operator token. Anything outside the closed set is
    /// a malformed trace, not a record to skip.
    pub fn from_token(token: &str) -> Result<Self, TraceError> {
        match token {
            "+" => Ok(Self::Add),
            "-" => Ok(Self::Sub),
            "*" => Ok(Self::Mul),
            "/" => Ok(Self::Div),
            "mod_exp" => Ok(Self::ModExp),
            _ => Err(TraceError::UnknownOperator {
                token: token.to_string(),
            }),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::ModExp => "mod_exp",
        }
    }
}

/// Returns `Ok(Some(width))` if `line` is the digit-size header, `Ok(None)` if
/// it is some other line. A header-shaped line whose byte count cannot be read
/// (or is zero) is malformed.
pub fn parse_digit_width(line: &str) -> Result<Option<usize>, TraceError> {
    if !(line.contains(WIDTH_DECL_MARKER)
        && line.contains(WIDTH_FIELD_MARKER)
        && line.contains(WIDTH_UNIT_MARKER))
    {
        return Ok(None);
    }

    let malformed = || TraceError::BadDigitWidth {
        line: line.to_string(),
    };
    let cleaned: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    let eq = cleaned.find('=').ok_or_else(&malformed)?;
    let unit = cleaned.find(WIDTH_UNIT_MARKER).ok_or_else(&malformed)?;
    if eq + 1 > unit {
        return Err(malformed());
    }
    let width: usize = cleaned[eq + 1..unit].parse().map_err(|_| malformed())?;
    if width == 0 {
        return Err(malformed());
    }
    Ok(Some(width))
}

/// True for the line declaring the working modulus.
pub fn is_modulus_line(line: &str) -> bool {
    line.starts_with(MODULUS_MARKER)
}

/// One verified step: two operands, the library's claimed result, and the
/// operator recovered from the result line's second token. Raw lines are kept
/// for diagnostics.
#[derive(Debug)]
pub struct Operation {
    pub a: BigUint,
    pub b: BigUint,
    pub claimed: BigUint,
    pub op: Op,
    pub a_raw: String,
    pub b_raw: String,
    pub c_raw: String,
}

impl Operation {
    pub fn from_lines(
        a_raw: String,
        b_raw: String,
        c_raw: String,
        width: usize,
    ) -> Result<Self, TraceError> {
        let a = digits::decode(&a_raw, width)?;
        let b = digits::decode(&b_raw, width)?;
        let claimed = digits::decode(&c_raw, width)?;
        let token = c_raw
            .split_whitespace()
            .nth(1)
            .ok_or_else(|| TraceError::MissingOperator {
                line: c_raw.clone(),
            })?;
        let op = Op::from_token(token)?;
        Ok(Self {
            a,
            b,
            claimed,
            op,
            a_raw,
            b_raw,
            c_raw,
        })
    }
}
