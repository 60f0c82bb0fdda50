//! The magic GUID codec and comparator.
//!
//! # Bit Layout
//! A magic GUID is the canonical 36-character 8-4-4-4-12 hyphenated hex
//! form, carrying two 60-bit values plus two marker nibbles:
//!
//! ```text
//! ssssssss-ssss-4sss-Nccc-cccccccccccc
//! ```
//!
//! The fifteen `s` digits are the random source value and the fifteen `c`
//! digits are its trick-transformed check value. The literal `4` is the
//! UUID version marker, and `N` is the UUID variant marker, computed as
//! `(top_nibble_of(check) & 0b11) + 8` so that it always lands in `[89ab]`.
//! Both markers are discarded on decode; the packing is otherwise bit-exact,
//! so parsing and re-rendering a GUID reproduces it byte for byte.

use std::fmt;

use winnow::{
    PResult, Parser,
    combinator::preceded,
    token::{one_of, take_while},
};

use crate::{
    entropy::{self, SOURCE_BITS},
    trick::{DEFAULT_VERSION, TrickError, trick},
};

const SOURCE_MASK: u64 = (1 << SOURCE_BITS) - 1;

/// A decoded magic GUID: a 60-bit source value and its 60-bit check value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Guid {
    source: u64,
    check: u64,
}

impl Guid {
    /// Packs a source/check pair, truncating each to 60 bits.
    pub fn new(source: u64, check: u64) -> Guid {
        Guid {
            source: source & SOURCE_MASK,
            check: check & SOURCE_MASK,
        }
    }

    /// Parses the canonical hyphenated form.
    ///
    /// Yields `None` for any structural failure: wrong field count or
    /// length, a non-hex digit, a version marker other than `4`, or a
    /// variant marker outside `[89ab]`. Hex digits and the variant marker
    /// are accepted case-insensitively.
    pub fn parse(input: &str) -> Option<Guid> {
        fields.parse(input).ok()
    }

    pub fn source(&self) -> u64 {
        self.source
    }

    pub fn check(&self) -> u64 {
        self.check
    }

    /// The variant marker nibble, always one of `8`, `9`, `a`, or `b`.
    fn variant(&self) -> u64 {
        ((self.check >> 56) & 0b11) + 8
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let src = format!("{:015x}", self.source);
        let chk = format!("{:015x}", self.check);
        write!(
            f,
            "{}-{}-4{}-{:x}{}-{}",
            &src[0..8],
            &src[8..12],
            &src[12..15],
            self.variant(),
            &chk[0..3],
            &chk[3..15],
        )
    }
}

/// Parses `DIGITS` hex digits as a single big-endian value.
fn hex_value<const DIGITS: usize>(input: &mut &str) -> PResult<u64> {
    take_while(DIGITS, |c: char| c.is_ascii_hexdigit())
        .parse_next(input)
        .map(|digits| {
            // SAFETY: digits is exactly DIGITS hexadecimal digits, and every
            // caller uses DIGITS <= 12, so the value fits in a u64
            unsafe { u64::from_str_radix(digits, 16).unwrap_unchecked() }
        })
}

fn fields(input: &mut &str) -> PResult<Guid> {
    let (f1, f2, f3) = (
        hex_value::<8>,
        preceded('-', hex_value::<4>),
        preceded(('-', '4'), hex_value::<3>),
    )
        .parse_next(input)?;

    let _variant = preceded('-', one_of(['8', '9', 'a', 'b', 'A', 'B']))
        .parse_next(input)?;

    let (c1, c2) = (hex_value::<3>, preceded('-', hex_value::<12>))
        .parse_next(input)?;

    Ok(Guid {
        source: (f1 << 28) | (f2 << 12) | f3,
        check: (c1 << 48) | c2,
    })
}

/// An encoder/verifier configured with a magic number and a trick version.
///
/// This carries what the operations need explicitly instead of holding it in
/// process-wide state; construct one per magic number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    magic: u64,
    version: u32,
}

impl Codec {
    /// A codec for the given magic number, using the default trick version.
    pub fn new(magic: u64) -> Codec {
        Codec {
            magic,
            version: DEFAULT_VERSION,
        }
    }

    /// A codec with a freshly drawn 60-bit magic number.
    pub fn from_entropy() -> Codec {
        Codec::new(entropy::draw(SOURCE_BITS))
    }

    /// Replaces the trick version.
    pub fn with_version(mut self, version: u32) -> Codec {
        self.version = version;
        self
    }

    pub fn magic(&self) -> u64 {
        self.magic
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Generates a fresh magic GUID.
    pub fn generate(&self) -> Result<Guid, TrickError> {
        let source = entropy::draw(SOURCE_BITS);
        let check = trick(source, self.magic, self.version)?;
        Ok(Guid { source, check })
    }

    /// Checks whether `candidate` was generated with this codec's magic
    /// number.
    ///
    /// Malformed input is an ordinary `Ok(false)`, never an error;
    /// verification of attacker-controlled strings must not fail. An `Err`
    /// only reports a trick configuration problem.
    pub fn check(&self, candidate: &str) -> Result<bool, TrickError> {
        match Guid::parse(candidate) {
            None => Ok(false),
            Some(guid) => {
                Ok(trick(guid.source, self.magic, self.version)? == guid.check)
            }
        }
    }

    /// Checks whether `a` and `b` were generated with the same magic
    /// number, whatever it is.
    ///
    /// The magic number implied by `a` is recovered through the trick's
    /// self-inverse property and used to verify `b`; it stays an internal
    /// intermediate and is never exposed. This codec's own magic number
    /// plays no part, only its trick version.
    pub fn same(&self, a: &str, b: &str) -> Result<bool, TrickError> {
        let Some(guid) = Guid::parse(a) else {
            return Ok(false);
        };

        let recovered = trick(guid.source, guid.check, self.version)?;
        Codec::new(recovered).with_version(self.version).check(b)
    }
}
