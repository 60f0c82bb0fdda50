//! Internal-consistency self-test.

use thiserror::Error;

use crate::{guid::Codec, trick::TrickError};

const ROUNDS: usize = 10;

/// A violated self-test assertion.
///
/// Any of these signals a defect in the core transform itself and is meant
/// to abort the validation run, not to be recovered from.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelfTestError {
    #[error("check('{guid}') rejected an identifier made with its own magic number")]
    CheckRejectedOwn { guid: String },
    #[error("check('{guid}') accepted a corrupted identifier")]
    CheckAcceptedCorrupt { guid: String },
    #[error("same('{a}', '{b}') rejected identifiers sharing a magic number")]
    SameRejectedPair { a: String, b: String },
    #[error("same('{a}', '{b}') accepted identifiers with independent magic numbers")]
    SameAcceptedPair { a: String, b: String },
    #[error(transparent)]
    Trick(#[from] TrickError),
}

/// Exercises the encode/verify/compare contract for [`ROUNDS`] iterations.
///
/// Each round draws a fresh magic number and asserts that a generated
/// identifier verifies, that corrupting its final hex digit breaks
/// verification, that two identifiers from the same magic number compare as
/// same, and that an identifier from an independent magic number does not.
/// The first violation aborts the run with a descriptive error.
pub fn validate() -> Result<(), SelfTestError> {
    for _ in 0..ROUNDS {
        let codec = Codec::from_entropy();
        let m = codec.generate()?.to_string();
        let g = corrupt_last_digit(&m);
        let p = codec.generate()?.to_string();
        let q = Codec::from_entropy().generate()?.to_string();

        if !codec.check(&m)? {
            return Err(SelfTestError::CheckRejectedOwn { guid: m });
        }
        if codec.check(&g)? {
            return Err(SelfTestError::CheckAcceptedCorrupt { guid: g });
        }
        if !codec.same(&m, &p)? {
            return Err(SelfTestError::SameRejectedPair { a: m, b: p });
        }
        if codec.same(&p, &q)? {
            return Err(SelfTestError::SameAcceptedPair { a: p, b: q });
        }
    }

    Ok(())
}

/// Replaces the final hex digit `d` with `(d + 1) mod 16`, which always
/// changes it and therefore always changes the decoded check value.
fn corrupt_last_digit(guid: &str) -> String {
    let (head, last) = guid.split_at(guid.len() - 1);
    // the input is always a rendered Guid, so last is one hex digit
    let digit = u32::from_str_radix(last, 16).unwrap();
    format!("{head}{:x}", (digit + 1) % 16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corruption_wraps_around() {
        let guid = "f2ac57d8-e3e5-45d4-bf2a-c57d8e3e55af";
        assert_eq!(
            corrupt_last_digit(guid),
            "f2ac57d8-e3e5-45d4-bf2a-c57d8e3e55a0"
        );
        assert_eq!(
            corrupt_last_digit("f2ac57d8-e3e5-45d4-bf2a-c57d8e3e55a0"),
            "f2ac57d8-e3e5-45d4-bf2a-c57d8e3e55a1"
        );
    }

    #[test]
    fn validation_passes() {
        assert_eq!(validate(), Ok(()));
    }
}
