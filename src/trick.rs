//! The versioned transform at the heart of the scheme.

use thiserror::Error;

/// The default magic trick version.
pub const DEFAULT_VERSION: u32 = 0;

/// A configuration error in [`trick`].
///
/// These are never silently coerced: an unsupported version is a caller
/// mistake and surfaces as an `Err`, in contrast to malformed identifiers
/// which are ordinary `false` results.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TrickError {
    #[error("version 1 magic tricks are not supported yet")]
    Unimplemented,
    #[error("invalid magic trick version: {0}")]
    InvalidVersion(u32),
}

/// Combines `value` and `magic` into a check value.
///
/// Version 0 is a plain XOR mask, which makes it self-inverse in both
/// arguments: `trick(trick(v, m, 0), m, 0) == v` recovers the value, and
/// `trick(v, trick(v, m, 0), 0) == m` recovers the magic number. Version 1
/// is reserved for a transform without the second property.
///
/// The transform is closed over the value's bit width: the output occupies
/// no more bits than the wider of its inputs.
pub fn trick(value: u64, magic: u64, version: u32) -> Result<u64, TrickError> {
    match version {
        0 => Ok(value ^ magic),
        1 => Err(TrickError::Unimplemented),
        n => Err(TrickError::InvalidVersion(n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_zero_is_self_inverse() {
        for (value, magic) in [
            (0, 0),
            (0xf2ac57d8e3e55d4, 123),
            (u64::MAX, 0xdead_beef),
            (1 << 59, (1 << 60) - 1),
        ] {
            let check = trick(value, magic, 0).unwrap();
            assert_eq!(trick(check, magic, 0), Ok(value));
            assert_eq!(trick(value, check, 0), Ok(magic));
        }
    }

    #[test]
    fn version_zero_known_values() {
        assert_eq!(trick(0b1100, 0b1010, 0), Ok(0b0110));
        assert_eq!(trick(0xf2ac57d8e3e55d4, 123, 0), Ok(0xf2ac57d8e3e55af));
    }

    #[test]
    fn unsupported_versions_fail() {
        assert_eq!(trick(1, 2, 1), Err(TrickError::Unimplemented));
        assert_eq!(trick(1, 2, 2), Err(TrickError::InvalidVersion(2)));
        assert_eq!(trick(1, 2, u32::MAX), Err(TrickError::InvalidVersion(u32::MAX)));
    }
}
