//! Magic-number-bearing version 4 GUIDs.
//!
//! A magic GUID looks like any other version 4 GUID, but its bit pattern is
//! derived from a secret *magic number*: the low 60 bits carry a random
//! source value, and the high 60 bits carry that value passed through a
//! reversible transform keyed by the magic number. Anyone who knows the
//! magic number can verify that a GUID was generated with it, and anyone
//! holding two magic GUIDs can verify that they share a magic number without
//! ever learning what it is.
//!
//! This is a watermarking scheme, not a cryptographic one: the transform is
//! a bitwise mask, and anyone holding a single GUID *and* its source value
//! can recover the magic number.
//!
//! ```
//! use magic_guid::Codec;
//!
//! let codec = Codec::new(123);
//! let id = codec.generate()?.to_string();
//! assert!(codec.check(&id)?);
//! assert!(!Codec::new(456).check(&id)?);
//!
//! // two GUIDs from the same magic number compare equal without
//! // revealing the number itself
//! let other = codec.generate()?.to_string();
//! assert!(codec.same(&id, &other)?);
//! # Ok::<(), magic_guid::TrickError>(())
//! ```

pub mod entropy;
pub mod guid;
pub mod trick;
pub mod validate;

pub use guid::{Codec, Guid};
pub use trick::{TrickError, trick};
pub use validate::{SelfTestError, validate};
