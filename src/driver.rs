//! Central plumbing between CLI tokens and the library.

use thiserror::Error;

use magic_guid::{
    SelfTestError, TrickError,
    entropy::{self, SOURCE_BITS},
    guid::Codec,
    trick::trick,
    validate,
};

use crate::cli::{self, Command, TokenError};

/// The public result type of the [`driver`] module.
///
/// [`driver`]: self
pub type Result<T = Outcome> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Token(#[from] TokenError),
    #[error("{0}")]
    Trick(#[from] TrickError),
    #[error("{0}")]
    SelfTest(#[from] SelfTestError),
}

/// How a successful run reports through the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Exit 0: every command ran, and any boolean result was true.
    Success,
    /// Exit 1: a boolean result was false, or no tokens were given.
    Failure,
}

/// Per-invocation configuration state.
///
/// The magic number and trick version are the only mutable state in the
/// program, written by `magic=`/`version=` tokens and read by the
/// operations that follow them. A default magic number is drawn once, the
/// first time an operation needs one, and retained for the rest of the
/// invocation.
#[derive(Debug, Default)]
struct Session {
    magic: Option<u64>,
    version: u32,
}

impl Session {
    fn magic(&mut self) -> u64 {
        *self
            .magic
            .get_or_insert_with(|| entropy::draw(SOURCE_BITS))
    }

    /// A codec for `explicit` if given, otherwise for the session magic
    /// number.
    fn codec(&mut self, explicit: Option<u64>) -> Codec {
        let magic = match explicit {
            Some(magic) => magic,
            None => self.magic(),
        };

        Codec::new(magic).with_version(self.version)
    }
}

/// Evaluates the given tokens left to right.
///
/// `check` and `same` convert their boolean result into the outcome and end
/// the run immediately; every other command prints its result (if any) and
/// continues with the next token.
pub fn run(tokens: &[String]) -> Result {
    if tokens.is_empty() {
        eprintln!("{}", cli::SYNTAX);
        return Ok(Outcome::Failure);
    }

    let mut session = Session::default();

    for token in tokens {
        match Command::parse(token)? {
            Command::Help => {
                println!("{}", cli::HELP);
                return Ok(Outcome::Success);
            }
            Command::Version => {
                println!("{}", env!("CARGO_PKG_VERSION"));
                return Ok(Outcome::Success);
            }
            Command::Validate => {
                validate()?;
                return Ok(Outcome::Success);
            }
            Command::SetVersion(version) => session.version = version,
            Command::SetMagic(magic) => session.magic = Some(magic),
            Command::Gen { bits } => {
                println!("{}", entropy::draw(bits.unwrap_or(SOURCE_BITS)));
            }
            Command::Trick { value, magic, version } => {
                let magic = match magic {
                    Some(magic) => magic,
                    None => session.magic(),
                };
                let version = version.unwrap_or(session.version);
                println!("{}", trick(value, magic, version)?);
            }
            Command::Random { magic } => {
                println!("{}", session.codec(magic).generate()?);
            }
            Command::Check { guid, magic } => {
                return match session.codec(magic).check(&guid)? {
                    true => Ok(Outcome::Success),
                    false => Ok(Outcome::Failure),
                };
            }
            Command::Same { a, b } => {
                return match session.codec(None).same(&a, &b)? {
                    true => Ok(Outcome::Success),
                    false => Ok(Outcome::Failure),
                };
            }
        }
    }

    Ok(Outcome::Success)
}
