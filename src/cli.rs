//! CLI definitions and token parsing.
//!
//! The command surface is a sequence of `KEY` or `KEY=VALUE` tokens rather
//! than conventional flags, so clap only collects the raw tokens; each one
//! is then parsed into a [`Command`] variant here, giving an exhaustive
//! closed set for the driver to match on.

use clap::Parser;
use thiserror::Error;

pub const SYNTAX: &str = "Syntax: mguid [OPTION ...]";

pub const HELP: &str = "\
Generate a GUID that conforms to a magic number

Syntax: mguid [OPTION ...]

Options
-------

  -h, --help, help          Display this help information
  -v, --version, version    Display the mguid version
  -V, --validate, validate  Run validation tests
  version=INT               Set the magic trick version (default 0)
  magic=INT                 Set the magic number (default: a random
                            60-bit integer, drawn once per invocation)
  gen[=BITS]                Print a random number of the given bit width
                            (default 60)
  trick=INT[,MAGIC[,VERSION]]
                            Print the check code for INT
  random[=MAGIC]            Print a magic random GUID
  check=GUID[,MAGIC]        Check whether a GUID is magic
  same=GUID,GUID            Check whether two GUIDs were generated with
                            the same magic number

Description
-----------

Magic GUIDs contain a pattern that is uniquely identifiable when the magic
number is known. `random` generates a version 4 GUID from the magic number;
if you know the number, `check` verifies that a GUID was generated with it.
Given two GUIDs, `same` verifies that they were generated with the same
magic number without revealing the number itself.

Boolean results are reported through the exit code: 0 for true, 1 for
false. Integer values are decimal, or hexadecimal with an `0x` prefix.

Examples
--------

    $ mguid random=123
    f2ac57d8-e3e5-45d4-bf2a-c57d8e3e55af

    $ mguid check=f2ac57d8-e3e5-45d4-bf2a-c57d8e3e55af,123 && echo ok
    ok

    $ mguid same=f2ac57d8-e3e5-45d4-bf2a-c57d8e3e55af,\\
            2f210452-75be-4d3b-a2f2-1045275bed40 && echo ok
    ok";

#[derive(Debug, Parser)]
#[command(
    name = "mguid",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Command tokens of the form `KEY` or `KEY=VALUE`, evaluated left to
    /// right.
    #[arg(value_name = "OPTION", allow_hyphen_values = true)]
    pub tokens: Vec<String>,
}

/// The closed set of command tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    Validate,
    SetVersion(u32),
    SetMagic(u64),
    Gen { bits: Option<u32> },
    Trick { value: u64, magic: Option<u64>, version: Option<u32> },
    Random { magic: Option<u64> },
    Check { guid: String, magic: Option<u64> },
    Same { a: String, b: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid command argument: '{0}'")]
    UnknownKey(String),
    #[error("invalid integer '{value}' in '{token}'")]
    BadInteger { token: String, value: String },
    #[error("missing value for '{0}'")]
    MissingValue(String),
    #[error("wrong number of values for '{0}'")]
    WrongArity(String),
}

impl Command {
    /// Parses a single argv token.
    pub fn parse(token: &str) -> Result<Command, TokenError> {
        let (key, value) = match token.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (token, None),
        };

        match (key, value) {
            ("-h" | "--help" | "help", None) => Ok(Command::Help),
            ("-v" | "--version" | "version", None) => Ok(Command::Version),
            ("-V" | "--validate" | "validate", None) => Ok(Command::Validate),
            ("version", Some(raw)) => {
                Ok(Command::SetVersion(parse_u32(token, raw)?))
            }
            ("magic", Some(raw)) => {
                Ok(Command::SetMagic(parse_u64(token, raw)?))
            }
            ("magic", None) => {
                Err(TokenError::MissingValue(token.into()))
            }
            ("gen", None) => Ok(Command::Gen { bits: None }),
            ("gen", Some(raw)) => Ok(Command::Gen {
                bits: Some(parse_u32(token, raw)?),
            }),
            ("trick", Some(raw)) => match split_values::<3>(token, raw)? {
                [Some(value), magic, version] => Ok(Command::Trick {
                    value: parse_u64(token, value)?,
                    magic: magic.map(|raw| parse_u64(token, raw)).transpose()?,
                    version: version
                        .map(|raw| parse_u32(token, raw))
                        .transpose()?,
                }),
                _ => Err(TokenError::MissingValue(token.into())),
            },
            ("trick", None) => Err(TokenError::MissingValue(token.into())),
            ("random", None) => Ok(Command::Random { magic: None }),
            ("random", Some(raw)) => Ok(Command::Random {
                magic: Some(parse_u64(token, raw)?),
            }),
            ("check", Some(raw)) => match split_values::<2>(token, raw)? {
                [Some(guid), magic] => Ok(Command::Check {
                    guid: guid.into(),
                    magic: magic.map(|raw| parse_u64(token, raw)).transpose()?,
                }),
                _ => Err(TokenError::MissingValue(token.into())),
            },
            ("check", None) => Err(TokenError::MissingValue(token.into())),
            ("same", Some(raw)) => match split_values::<2>(token, raw)? {
                [Some(a), Some(b)] => Ok(Command::Same {
                    a: a.into(),
                    b: b.into(),
                }),
                _ => Err(TokenError::WrongArity(token.into())),
            },
            ("same", None) => Err(TokenError::MissingValue(token.into())),
            _ => Err(TokenError::UnknownKey(token.into())),
        }
    }
}

/// Splits a comma-separated value list into at most `MAX` parts, padding
/// the tail with `None`.
fn split_values<'v, const MAX: usize>(
    token: &str,
    raw: &'v str,
) -> Result<[Option<&'v str>; MAX], TokenError> {
    let mut parts = [None; MAX];
    let mut values = raw.split(',');

    for slot in parts.iter_mut() {
        *slot = values.next();
    }

    match values.next() {
        Some(_) => Err(TokenError::WrongArity(token.into())),
        None => Ok(parts),
    }
}

fn parse_u64(token: &str, raw: &str) -> Result<u64, TokenError> {
    let parsed = match raw.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => raw.parse(),
    };

    parsed.map_err(|_| TokenError::BadInteger {
        token: token.into(),
        value: raw.into(),
    })
}

fn parse_u32(token: &str, raw: &str) -> Result<u32, TokenError> {
    parse_u64(token, raw)?
        .try_into()
        .map_err(|_| TokenError::BadInteger {
            token: token.into(),
            value: raw.into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_keywords() {
        for token in ["-h", "--help", "help"] {
            assert_eq!(Command::parse(token), Ok(Command::Help));
        }
        for token in ["-v", "--version", "version"] {
            assert_eq!(Command::parse(token), Ok(Command::Version));
        }
        for token in ["-V", "--validate", "validate"] {
            assert_eq!(Command::parse(token), Ok(Command::Validate));
        }
    }

    #[test]
    fn assignments() {
        assert_eq!(Command::parse("version=1"), Ok(Command::SetVersion(1)));
        assert_eq!(Command::parse("magic=123"), Ok(Command::SetMagic(123)));
        assert_eq!(
            Command::parse("magic=0xff"),
            Ok(Command::SetMagic(255))
        );
        assert_eq!(Command::parse("gen"), Ok(Command::Gen { bits: None }));
        assert_eq!(
            Command::parse("gen=16"),
            Ok(Command::Gen { bits: Some(16) })
        );
    }

    #[test]
    fn operations() {
        assert_eq!(
            Command::parse("random"),
            Ok(Command::Random { magic: None })
        );
        assert_eq!(
            Command::parse("random=123"),
            Ok(Command::Random { magic: Some(123) })
        );
        assert_eq!(
            Command::parse("trick=5,123,0"),
            Ok(Command::Trick {
                value: 5,
                magic: Some(123),
                version: Some(0),
            })
        );
        assert_eq!(
            Command::parse("trick=5"),
            Ok(Command::Trick {
                value: 5,
                magic: None,
                version: None,
            })
        );
        assert_eq!(
            Command::parse("check=some-guid,123"),
            Ok(Command::Check {
                guid: "some-guid".into(),
                magic: Some(123),
            })
        );
        assert_eq!(
            Command::parse("same=a,b"),
            Ok(Command::Same {
                a: "a".into(),
                b: "b".into(),
            })
        );
    }

    #[test]
    fn malformed_tokens() {
        assert_eq!(
            Command::parse("frobnicate=1"),
            Err(TokenError::UnknownKey("frobnicate=1".into()))
        );
        assert_eq!(
            Command::parse("magic"),
            Err(TokenError::MissingValue("magic".into()))
        );
        assert_eq!(
            Command::parse("magic=twelve"),
            Err(TokenError::BadInteger {
                token: "magic=twelve".into(),
                value: "twelve".into(),
            })
        );
        assert_eq!(
            Command::parse("same=a"),
            Err(TokenError::WrongArity("same=a".into()))
        );
        assert_eq!(
            Command::parse("same=a,b,c"),
            Err(TokenError::WrongArity("same=a,b,c".into()))
        );
        assert_eq!(
            Command::parse("trick=1,2,3,4"),
            Err(TokenError::WrongArity("trick=1,2,3,4".into()))
        );
    }
}
