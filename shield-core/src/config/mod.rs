//! Configuration types
//!
//! Board-agnostic face configuration and the `face.toml` parser.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError, ParseErrorKind};
pub use types::*;
