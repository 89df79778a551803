//! # Command Contract
//!
//! Every command implements [`Command`]: usage text, help text and `run`.
//! Commands that want declarative option parsing implement
//! [`ArgumentCommand`] instead and get `Command` through a blanket impl.
//!
//! ## Key Types
//!
//! - [`CommandType`] - Name, description and constructor of a command
//! - [`Context`] - Back-reference to the manager plus the output sink
//! - [`ArgumentParser`] / [`OptionSpec`] - The option schema and its parser
//! - [`ParsedOptions`] - Parse results keyed by destination name

mod arguments;
mod base;
mod parser;

pub use arguments::{ArgumentCommand, Arguments};
pub use base::{Command, CommandType, Context, Describe};
pub use parser::{ArgumentParser, Arity, OptionSpec, ParsedOptions, Value};
