//! Clank - a minimal command dispatch framework
//!
//! Register named commands with a [`Manager`], then hand it the process
//! command line. The manager resolves the first argument to a command,
//! runs it, prints usage or help when asked and turns command errors into
//! an exit code.
//!
//! ```no_run
//! use clank::{HelpCommand, Manager, UsageCommand};
//!
//! let mut manager = Manager::new();
//! manager.register::<UsageCommand>().register::<HelpCommand>();
//! std::process::exit(manager.run_from_env());
//! ```

pub mod error;
pub mod command;
pub mod cli;

pub use cli::{Capture, Console, HelpCommand, Manager, Output, UsageCommand};
pub use command::{
    ArgumentCommand, ArgumentParser, Arguments, Arity, Command, CommandType, Context, Describe,
    OptionSpec, ParsedOptions, Value,
};
pub use error::{Error, ErrorKind, Result};
