//! # Command-Line Dispatch
//!
//! The [`Manager`] maps command names to command types, runs the command
//! named on the command line and turns its errors into an exit code.
//!
//! ## Exit Codes
//!
//! | Outcome | Code |
//! |---------|------|
//! | Success | `0`, or the code the command returned |
//! | Missing command name | `1` |
//! | Command or argument error | the error's retcode (default `1`) |
//!
//! ## Output
//!
//! All text goes through an [`Output`] sink: [`Console`] for the process
//! streams, [`Capture`] to record it in tests.
//!
//! ## Built-in Commands
//!
//! - [`UsageCommand`] (`usage [COMMAND]`) - usage of one or every command
//! - [`HelpCommand`] (`help COMMAND`) - full help of a command

mod builtin;
mod manager;
mod output;

pub use builtin::{HelpCommand, UsageCommand};
pub use manager::{Manager, Registration};
pub use output::{Capture, Console, Output};
