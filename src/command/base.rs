//! Base command contract

use crate::cli::{Manager, Output};
use crate::error::{Error, Result};

/// Everything a running command can reach besides its own arguments
pub struct Context<'a> {
    /// The manager that dispatched the command
    pub manager: &'a Manager,

    /// Where the command prints its output
    pub output: &'a dyn Output,
}

impl<'a> Context<'a> {
    pub fn new(manager: &'a Manager, output: &'a dyn Output) -> Self {
        Self { manager, output }
    }
}

/// A registrable command type
///
/// The manager keeps the type, not an instance: [`CommandType::create`] is
/// called for every invocation and the instance is dropped afterwards.
pub trait CommandType: Sized + 'static {
    /// Name the command is invoked by. Unique within a manager.
    const NAME: &'static str;

    /// Descriptive text shown in full usage and default help
    const DESCRIPTION: &'static str;

    /// Builds a fresh instance bound to the given manager
    fn create(manager: &Manager) -> Self;
}

/// Name and description of a command instance
pub trait Describe {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
}

impl<T: CommandType> Describe for T {
    fn name(&self) -> &'static str {
        T::NAME
    }

    fn description(&self) -> &'static str {
        T::DESCRIPTION
    }
}

/// The behaviour every command provides
pub trait Command: Describe {
    /// Usage text for the command, without the program or command name
    fn usage(&self) -> String {
        String::new()
    }

    /// Help text printed after the usage line by `help`
    fn help(&self) -> String {
        self.description().trim().to_string()
    }

    /// Runs the command. `args[0]` is the command name.
    ///
    /// Returning `Some(code)` overrides the success exit code.
    fn run(&mut self, ctx: &Context<'_>, args: &[String]) -> Result<Option<i32>> {
        let _ = (ctx, args);
        Err(Error::command("Command not implemented."))
    }
}
