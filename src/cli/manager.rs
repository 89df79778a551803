//! Command registry and dispatcher

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::path::Path;

use super::output::{Console, Output};
use crate::command::{Command, CommandType, Context};
use crate::error::{Error, ErrorKind, Result, FAILURE, SUCCESS};

/// A registered command type
#[derive(Clone, Copy)]
pub struct Registration {
    name: &'static str,
    description: &'static str,
    create: fn(&Manager) -> Box<dyn Command>,
}

impl Registration {
    fn of<C: CommandType + Command>() -> Self {
        fn create<C: CommandType + Command>(manager: &Manager) -> Box<dyn Command> {
            Box::new(C::create(manager))
        }

        Self {
            name: C::NAME,
            description: C::DESCRIPTION,
            create: create::<C>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Creates a fresh instance of the command
    pub fn instantiate(&self, manager: &Manager) -> Box<dyn Command> {
        (self.create)(manager)
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Maps command names to command types and dispatches invocations
#[derive(Debug)]
pub struct Manager {
    program: String,
    commands: BTreeMap<&'static str, Registration>,
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}

impl Manager {
    /// Creates an empty manager named after the running executable
    pub fn new() -> Self {
        let program = std::env::args_os()
            .next()
            .and_then(|arg0| {
                Path::new(&arg0)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

        Self {
            program,
            commands: BTreeMap::new(),
        }
    }

    /// Overrides the program name used in usage lines
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Registers a command type. A type registered under an existing name
    /// replaces the previous one.
    pub fn register<C: CommandType + Command>(&mut self) -> &mut Self {
        self.commands.insert(C::NAME, Registration::of::<C>());
        self
    }

    /// Registered command names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Looks up a registered command type
    pub fn get_command(&self, name: &str) -> Result<&Registration> {
        self.commands
            .get(name)
            .ok_or_else(|| Error::command(format!("Command not found: {}", name)))
    }

    /// Calls the command named by `args[0]` with the full argument list
    pub fn call(&self, args: &[String], output: &dyn Output) -> Result<Option<i32>> {
        let name = args.first().map(String::as_str).unwrap_or_default();
        let registration = self.get_command(name)?;

        output.verbose_ctx(
            "call",
            &format!("Dispatching '{}' with {} argument(s)", name, args.len().saturating_sub(1)),
        );

        let ctx = Context::new(self, output);
        registration.instantiate(self).run(&ctx, args)
    }

    /// Usage line for a command instance. Unless `brief`, the command's
    /// description follows on the next line.
    pub fn get_command_usage(&self, command: &dyn Command, brief: bool) -> String {
        let usage = format!("{} {} {}", self.program, command.name(), command.usage().trim());
        let usage = usage.trim_end();

        if brief {
            return usage.to_string();
        }

        format!("{}\n{}", usage, command.description().trim())
            .trim()
            .to_string()
    }

    /// Help text for a command instance: its usage line, then its help
    pub fn get_command_help(&self, command: &dyn Command) -> String {
        let usage = self.get_command_usage(command, true);
        format!("usage: {}\n{}", usage, command.help().trim())
            .trim()
            .to_string()
    }

    /// Usage text of a registered command
    pub fn get_usage(&self, name: &str, brief: bool) -> Result<String> {
        let command = self.get_command(name)?.instantiate(self);
        Ok(self.get_command_usage(command.as_ref(), brief))
    }

    /// Help text of a registered command
    pub fn get_help(&self, name: &str) -> Result<String> {
        let command = self.get_command(name)?.instantiate(self);
        Ok(self.get_command_help(command.as_ref()))
    }

    /// Runs the process's own command line against a quiet console
    pub fn run_from_env(&self) -> i32 {
        self.run_from_env_with(&Console::default())
    }

    /// Runs the process's own command line against `output`. Pass
    /// `Console::new(true)` to get verbose diagnostics on stderr.
    pub fn run_from_env_with(&self, output: &dyn Output) -> i32 {
        let argv: Vec<String> = std::env::args_os()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        self.run(&argv, output)
    }

    /// Runs a full argument vector (`argv[0]` is the program) and returns
    /// the process exit code.
    ///
    /// Command and argument errors are reported on `output` here and never
    /// escape; panics are not caught.
    pub fn run(&self, argv: &[String], output: &dyn Output) -> i32 {
        if argv.len() < 2 {
            output.print("not enough arguments");
            if let Err(err) = self.call(&["usage".to_string()], output) {
                output.error(&err.to_string());
            }
            return FAILURE;
        }

        let code = match self.call(&argv[1..], output) {
            Ok(code) => code.unwrap_or(SUCCESS),
            Err(err) => self.report(&argv[1], &err, output),
        };

        output.verbose_ctx("run", &format!("Exit code {}", code));
        code
    }

    fn report(&self, name: &str, err: &Error, output: &dyn Output) -> i32 {
        let mut cause = err.source();
        while let Some(inner) = cause {
            output.verbose_ctx("run", &format!("Caused by: {}", inner));
            cause = inner.source();
        }

        match err.kind() {
            ErrorKind::Argument => {
                match err.message().filter(|m| !m.is_empty()) {
                    Some(message) => output.print(message),
                    None => output.print("invalid arguments"),
                }
                match self.get_usage(name, true) {
                    Ok(usage) => output.print(&format!("usage: {}", usage)),
                    Err(lookup) => output.error(&lookup.to_string()),
                }
            }
            ErrorKind::Command => output.error(&err.to_string()),
        }

        err.retcode()
    }
}
