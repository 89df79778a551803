//! Built-in `usage` and `help` commands

use super::manager::Manager;
use crate::command::{Command, CommandType, Context};
use crate::error::{Error, Result};

/// Print usage text for one or all commands.
pub struct UsageCommand;

impl CommandType for UsageCommand {
    const NAME: &'static str = "usage";
    const DESCRIPTION: &'static str = "Print usage text for one or all commands.";

    fn create(_manager: &Manager) -> Self {
        UsageCommand
    }
}

impl Command for UsageCommand {
    fn usage(&self) -> String {
        "[COMMAND]".to_string()
    }

    fn run(&mut self, ctx: &Context<'_>, args: &[String]) -> Result<Option<i32>> {
        if args.len() > 2 {
            return Err(Error::argument("too many arguments"));
        }

        if let Some(name) = args.get(1) {
            ctx.output.print(&ctx.manager.get_usage(name, false)?);
        } else {
            for name in ctx.manager.names() {
                ctx.output.print(&ctx.manager.get_usage(name, true)?);
            }
        }

        Ok(None)
    }
}

/// Print help text for a command.
pub struct HelpCommand;

impl CommandType for HelpCommand {
    const NAME: &'static str = "help";
    const DESCRIPTION: &'static str = "Print help text for a command.";

    fn create(_manager: &Manager) -> Self {
        HelpCommand
    }
}

impl Command for HelpCommand {
    fn usage(&self) -> String {
        "COMMAND".to_string()
    }

    fn run(&mut self, ctx: &Context<'_>, args: &[String]) -> Result<Option<i32>> {
        match args.len() {
            0 | 1 => Err(Error::argument("not enough arguments")),
            2 => {
                ctx.output.print(&ctx.manager.get_help(&args[1])?);
                Ok(None)
            }
            _ => Err(Error::argument("too many arguments")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Capture;
    use crate::error::ErrorKind;

    fn manager() -> Manager {
        let mut manager = Manager::new().with_program("app");
        manager.register::<UsageCommand>().register::<HelpCommand>();
        manager
    }

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn usage_lists_all_commands_sorted() {
        let manager = manager();
        let output = Capture::new();
        let ctx = Context::new(&manager, &output);

        UsageCommand.run(&ctx, &args(&["usage"])).unwrap();

        assert_eq!(output.stdout(), "app help COMMAND\napp usage [COMMAND]\n");
    }

    #[test]
    fn usage_of_one_command_includes_description() {
        let manager = manager();
        let output = Capture::new();
        let ctx = Context::new(&manager, &output);

        UsageCommand.run(&ctx, &args(&["usage", "help"])).unwrap();

        assert_eq!(
            output.stdout(),
            "app help COMMAND\nPrint help text for a command.\n"
        );
    }

    #[test]
    fn usage_too_many_arguments() {
        let manager = manager();
        let output = Capture::new();
        let ctx = Context::new(&manager, &output);

        let err = UsageCommand
            .run(&ctx, &args(&["usage", "a", "b"]))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Argument);
        assert_eq!(err.to_string(), "too many arguments");
    }

    #[test]
    fn usage_of_unknown_command() {
        let manager = manager();
        let output = Capture::new();
        let ctx = Context::new(&manager, &output);

        let err = UsageCommand
            .run(&ctx, &args(&["usage", "nope"]))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Command);
        assert_eq!(err.to_string(), "Command not found: nope");
    }

    #[test]
    fn help_prints_usage_and_help() {
        let manager = manager();
        let output = Capture::new();
        let ctx = Context::new(&manager, &output);

        HelpCommand.run(&ctx, &args(&["help", "usage"])).unwrap();

        assert_eq!(
            output.stdout(),
            "usage: app usage [COMMAND]\nPrint usage text for one or all commands.\n"
        );
    }

    #[test]
    fn help_argument_count() {
        let manager = manager();
        let output = Capture::new();
        let ctx = Context::new(&manager, &output);

        let err = HelpCommand.run(&ctx, &args(&["help"])).unwrap_err();
        assert!(err.is_argument());
        assert_eq!(err.to_string(), "not enough arguments");

        let err = HelpCommand
            .run(&ctx, &args(&["help", "x", "y"]))
            .unwrap_err();
        assert!(err.is_argument());
        assert_eq!(err.to_string(), "too many arguments");

        assert!(output.stdout().is_empty());
    }

    #[test]
    fn end_to_end_without_command_name() {
        let output = Capture::new();
        let code = manager().run(&args(&["app"]), &output);

        assert_eq!(code, 1);
        assert_eq!(
            output.stdout(),
            "not enough arguments\napp help COMMAND\napp usage [COMMAND]\n"
        );
    }

    #[test]
    fn end_to_end_help_without_name_reprints_usage() {
        let output = Capture::new();
        let code = manager().run(&args(&["app", "help"]), &output);

        assert_eq!(code, 1);
        assert_eq!(
            output.stdout(),
            "not enough arguments\nusage: app help COMMAND\n"
        );
    }
}
