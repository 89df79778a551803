//! Clank demo - dispatches a handful of sample commands

use std::process::ExitCode;

use clank::{
    ArgumentCommand, ArgumentParser, Arguments, Arity, CommandType, Context, HelpCommand, Manager,
    OptionSpec, ParsedOptions, Result, UsageCommand,
};

/// Greet someone.
struct GreetCommand {
    arguments: Arguments,
}

impl CommandType for GreetCommand {
    const NAME: &'static str = "greet";
    const DESCRIPTION: &'static str = "Greet someone.";

    fn create(manager: &Manager) -> Self {
        Self {
            arguments: Arguments::new::<Self>(manager),
        }
    }
}

impl ArgumentCommand for GreetCommand {
    fn add_arguments(parser: &mut ArgumentParser) {
        parser
            .add(
                OptionSpec::option("name")
                    .short('n')
                    .default_value("world")
                    .help("Who to greet"),
            )
            .add(
                OptionSpec::option("times")
                    .short('t')
                    .arity(Arity::Exactly(1))
                    .metavar("N")
                    .help("How many times to greet"),
            )
            .add(OptionSpec::switch("shout").help("Greet in capitals"));
    }

    fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    fn arguments_mut(&mut self) -> &mut Arguments {
        &mut self.arguments
    }

    fn execute(&mut self, ctx: &Context<'_>, options: &ParsedOptions) -> Result<Option<i32>> {
        let name = options.value("name").unwrap_or("world");
        let times: u32 = options.parse("times")?.unwrap_or(1);

        let mut greeting = format!("Hello, {}!", name);
        if options.flag("shout") {
            greeting = greeting.to_uppercase();
        }

        ctx.output
            .verbose_ctx("greet", &format!("Greeting {} {} time(s)", name, times));
        for _ in 0..times {
            ctx.output.print(&greeting);
        }

        Ok(None)
    }
}

/// Print arguments back.
struct EchoCommand {
    arguments: Arguments,
}

impl CommandType for EchoCommand {
    const NAME: &'static str = "echo";
    const DESCRIPTION: &'static str = "Print arguments back, unparsed.";

    fn create(manager: &Manager) -> Self {
        Self {
            arguments: Arguments::new::<Self>(manager),
        }
    }
}

impl ArgumentCommand for EchoCommand {
    fn add_arguments(parser: &mut ArgumentParser) {
        parser.add(OptionSpec::switch("json").help("Print parsed options as JSON"));
    }

    fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    fn arguments_mut(&mut self) -> &mut Arguments {
        &mut self.arguments
    }

    fn parse_known(&self) -> bool {
        true
    }

    fn execute(&mut self, ctx: &Context<'_>, options: &ParsedOptions) -> Result<Option<i32>> {
        let rest = self.arguments.rest();

        if options.flag("json") {
            ctx.output.data(&serde_json::json!({
                "options": options,
                "rest": rest,
            }));
        } else {
            ctx.output.print(&rest.join(" "));
        }

        Ok(None)
    }
}

fn main() -> ExitCode {
    let mut manager = Manager::new();
    manager
        .register::<UsageCommand>()
        .register::<HelpCommand>()
        .register::<GreetCommand>()
        .register::<EchoCommand>();

    ExitCode::from(clank::error::exit_status(manager.run_from_env()))
}
