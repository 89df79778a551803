//! Commands with a declared argument schema

use super::base::{Command, CommandType, Context};
use super::parser::{ArgumentParser, ParsedOptions};
use crate::cli::Manager;
use crate::error::Result;

/// Parser plus the results of the last parse
#[derive(Debug, Clone)]
pub struct Arguments {
    parser: ArgumentParser,
    options: Option<ParsedOptions>,
    rest: Option<Vec<String>>,
}

impl Arguments {
    /// Builds the parser for command `C`, running its
    /// [`ArgumentCommand::add_arguments`] hook once
    pub fn new<C: ArgumentCommand>(manager: &Manager) -> Self {
        let mut parser = ArgumentParser::new(format!("{} {}", manager.program(), C::NAME));
        C::add_arguments(&mut parser);

        Self {
            parser,
            options: None,
            rest: None,
        }
    }

    pub fn parser(&self) -> &ArgumentParser {
        &self.parser
    }

    /// Parses `args[1..]` into options.
    ///
    /// With `known` set, unrecognized tokens are kept aside (see
    /// [`Arguments::rest`]) instead of failing the parse. Options declared
    /// with a single-value arity are stored as scalars either way.
    pub fn parse(&mut self, args: &[String], known: bool) -> Result<&ParsedOptions> {
        let tokens = args.get(1..).unwrap_or_default();

        let mut options = if known {
            let (options, rest) = self.parser.parse_known(tokens)?;
            self.rest = Some(rest);
            options
        } else {
            self.parser.parse(tokens)?
        };
        options.normalize(self.parser.options());

        Ok(&*self.options.insert(options))
    }

    /// Options from the last successful parse
    pub fn options(&self) -> Option<&ParsedOptions> {
        self.options.as_ref()
    }

    /// Tokens left over by the last lenient parse
    pub fn rest(&self) -> &[String] {
        self.rest.as_deref().unwrap_or_default()
    }

    /// Usage derived from the generated usage line
    pub fn usage(&self) -> String {
        self.parser.usage()
    }

    /// Help derived from the generated help's options section
    pub fn help(&self) -> String {
        self.parser.help()
    }
}

/// A command whose arguments are described by an option schema
///
/// Implementors get [`Command`] for free: usage and help come from the
/// generated parser text, and `run` parses the arguments before calling
/// [`ArgumentCommand::execute`].
pub trait ArgumentCommand: CommandType {
    /// Declares the command's options. Declares none by default.
    fn add_arguments(parser: &mut ArgumentParser) {
        let _ = parser;
    }

    fn arguments(&self) -> &Arguments;

    fn arguments_mut(&mut self) -> &mut Arguments;

    /// Parse only recognized tokens and keep the rest
    fn parse_known(&self) -> bool {
        false
    }

    /// Runs after a successful parse with the normalized options. Any
    /// leftover tokens are in [`Arguments::rest`].
    fn execute(&mut self, ctx: &Context<'_>, options: &ParsedOptions) -> Result<Option<i32>> {
        let _ = (ctx, options);
        Ok(None)
    }
}

impl<T: ArgumentCommand> Command for T {
    fn usage(&self) -> String {
        self.arguments().usage()
    }

    fn help(&self) -> String {
        self.arguments().help()
    }

    fn run(&mut self, ctx: &Context<'_>, args: &[String]) -> Result<Option<i32>> {
        let known = self.parse_known();
        let options = self.arguments_mut().parse(args, known)?.clone();
        self.execute(ctx, &options)
    }
}
