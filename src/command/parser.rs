//! Declarative option schema and its clap-backed parser
//!
//! Commands describe their options with [`OptionSpec`]. The schema is owned
//! here and queried directly: arity normalization and lenient parsing both
//! walk the declared options instead of inspecting clap's internals.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::LazyLock;

use clap::builder::ValueRange;
use clap::{Arg, ArgAction, ArgMatches};
use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};

static USAGE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^usage:\s+\S+\s+\S+\s*").expect("Invalid usage prefix regex")
});

static OPTIONS_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Options:").expect("Invalid options heading regex"));

/// How many values an option or positional takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arity {
    /// One value, stored as a scalar
    #[default]
    Default,

    /// Exactly `n` values. `Exactly(1)` is still stored as a scalar.
    Exactly(usize),

    /// Any number of values, including none
    ZeroOrMore,

    /// At least one value
    OneOrMore,
}

impl Arity {
    /// True for arities whose parsed value is normalized down to a scalar
    pub fn is_single(self) -> bool {
        matches!(self, Arity::Default | Arity::Exactly(1))
    }

    /// Upper bound on the number of values, `None` if unbounded
    pub fn max_values(self) -> Option<usize> {
        match self {
            Arity::Default => Some(1),
            Arity::Exactly(n) => Some(n),
            Arity::ZeroOrMore | Arity::OneOrMore => None,
        }
    }

    fn value_range(self) -> ValueRange {
        match self {
            Arity::Default => ValueRange::new(1),
            Arity::Exactly(n) => ValueRange::new(n),
            Arity::ZeroOrMore => ValueRange::new(0..),
            Arity::OneOrMore => ValueRange::new(1..),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Option,
    Switch,
    Positional,
}

/// One declared option
#[derive(Debug, Clone)]
pub struct OptionSpec {
    dest: String,
    kind: Kind,
    long: Option<String>,
    short: Option<char>,
    arity: Arity,
    default: Vec<String>,
    required: bool,
    help: Option<String>,
    metavar: Option<String>,
}

impl OptionSpec {
    fn new(dest: impl Into<String>, kind: Kind) -> Self {
        let dest = dest.into();
        let long = match kind {
            Kind::Positional => None,
            Kind::Option | Kind::Switch => Some(dest.replace('_', "-")),
        };

        Self {
            dest,
            kind,
            long,
            short: None,
            arity: Arity::Default,
            default: Vec::new(),
            required: kind == Kind::Positional,
            help: None,
            metavar: None,
        }
    }

    /// An option taking values, e.g. `--name NAME`.
    ///
    /// The long flag defaults to `dest` with underscores turned into dashes.
    pub fn option(dest: impl Into<String>) -> Self {
        Self::new(dest, Kind::Option)
    }

    /// A store-true flag, e.g. `--verbose`
    pub fn switch(dest: impl Into<String>) -> Self {
        Self::new(dest, Kind::Switch)
    }

    /// A positional argument. Required unless marked otherwise.
    pub fn positional(dest: impl Into<String>) -> Self {
        Self::new(dest, Kind::Positional)
    }

    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    /// Adds a default value. Call repeatedly for a multi-value default.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default.push(value.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Placeholder shown for the value in usage and help
    pub fn metavar(mut self, metavar: impl Into<String>) -> Self {
        self.metavar = Some(metavar.into());
        self
    }

    pub fn dest(&self) -> &str {
        &self.dest
    }

    pub fn get_arity(&self) -> Arity {
        self.arity
    }

    pub fn is_switch(&self) -> bool {
        self.kind == Kind::Switch
    }

    pub fn is_positional(&self) -> bool {
        self.kind == Kind::Positional
    }

    fn to_arg(&self) -> Arg {
        let mut arg = Arg::new(self.dest.clone());

        if let Some(help) = &self.help {
            arg = arg.help(help.clone());
        }
        if self.kind != Kind::Positional {
            if let Some(long) = &self.long {
                arg = arg.long(long.clone());
            }
            if let Some(short) = self.short {
                arg = arg.short(short);
            }
        }

        if self.kind == Kind::Switch {
            return arg.action(ArgAction::SetTrue);
        }

        arg = arg
            .action(ArgAction::Set)
            .value_parser(clap::value_parser!(String))
            .num_args(self.arity.value_range())
            .value_name(self.value_name())
            .required(self.required);

        if !self.default.is_empty() {
            arg = arg.default_values(self.default.clone());
        }

        arg
    }

    fn value_name(&self) -> String {
        self.metavar
            .clone()
            .unwrap_or_else(|| self.dest.to_uppercase())
    }

    /// Matches a flag token against this spec. Returns whether the token
    /// already carries its value (`--name=x`, `-nx`).
    fn match_flag(&self, token: &str) -> Option<bool> {
        if self.kind == Kind::Positional {
            return None;
        }

        if let Some(rest) = token.strip_prefix("--") {
            let (name, inline) = match rest.split_once('=') {
                Some((name, _)) => (name, true),
                None => (rest, false),
            };
            return (self.long.as_deref() == Some(name)).then_some(inline);
        }

        let mut chars = token.chars().skip(1);
        let short = chars.next()?;
        let inline = chars.next().is_some();
        if self.short != Some(short) || (inline && self.kind == Kind::Switch) {
            return None;
        }
        Some(inline)
    }
}

/// A parsed option value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Not supplied and no default
    None,
    Flag(bool),
    Single(String),
    List(Vec<String>),
}

/// Parsed options keyed by destination name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParsedOptions {
    values: BTreeMap<String, Value>,
}

impl ParsedOptions {
    pub fn get(&self, dest: &str) -> Option<&Value> {
        self.values.get(dest)
    }

    /// The scalar value of an option, if it has one
    pub fn value(&self, dest: &str) -> Option<&str> {
        match self.values.get(dest) {
            Some(Value::Single(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// All values of an option. A scalar is returned as a one-element slice.
    pub fn values(&self, dest: &str) -> &[String] {
        match self.values.get(dest) {
            Some(Value::Single(value)) => std::slice::from_ref(value),
            Some(Value::List(values)) => values.as_slice(),
            _ => &[],
        }
    }

    /// Whether a switch was given
    pub fn flag(&self, dest: &str) -> bool {
        matches!(self.values.get(dest), Some(Value::Flag(true)))
    }

    /// Converts the scalar value of an option
    pub fn parse<T>(&self, dest: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let Some(raw) = self.value(dest) else {
            return Ok(None);
        };

        raw.parse().map(Some).map_err(|e| {
            Error::argument(format!("invalid value for {}: {}", dest, raw)).with_cause(e)
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(dest, value)| (dest.as_str(), value))
    }

    /// Collapses single-value options stored as a list down to a scalar.
    ///
    /// Only options declared with [`Arity::Default`] or `Arity::Exactly(1)`
    /// are touched; explicit multi-value arities keep their list.
    pub fn normalize(&mut self, schema: &[OptionSpec]) {
        for spec in schema {
            if !spec.arity.is_single() {
                continue;
            }
            if let Some(Value::List(list)) = self.values.get(&spec.dest) {
                if let Some(first) = list.first().cloned() {
                    self.values.insert(spec.dest.clone(), Value::Single(first));
                }
            }
        }
    }
}

/// Argument parser built from a declared option schema
#[derive(Debug, Clone)]
pub struct ArgumentParser {
    prog: String,
    options: Vec<OptionSpec>,
}

impl ArgumentParser {
    /// Creates a parser whose usage line starts with `prog`
    pub fn new(prog: impl Into<String>) -> Self {
        Self {
            prog: prog.into(),
            options: Vec::new(),
        }
    }

    pub fn prog(&self) -> &str {
        &self.prog
    }

    /// Declares an option. A second declaration with the same `dest`
    /// replaces the first.
    pub fn add(&mut self, spec: OptionSpec) -> &mut Self {
        match self.options.iter_mut().find(|o| o.dest == spec.dest) {
            Some(existing) => *existing = spec,
            None => self.options.push(spec),
        }
        self
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub fn spec(&self, dest: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.dest == dest)
    }

    fn command(&self) -> clap::Command {
        let deferred: Vec<&str> = self.deferred_positionals().map(|o| o.dest()).collect();

        self.options.iter().fold(
            clap::Command::new(self.prog.clone())
                .bin_name(self.prog.clone())
                .no_binary_name(true)
                .disable_help_flag(true)
                .disable_version_flag(true)
                .args_override_self(true),
            |cmd, spec| {
                let arg = spec.to_arg();
                if deferred.contains(&spec.dest()) {
                    cmd.arg(arg.required(false))
                } else {
                    cmd.arg(arg)
                }
            },
        )
    }

    /// Required positionals declared after an optional one. clap refuses
    /// that order, so they are handed to it as optional and checked after
    /// the parse.
    fn deferred_positionals(&self) -> impl Iterator<Item = &OptionSpec> {
        self.options
            .iter()
            .filter(|o| o.kind == Kind::Positional)
            .skip_while(|o| o.required)
            .filter(|o| o.required)
    }

    /// Parses every token strictly. Values are not normalized.
    pub fn parse(&self, args: &[String]) -> Result<ParsedOptions> {
        let matches = self.command().try_get_matches_from(args)?;
        let options = self.collect(&matches);

        let missing: Vec<String> = self
            .deferred_positionals()
            .filter(|o| matches!(options.get(&o.dest), None | Some(Value::None)))
            .map(|o| format!("<{}>", o.value_name()))
            .collect();
        if !missing.is_empty() {
            return Err(Error::argument(format!(
                "the following required arguments were not provided: {}",
                missing.join(" ")
            )));
        }

        Ok(options)
    }

    /// Parses the tokens this schema recognizes and returns the rest
    /// untouched, in their original order
    pub fn parse_known(&self, args: &[String]) -> Result<(ParsedOptions, Vec<String>)> {
        let (known, rest) = self.partition(args);
        let options = self.parse(&known)?;
        Ok((options, rest))
    }

    /// The generated usage line, e.g. `Usage: prog cmd [OPTIONS]`
    pub fn format_usage(&self) -> String {
        self.command().render_usage().to_string()
    }

    /// The generated full help text
    pub fn format_help(&self) -> String {
        self.command().render_help().to_string()
    }

    /// Usage without the leading `usage: <program> <command>`
    pub fn usage(&self) -> String {
        let usage = self.format_usage();
        USAGE_PREFIX.replace(usage.trim(), "").into_owned()
    }

    /// Help from the options section onwards; empty without options
    pub fn help(&self) -> String {
        let help = self.format_help();
        let lines: Vec<&str> = help
            .lines()
            .skip_while(|line| !OPTIONS_HEADING.is_match(line))
            .collect();
        lines.join("\n")
    }

    fn collect(&self, matches: &ArgMatches) -> ParsedOptions {
        let values = self
            .options
            .iter()
            .map(|spec| {
                let value = if spec.kind == Kind::Switch {
                    Value::Flag(matches.get_flag(&spec.dest))
                } else {
                    match matches.get_many::<String>(&spec.dest) {
                        Some(values) => Value::List(values.cloned().collect()),
                        None => Value::None,
                    }
                };
                (spec.dest.clone(), value)
            })
            .collect();

        ParsedOptions { values }
    }

    fn positional_capacity(&self) -> Option<usize> {
        self.options
            .iter()
            .filter(|o| o.kind == Kind::Positional)
            .try_fold(0usize, |total, o| o.arity.max_values().map(|n| total + n))
    }

    /// Splits tokens into those the schema recognizes and the rest
    fn partition(&self, args: &[String]) -> (Vec<String>, Vec<String>) {
        let mut known = Vec::new();
        let mut rest = Vec::new();
        let mut slots = self.positional_capacity();
        let mut after_separator = false;
        let mut tokens = args.iter().peekable();

        while let Some(token) = tokens.next() {
            if !after_separator && token == "--" {
                after_separator = true;
                known.push(token.clone());
                continue;
            }

            if after_separator || !looks_like_flag(token) {
                match slots {
                    Some(0) => rest.push(token.clone()),
                    Some(ref mut n) => {
                        *n -= 1;
                        known.push(token.clone());
                    }
                    None => known.push(token.clone()),
                }
                continue;
            }

            let matched = self
                .options
                .iter()
                .find_map(|spec| spec.match_flag(token).map(|inline| (spec, inline)));

            let Some((spec, inline)) = matched else {
                rest.push(token.clone());
                continue;
            };

            known.push(token.clone());
            if spec.kind != Kind::Option || inline {
                continue;
            }

            let limit = spec.arity.max_values();
            let mut taken = 0;
            while limit.map_or(true, |n| taken < n) {
                match tokens.next_if(|next| !looks_like_flag(next)) {
                    Some(value) => {
                        known.push(value.clone());
                        taken += 1;
                    }
                    None => break,
                }
            }
        }

        (known, rest)
    }
}

fn looks_like_flag(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

impl From<clap::Error> for Error {
    fn from(err: clap::Error) -> Self {
        let rendered = err.to_string();
        let mut lines = rendered.lines().map(str::trim).filter(|l| !l.is_empty());
        let first = lines.next().unwrap_or_default();
        let first = first.strip_prefix("error: ").unwrap_or(first);

        let message = match (first.ends_with(':'), lines.next()) {
            (true, Some(detail)) => format!("{} {}", first, detail),
            _ => first.to_string(),
        };

        Error::argument(message).with_cause(err)
    }
}
