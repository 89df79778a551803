//! Output sinks for command text and diagnostics

use std::cell::RefCell;

/// Destination for everything the manager and its commands print
///
/// Commands never write to the process streams directly; they go through
/// the sink handed to them in their [`Context`](crate::command::Context).
pub trait Output {
    /// Prints a line on standard output
    fn print(&self, text: &str);

    /// Prints a line on the error stream
    fn eprint(&self, text: &str);

    /// Returns true if verbose diagnostics are enabled
    fn is_verbose(&self) -> bool {
        false
    }

    /// Prints an error message
    fn error(&self, message: &str) {
        self.eprint(&format!("error: {}", message));
    }

    /// Prints a verbose debug message (only in verbose mode)
    fn verbose(&self, message: &str) {
        if self.is_verbose() {
            self.eprint(&format!("[verbose] {}", message));
        }
    }

    /// Prints a verbose debug message with context (only in verbose mode)
    fn verbose_ctx(&self, context: &str, message: &str) {
        if self.is_verbose() {
            self.eprint(&format!("[verbose:{}] {}", context, message));
        }
    }

    /// Prints structured data as a single JSON line
    fn data(&self, value: &serde_json::Value) {
        self.print(&value.to_string());
    }
}

/// Writes to the process's standard streams
#[derive(Debug, Clone, Copy, Default)]
pub struct Console {
    verbose: bool,
}

impl Console {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Output for Console {
    fn print(&self, text: &str) {
        println!("{}", text);
    }

    fn eprint(&self, text: &str) {
        eprintln!("{}", text);
    }

    fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Records output in memory
///
/// Every printed line is stored with a trailing newline, so `stdout()`
/// reads the same as the console would.
#[derive(Debug, Default)]
pub struct Capture {
    verbose: bool,
    stdout: RefCell<String>,
    stderr: RefCell<String>,
}

impl Capture {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capture sink that also records verbose diagnostics
    pub fn with_verbose() -> Self {
        Self {
            verbose: true,
            ..Self::default()
        }
    }

    /// Everything printed on standard output so far
    pub fn stdout(&self) -> String {
        self.stdout.borrow().clone()
    }

    /// Everything printed on the error stream so far
    pub fn stderr(&self) -> String {
        self.stderr.borrow().clone()
    }
}

impl Output for Capture {
    fn print(&self, text: &str) {
        let mut stdout = self.stdout.borrow_mut();
        stdout.push_str(text);
        stdout.push('\n');
    }

    fn eprint(&self, text: &str) {
        let mut stderr = self.stderr.borrow_mut();
        stderr.push_str(text);
        stderr.push('\n');
    }

    fn is_verbose(&self) -> bool {
        self.verbose
    }
}
