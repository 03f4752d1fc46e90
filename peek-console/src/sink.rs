// Output sinks

use std::fmt;
use std::io::{self, Write};

/// Severity of a console line; decides the output stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Log,
    Info,
    Debug,
    Warn,
    Error,
}

impl LogLevel {
    /// `warn` and `error` go to standard error
    pub fn is_stderr(self) -> bool {
        matches!(self, LogLevel::Warn | LogLevel::Error)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            LogLevel::Log => "log",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{}", name)
    }
}

/// Destination for formatted console lines
pub trait Sink {
    fn write_line(&mut self, level: LogLevel, text: &str);
}

/// Collects lines in memory
#[derive(Debug, Default, Clone)]
pub struct BufferSink {
    lines: Vec<(LogLevel, String)>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[(LogLevel, String)] {
        &self.lines
    }

    /// Just the text, in order
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|(_, text)| text.as_str()).collect()
    }

    pub fn take(&mut self) -> Vec<(LogLevel, String)> {
        std::mem::take(&mut self.lines)
    }
}

impl Sink for BufferSink {
    fn write_line(&mut self, level: LogLevel, text: &str) {
        self.lines.push((level, text.to_string()));
    }
}

/// Writes to the process's stdout/stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct StdSink;

impl Sink for StdSink {
    fn write_line(&mut self, level: LogLevel, text: &str) {
        // A closed pipe is not worth aborting over
        let result = if level.is_stderr() {
            writeln!(io::stderr().lock(), "{}", text)
        } else {
            writeln!(io::stdout().lock(), "{}", text)
        };
        if let Err(e) = result {
            log::debug!("dropping {} line: {}", level, e);
        }
    }
}
