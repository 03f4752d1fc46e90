// peek-console - Console facade over the peek inspector
// Every console owns its counters, timers and group indentation

pub mod clock;
pub mod sink;

pub use clock::{Clock, MonotonicClock};
pub use sink::{BufferSink, LogLevel, Sink, StdSink};

use peek_format::{stringify_args, Config};
use peek_value::{Heap, Value};
use std::collections::HashMap;
use std::time::Duration;

/// Indentation added per `group` call
const GROUP_INDENT_WIDTH: usize = 2;

const DEFAULT_LABEL: &str = "default";

/// A console bound to one sink and one clock
pub struct Console<S: Sink = StdSink, C: Clock = MonotonicClock> {
    sink: S,
    clock: C,
    config: Config,
    indent_level: usize,
    counts: HashMap<String, u64>,
    timers: HashMap<String, Duration>,
}

impl Console {
    /// Console writing to the process's standard streams
    pub fn stdio(config: Config) -> Self {
        Console::new(StdSink, MonotonicClock::new(), config)
    }
}

impl<S: Sink> Console<S, MonotonicClock> {
    pub fn with_sink(sink: S) -> Self {
        Console::new(sink, MonotonicClock::new(), Config::default())
    }
}

impl<S: Sink, C: Clock> Console<S, C> {
    pub fn new(sink: S, clock: C, config: Config) -> Self {
        let indent_level = config.indent_level;
        Self {
            sink,
            clock,
            config,
            indent_level,
            counts: HashMap::new(),
            timers: HashMap::new(),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Current group indentation in spaces
    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    fn print(&mut self, level: LogLevel, heap: &Heap, args: &[Value]) {
        let config = self.config.clone().with_indent_level(self.indent_level);
        let text = stringify_args(heap, args, &config);
        self.sink.write_line(level, &text);
    }

    /// Print a message the console composes itself
    fn print_text(&mut self, level: LogLevel, text: String) {
        self.print(level, &Heap::new(), &[Value::String(text)]);
    }

    pub fn log(&mut self, heap: &Heap, args: &[Value]) {
        self.print(LogLevel::Log, heap, args);
    }

    pub fn info(&mut self, heap: &Heap, args: &[Value]) {
        self.print(LogLevel::Info, heap, args);
    }

    pub fn debug(&mut self, heap: &Heap, args: &[Value]) {
        self.print(LogLevel::Debug, heap, args);
    }

    pub fn warn(&mut self, heap: &Heap, args: &[Value]) {
        self.print(LogLevel::Warn, heap, args);
    }

    pub fn error(&mut self, heap: &Heap, args: &[Value]) {
        self.print(LogLevel::Error, heap, args);
    }

    /// Print `label` (if any) and indent everything after it
    pub fn group(&mut self, heap: &Heap, label: &[Value]) {
        if !label.is_empty() {
            self.log(heap, label);
        }
        self.indent_level += GROUP_INDENT_WIDTH;
        log::trace!("group indent now {}", self.indent_level);
    }

    /// Same as [`Console::group`]; there is no interactive collapsing
    pub fn group_collapsed(&mut self, heap: &Heap, label: &[Value]) {
        self.group(heap, label);
    }

    pub fn group_end(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(GROUP_INDENT_WIDTH);
        log::trace!("group indent now {}", self.indent_level);
    }

    /// Increment and print the counter for `label` (`"default"` when `None`)
    pub fn count(&mut self, label: Option<&str>) {
        let label = label.unwrap_or(DEFAULT_LABEL);
        let current = self.counts.entry(label.to_string()).or_insert(0);
        *current += 1;
        let text = format!("{}: {}", label, current);
        self.print_text(LogLevel::Info, text);
    }

    pub fn count_reset(&mut self, label: Option<&str>) {
        let label = label.unwrap_or(DEFAULT_LABEL);
        match self.counts.get_mut(label) {
            Some(current) => *current = 0,
            None => self.print_text(
                LogLevel::Warn,
                format!("Count for '{}' does not exist", label),
            ),
        }
    }

    /// Start a timer
    pub fn time(&mut self, label: Option<&str>) {
        let label = label.unwrap_or(DEFAULT_LABEL);
        if self.timers.contains_key(label) {
            self.print_text(LogLevel::Warn, format!("Timer '{}' already exists", label));
            return;
        }
        let started = self.clock.now();
        self.timers.insert(label.to_string(), started);
    }

    /// Print elapsed time and `extra` without stopping the timer
    pub fn time_log(&mut self, heap: &Heap, label: Option<&str>, extra: &[Value]) {
        let label = label.unwrap_or(DEFAULT_LABEL);
        let Some(started) = self.timers.get(label).copied() else {
            self.print_text(LogLevel::Warn, format!("Timer '{}' does not exist", label));
            return;
        };
        let elapsed = self.clock.now().saturating_sub(started);
        let mut args = vec![Value::String(format!("{}: {}ms", label, elapsed.as_millis()))];
        args.extend_from_slice(extra);
        self.print(LogLevel::Info, heap, &args);
    }

    /// Print elapsed time and stop the timer
    pub fn time_end(&mut self, label: Option<&str>) {
        let label = label.unwrap_or(DEFAULT_LABEL);
        let Some(started) = self.timers.remove(label) else {
            self.print_text(LogLevel::Warn, format!("Timer '{}' does not exist", label));
            return;
        };
        let elapsed = self.clock.now().saturating_sub(started);
        self.print_text(
            LogLevel::Info,
            format!("{}: {}ms", label, elapsed.as_millis()),
        );
    }

    /// Report to stderr when `condition` is false
    pub fn assert(&mut self, heap: &Heap, condition: bool, args: &[Value]) {
        if condition {
            return;
        }
        match args.split_first() {
            None => self.print_text(LogLevel::Error, "Assertion failed".to_string()),
            // A leading string stays a format string for the rest
            Some((Value::String(first), rest)) => {
                let mut message = vec![Value::String(format!("Assertion failed: {}", first))];
                message.extend_from_slice(rest);
                self.print(LogLevel::Error, heap, &message);
            }
            Some(_) => {
                let mut message = vec![Value::from("Assertion failed:")];
                message.extend_from_slice(args);
                self.print(LogLevel::Error, heap, &message);
            }
        }
    }

    /// Print one value with per-call options; group indentation still applies
    pub fn dir(&mut self, heap: &Heap, value: &Value, options: &Config) {
        let config = options.clone().with_indent_level(self.indent_level);
        let text = stringify_args(heap, std::slice::from_ref(value), &config);
        self.sink.write_line(LogLevel::Log, &text);
    }

    pub fn clear(&mut self) {
        self.indent_level = 0;
    }
}
