use peek_console::{BufferSink, Clock, Console, LogLevel};
use peek_format::Config;
use peek_value::{Heap, Value};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Clock the test advances by hand
#[derive(Clone, Default)]
struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

fn console() -> (Console<BufferSink, ManualClock>, ManualClock) {
    let clock = ManualClock::default();
    let console = Console::new(BufferSink::new(), clock.clone(), Config::default());
    (console, clock)
}

fn texts(console: &Console<BufferSink, ManualClock>) -> Vec<String> {
    console
        .sink()
        .texts()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_log_formats_arguments() {
    let (mut console, _) = console();
    let heap = Heap::new();
    console.log(&heap, &[Value::from("%s has %d items"), Value::from("cart"), Value::from(3)]);
    assert_eq!(texts(&console), vec!["cart has 3 items"]);
}

#[test]
fn test_levels_reach_the_sink() {
    let (mut console, _) = console();
    let heap = Heap::new();
    console.info(&heap, &[Value::from("i")]);
    console.debug(&heap, &[Value::from("d")]);
    console.warn(&heap, &[Value::from("w")]);
    console.error(&heap, &[Value::from("e")]);
    let levels: Vec<LogLevel> = console.sink().lines().iter().map(|(level, _)| *level).collect();
    assert_eq!(
        levels,
        vec![LogLevel::Info, LogLevel::Debug, LogLevel::Warn, LogLevel::Error]
    );
}

#[test]
fn test_groups_indent_output() {
    let (mut console, _) = console();
    let mut heap = Heap::new();
    let obj = heap.new_object();
    let long = "v".repeat(40);
    heap.set_property(obj, "first", Value::from(long.as_str())).unwrap();
    heap.set_property(obj, "second", Value::from(long.as_str())).unwrap();

    console.group(&heap, &[Value::from("outer")]);
    console.log(&heap, &[Value::from("inside")]);
    console.group_collapsed(&heap, &[]);
    console.log(&heap, &[Value::Object(obj)]);
    console.group_end();
    console.group_end();
    console.log(&heap, &[Value::from("after")]);

    let quoted = format!("\"{}\"", long);
    assert_eq!(
        texts(&console),
        vec![
            "outer".to_string(),
            "  inside".to_string(),
            format!("    {{\n      first: {},\n      second: {}\n    }}", quoted, quoted),
            "after".to_string(),
        ]
    );
}

#[test]
fn test_count_and_reset() {
    let (mut console, _) = console();
    console.count(None);
    console.count(None);
    console.count(Some("clicks"));
    console.count_reset(None);
    console.count(None);
    console.count_reset(Some("missing"));
    assert_eq!(
        texts(&console),
        vec![
            "default: 1",
            "default: 2",
            "clicks: 1",
            "default: 1",
            "Count for 'missing' does not exist",
        ]
    );
    let last = console.sink().lines().last().map(|(level, _)| *level);
    assert_eq!(last, Some(LogLevel::Warn));
}

#[test]
fn test_counts_are_per_console() {
    let (mut first, _) = console();
    let (mut second, _) = console();
    first.count(Some("x"));
    first.count(Some("x"));
    second.count(Some("x"));
    assert_eq!(texts(&first).last().map(String::as_str), Some("x: 2"));
    assert_eq!(texts(&second), vec!["x: 1"]);
}

#[test]
fn test_timers() {
    let (mut console, clock) = console();
    let heap = Heap::new();
    console.time(Some("load"));
    clock.advance(15);
    console.time_log(&heap, Some("load"), &[Value::from("step"), Value::from(1)]);
    clock.advance(5);
    console.time_end(Some("load"));
    console.time_end(Some("load"));
    assert_eq!(
        texts(&console),
        vec!["load: 15ms step 1", "load: 20ms", "Timer 'load' does not exist"]
    );
}

#[test]
fn test_duplicate_timer_warns() {
    let (mut console, clock) = console();
    let heap = Heap::new();
    console.time(None);
    clock.advance(10);
    console.time(None);
    clock.advance(10);
    console.time_log(&heap, None, &[]);
    console.time_log(&heap, Some("nope"), &[]);
    assert_eq!(
        texts(&console),
        vec![
            "Timer 'default' already exists",
            "default: 20ms",
            "Timer 'nope' does not exist",
        ]
    );
}

#[test]
fn test_assert() {
    let (mut console, _) = console();
    let mut heap = Heap::new();
    let obj = heap.new_object();
    heap.set_property(obj, "a", Value::from(1)).unwrap();

    console.assert(&heap, true, &[Value::from("never")]);
    console.assert(&heap, false, &[]);
    console.assert(&heap, false, &[Value::from("%d apples"), Value::from(4)]);
    console.assert(&heap, false, &[Value::Object(obj)]);
    assert_eq!(
        texts(&console),
        vec![
            "Assertion failed",
            "Assertion failed: 4 apples",
            "Assertion failed: { a: 1 }",
        ]
    );
    assert!(console
        .sink()
        .lines()
        .iter()
        .all(|(level, _)| *level == LogLevel::Error));
}

#[test]
fn test_dir_uses_call_options() {
    let (mut console, _) = console();
    let mut heap = Heap::new();
    let inner = heap.new_object();
    heap.set_property(inner, "deep", Value::from(true)).unwrap();
    let outer = heap.new_object();
    heap.set_property(outer, "inner", Value::Object(inner)).unwrap();

    console.dir(&heap, &Value::Object(outer), &Config::default().with_depth(1));
    console.dir(&heap, &Value::Object(outer), &Config::default());
    assert_eq!(
        texts(&console),
        vec!["{ inner: [Object] }", "{ inner: { deep: true } }"]
    );
}
