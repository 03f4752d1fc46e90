// peek-format - Value inspector for script runtime values
// Renders arbitrary, possibly cyclic values as console text with printf-style formatting

pub mod coerce;
pub mod config;
pub mod context;
pub mod directives;
pub mod formatter;
pub mod rules;
pub mod visitor;

pub use coerce::to_display_string;
pub use config::Config;
pub use formatter::Inspector;

use peek_value::{Heap, Value};

/// Render a single value
pub fn inspect(heap: &Heap, value: &Value, config: &Config) -> String {
    Inspector::new(heap, config.clone()).inspect(value)
}

/// Format console-style arguments
pub fn stringify_args(heap: &Heap, args: &[Value], config: &Config) -> String {
    Inspector::new(heap, config.clone()).stringify_args(args)
}

/// Render a single value with default configuration
pub fn inspect_with_defaults(heap: &Heap, value: &Value) -> String {
    inspect(heap, value, &Config::default())
}
