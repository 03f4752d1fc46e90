// printf-style directive scanner behind `stringify_args`
//
// A leading string argument may contain `%s %d %i %f %o %O %% %c`. Directives are
// consumed left to right against the remaining arguments; once those run out the
// rest of the format string is literal text (a `%%` still collapses to `%`).

use crate::coerce::to_display_string;
use crate::formatter::Inspector;
use crate::rules::{apply_group_indent, number_to_string, parse_float, parse_int};
use peek_value::Value;

/// Format `args` like a console call
pub fn stringify_args(inspector: &Inspector<'_>, args: &[Value]) -> String {
    let mut consumed = 0;
    let mut output = String::new();
    let mut join = "";

    if let Some(Value::String(first)) = args.first() {
        let chars: Vec<char> = first.chars().collect();
        let mut last_pos = 0;
        let mut i = 0;

        while i + 1 < chars.len() {
            if chars[i] == '%' {
                i += 1;
                let directive = chars[i];
                if consumed + 1 != args.len() {
                    let replacement = match directive {
                        's' => {
                            consumed += 1;
                            Some(to_display_string(inspector.heap(), &args[consumed]))
                        }
                        'd' | 'i' => {
                            consumed += 1;
                            Some(format_integer(inspector, &args[consumed]))
                        }
                        'f' => {
                            consumed += 1;
                            Some(format_float(inspector, &args[consumed]))
                        }
                        'o' | 'O' => {
                            consumed += 1;
                            Some(inspector.stringify_with_quotes(&args[consumed], 0))
                        }
                        '%' => {
                            output.extend(&chars[last_pos..i]);
                            last_pos = i + 1;
                            None
                        }
                        'c' => {
                            // Styling directive: dropped, consumes nothing
                            output.extend(&chars[last_pos..i - 1]);
                            last_pos = i + 1;
                            None
                        }
                        // Not a directive; left as literal text
                        _ => None,
                    };

                    if let Some(text) = replacement {
                        output.extend(&chars[last_pos..i - 1]);
                        output.push_str(&text);
                        last_pos = i + 1;
                    }
                } else if directive == '%' {
                    output.extend(&chars[last_pos..i]);
                    last_pos = i + 1;
                }
            }
            i += 1;
        }

        if last_pos != 0 {
            consumed += 1;
            join = " ";
            if last_pos < chars.len() {
                output.extend(&chars[last_pos..]);
            }
        }
    }

    for value in args.iter().skip(consumed) {
        output.push_str(join);
        match value {
            Value::String(s) => output.push_str(s),
            other => output.push_str(&inspector.stringify(other, 0)),
        }
        join = " ";
    }

    apply_group_indent(&output, inspector.config().indent_level)
}

/// `%d` / `%i`
fn format_integer(inspector: &Inspector<'_>, value: &Value) -> String {
    match value {
        Value::BigInt(b) => format!("{}n", b),
        Value::Symbol(_) => "NaN".to_string(),
        other => number_to_string(parse_int(&to_display_string(inspector.heap(), other))),
    }
}

/// `%f`
fn format_float(inspector: &Inspector<'_>, value: &Value) -> String {
    match value {
        Value::Symbol(_) => "NaN".to_string(),
        other => number_to_string(parse_float(&to_display_string(inspector.heap(), other))),
    }
}
