// Color markup rules
//
// Width decisions are always taken on the text with ANSI sequences removed, so
// colored and plain renderings lay out identically.

use colored::Colorize;
use regex::Regex;
use std::sync::OnceLock;

static ANSI_SEQUENCE: OnceLock<Option<Regex>> = OnceLock::new();

/// Role of a rendered fragment, mapped to a terminal color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// numbers, booleans, undefined, symbols, bigints
    Primitive,
    /// quoted strings
    Quoted,
    /// functions, `[Circular]`, depth tags, wrapper objects
    Special,
    Null,
    Date,
    /// regexps, `[Not Implemented]`, `<rejected>`
    Alert,
    /// `<N empty items>`
    Dim,
}

/// Apply a style when colors are enabled
pub fn paint(text: &str, style: Style, colors: bool) -> String {
    if !colors {
        return text.to_string();
    }
    match style {
        Style::Primitive => text.yellow().to_string(),
        Style::Quoted => text.green().to_string(),
        Style::Special => text.cyan().to_string(),
        Style::Null => text.bold().to_string(),
        Style::Date => text.magenta().to_string(),
        Style::Alert => text.red().to_string(),
        Style::Dim => text.dimmed().to_string(),
    }
}

/// Remove ANSI SGR escape sequences
pub fn strip_markup(text: &str) -> String {
    if !text.contains('\u{1b}') {
        return text.to_string();
    }
    let pattern = ANSI_SEQUENCE.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").ok());
    match pattern {
        Some(re) => re.replace_all(text, "").into_owned(),
        None => text.to_string(),
    }
}

/// Visible width of a rendered fragment in characters
pub fn display_width(text: &str) -> usize {
    strip_markup(text).chars().count()
}
