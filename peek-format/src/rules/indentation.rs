// Indentation rules

/// One nesting level of indentation
pub const DEFAULT_INDENT: &str = "  ";

/// Indentation for a given nesting level
pub fn indent_string(level: usize) -> String {
    DEFAULT_INDENT.repeat(level)
}

/// Shift every line of `text` right by `indent_level` spaces
pub fn apply_group_indent(text: &str, indent_level: usize) -> String {
    if indent_level == 0 {
        return text.to_string();
    }
    let group_indent = " ".repeat(indent_level);
    let shifted = text.replace('\n', &format!("\n{}", group_indent));
    format!("{}{}", group_indent, shifted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_string() {
        assert_eq!(indent_string(0), "");
        assert_eq!(indent_string(1), "  ");
        assert_eq!(indent_string(3), "      ");
    }

    #[test]
    fn test_apply_group_indent() {
        assert_eq!(apply_group_indent("a\nb", 0), "a\nb");
        assert_eq!(apply_group_indent("a", 2), "  a");
        assert_eq!(apply_group_indent("{\n  x: 1\n}", 4), "    {\n      x: 1\n    }");
    }
}
