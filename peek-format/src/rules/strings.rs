// String rules

/// Marker appended to abbreviated strings
pub const ELLIPSIS: &str = "...";

/// Keep at most `max_chars` characters, appending an ellipsis when cut
pub fn abbreviate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Double-quote a string the way nested strings are shown
pub fn quote(text: &str) -> String {
    format!("\"{}\"", text)
}

/// Left-pad with spaces to `width` characters
pub fn pad_start(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat(width - len), text)
}

/// Right-pad with spaces to `width` characters
pub fn pad_end(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", text, " ".repeat(width - len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviate() {
        assert_eq!(abbreviate("hello", 10), "hello");
        assert_eq!(abbreviate("hello", 5), "hello");
        assert_eq!(abbreviate("hello world", 5), "hello...");
        assert_eq!(abbreviate("ééééé", 2), "éé...");
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("a b"), "\"a b\"");
    }

    #[test]
    fn test_padding() {
        assert_eq!(pad_start("7", 3), "  7");
        assert_eq!(pad_end("7", 3), "7  ");
        assert_eq!(pad_start("1234", 3), "1234");
    }
}
