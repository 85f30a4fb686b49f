//! Shared utility functions.

/// Single-line preview of `s` for log output.
///
/// Newlines are flattened to spaces and the result is cut to at most
/// `max_bytes` (plus a trailing `...`) without splitting a UTF-8 character.
pub fn preview(s: &str, max_bytes: usize) -> String {
    let flat = s.replace(['\r', '\n'], " ");
    if flat.len() <= max_bytes {
        return flat;
    }
    let mut end = max_bytes;
    while end > 0 && !flat.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &flat[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_short_is_unchanged() {
        assert_eq!(preview("hi", 10), "hi");
    }

    #[test]
    fn preview_flattens_newlines() {
        assert_eq!(preview("fn main() {\n}", 40), "fn main() { }");
    }

    #[test]
    fn preview_cuts_ascii() {
        assert_eq!(preview("hello world", 5), "hello...");
    }

    #[test]
    fn preview_respects_char_boundary() {
        // Each character is 3 bytes; cutting at 4 backs up to 3
        assert_eq!(preview("あのね", 4), "あ...");
    }
}
