//! Edit arithmetic shared by the bridge and delegates.

use super::TextRange;

/// Returns `text` with `range` replaced by `replacement`.
///
/// The range is normalised against `text` first, so this never panics on
/// out-of-range or mid-character offsets.
pub fn apply_edit(text: &str, range: TextRange, replacement: &str) -> String {
    let range = range.normalized_in(text);
    let mut result = String::with_capacity(text.len() - range.length() + replacement.len());
    result.push_str(&text[..range.start]);
    result.push_str(replacement);
    result.push_str(&text[range.end..]);
    result
}

/// Byte offset of the character boundary before `pos`, or 0.
pub fn prev_char_boundary(text: &str, pos: usize) -> usize {
    let pos = TextRange::cursor(pos).normalized_in(text).start;
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(index, _)| index)
        .unwrap_or(0)
}

/// Byte offset of the character boundary after `pos`, or the text length.
pub fn next_char_boundary(text: &str, pos: usize) -> usize {
    let widened = TextRange::cursor(pos).normalized_in(text);
    if widened.end != pos.min(text.len()) {
        // `pos` was inside a character; its end is the next boundary.
        return widened.end;
    }
    let pos = widened.end;
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_at_collapsed_range() {
        assert_eq!(apply_edit("ab", TextRange::cursor(1), "c"), "acb");
    }

    #[test]
    fn replaces_selection() {
        assert_eq!(apply_edit("hello", TextRange::new(1, 4), "ipp"), "hippo");
    }

    #[test]
    fn deletes_with_empty_replacement() {
        assert_eq!(apply_edit("hello", TextRange::new(4, 5), ""), "hell");
    }

    #[test]
    fn clamps_range_past_end() {
        assert_eq!(apply_edit("ab", TextRange::new(5, 9), "!"), "ab!");
    }

    #[test]
    fn replaces_whole_multibyte_character() {
        assert_eq!(apply_edit("aéb", TextRange::cursor(2), "e"), "aeb");
    }

    #[test]
    fn char_boundaries_step_over_multibyte() {
        let text = "aéb";
        assert_eq!(prev_char_boundary(text, 3), 1);
        assert_eq!(next_char_boundary(text, 1), 3);
        assert_eq!(prev_char_boundary(text, 0), 0);
        assert_eq!(next_char_boundary(text, 4), 4);
    }
}
