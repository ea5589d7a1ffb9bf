//! Text range for edit proposals and cursor positions.

/// A range in text, used for proposed edits and cursor positions.
///
/// When `start == end`, this represents a cursor position (an insertion point).
///
/// # Invariants
///
/// - Indices are UTF-8 byte offsets (matching Rust's `String`)
/// - `start` can be greater than `end`; use `min()` and `max()` for ordered access
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub struct TextRange {
    /// Start index of the range
    pub start: usize,
    /// End index of the range
    pub end: usize,
}

impl TextRange {
    /// Creates a new text range.
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Creates a collapsed range (insertion point) at the given position.
    pub const fn cursor(position: usize) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Returns a range covering the entire text of given length.
    pub const fn all(length: usize) -> Self {
        Self {
            start: 0,
            end: length,
        }
    }

    /// Returns true if this range is collapsed.
    pub const fn collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Returns the length of the range in bytes.
    pub fn length(&self) -> usize {
        self.end.abs_diff(self.start)
    }

    /// Returns the minimum (leftmost) index.
    pub fn min(&self) -> usize {
        self.start.min(self.end)
    }

    /// Returns the maximum (rightmost) index.
    pub fn max(&self) -> usize {
        self.start.max(self.end)
    }

    /// Coerces the range to be within [0, max].
    pub fn coerce_in(&self, max: usize) -> Self {
        Self {
            start: self.start.min(max),
            end: self.end.min(max),
        }
    }

    /// Returns an ordered range that is valid for slicing `text`.
    ///
    /// Ends past the text are clamped to its length. An end that falls inside
    /// a multi-byte character widens the range to that character's boundary,
    /// so the range always covers whole characters.
    pub fn normalized_in(&self, text: &str) -> Self {
        let start = self.min().min(text.len());
        let end = self.max().min(text.len());

        let start = (0..=start)
            .rev()
            .find(|&i| text.is_char_boundary(i))
            .unwrap_or(0);
        let end = (end..=text.len())
            .find(|&i| text.is_char_boundary(i))
            .unwrap_or(text.len());

        Self { start, end }
    }

    /// Slices `text` with this range after normalising it.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        let range = self.normalized_in(text);
        &text[range.start..range.end]
    }
}
