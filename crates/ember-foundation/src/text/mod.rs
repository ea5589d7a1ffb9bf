//! Text primitives for editable fields.
//!
//! - [`TextRange`] - Byte range of a proposed edit or a cursor position
//! - [`apply_edit`] - Computes the text an edit would produce
//!
//! # Example
//!
//! ```
//! use ember_foundation::text::{apply_edit, TextRange};
//!
//! assert_eq!(apply_edit("ab", TextRange::cursor(1), "c"), "acb");
//! ```

mod edit;
mod range;

pub use edit::{apply_edit, next_char_boundary, prev_char_boundary};
pub use range::TextRange;
