//! Field state, text primitives and presentation options for Ember text fields.

mod field_id;
mod field_state;
mod options;
pub mod text;

pub use field_id::FieldId;
pub use field_state::{FieldSnapshot, FieldState};
pub use options::{
    Capitalization, Color, ContentType, FieldColors, FontSpec, FontWeight, KeyboardOptions,
    KeyboardType, ReturnKey, TextFieldOptions,
};
