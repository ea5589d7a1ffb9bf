//! Testing utilities and harness for Ember text fields

pub mod fake_widget;
pub mod rule;

pub use fake_widget::{Displayed, FakeTextWidget, WidgetEvent};
pub use rule::{FieldTestRule, FieldTestRuleBuilder};

pub mod prelude {
    pub use crate::fake_widget::*;
    pub use crate::rule::*;
    pub use ember_foundation::text::TextRange;
    pub use ember_foundation::{FieldId, FieldState, TextFieldOptions};
    pub use ember_ui::{EditDecision, EditProposal, FieldDelegate, NativeTextWidget};
}
