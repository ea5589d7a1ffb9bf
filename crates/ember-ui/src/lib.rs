//! Controlled text field bridge for the Ember design system.
//!
//! [`TextFieldBridge`] keeps a caller-owned [`FieldState`] and a native
//! [`NativeTextWidget`] consistent while the user types, consulting a
//! [`FieldDelegate`] for every proposed edit and for focus and return-key
//! events.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use ember_core::{DefaultScheduler, Runtime};
//! use ember_testing::FakeTextWidget;
//! use ember_ui::{
//!     FieldDelegate, FieldState, NativeTextWidget, TextFieldBridge, TextFieldOptions,
//! };
//!
//! let runtime = Runtime::new(Arc::new(DefaultScheduler));
//! let state = FieldState::new_in("", runtime.handle()).with_identifier("email");
//! let bridge = TextFieldBridge::new(
//!     runtime.handle(),
//!     state.clone(),
//!     TextFieldOptions::new().with_placeholder("Email"),
//!     FieldDelegate::max_length(64),
//! );
//! let widget = FakeTextWidget::new();
//! bridge.create_widget(widget.clone());
//!
//! // The application resets the form; the next frame pushes it to the widget.
//! state.set_value("ada@example.com");
//! runtime.handle().drain_ui();
//! bridge.update()?;
//! assert_eq!(widget.text(), "ada@example.com");
//! # Ok::<(), ember_ui::BridgeError>(())
//! ```

mod bridge;
mod delegate;
mod error;
mod widget;

pub use bridge::TextFieldBridge;
pub use delegate::{EditDecision, EditProposal, FieldDelegate};
pub use error::BridgeError;
pub use widget::NativeTextWidget;

pub use ember_foundation::text::TextRange;
pub use ember_foundation::{FieldId, FieldState, TextFieldOptions};
