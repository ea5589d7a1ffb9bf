//! Robot-style harness for driving one bridged text field.
//!
//! `FieldTestRule` plays both outer roles around a [`TextFieldBridge`]: the
//! platform (delivering keystrokes and focus callbacks from a
//! [`FakeTextWidget`]) and the host event loop (draining deferred UI work and
//! re-rendering whenever state asks for a frame).
//!
//! # Example
//!
//! ```
//! use ember_testing::FieldTestRule;
//!
//! let mut rule = FieldTestRule::builder("").build();
//! rule.tap();
//! rule.type_text("hello");
//! assert_eq!(rule.value(), "hello");
//! rule.blur();
//! assert!(!rule.state().is_editing());
//! ```

use std::sync::Arc;

use ember_core::{DefaultScheduler, Runtime, RuntimeHandle};
use ember_foundation::text::TextRange;
use ember_foundation::{FieldId, FieldState, TextFieldOptions};
use ember_ui::{FieldDelegate, NativeTextWidget, TextFieldBridge};

use crate::fake_widget::{FakeTextWidget, WidgetEvent};

/// Upper bound on pump iterations before the harness assumes a feedback loop.
const MAX_PUMP_ROUNDS: usize = 64;

/// Configures a [`FieldTestRule`].
pub struct FieldTestRuleBuilder {
    initial: String,
    secure: bool,
    editing: bool,
    identifier: Option<FieldId>,
    options: TextFieldOptions,
    delegate: FieldDelegate,
    focusable: bool,
}

impl FieldTestRuleBuilder {
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn editing(mut self, editing: bool) -> Self {
        self.editing = editing;
        self
    }

    pub fn identifier(mut self, identifier: impl Into<FieldId>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn options(mut self, options: TextFieldOptions) -> Self {
        self.options = options;
        self
    }

    pub fn delegate(mut self, delegate: FieldDelegate) -> Self {
        self.delegate = delegate;
        self
    }

    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    /// Creates the runtime, state, bridge and widget, then settles.
    pub fn build(self) -> FieldTestRule {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let mut state = FieldState::new_in(self.initial, runtime.handle())
            .with_secure(self.secure)
            .with_editing(self.editing);
        if let Some(identifier) = self.identifier {
            state = state.with_identifier(identifier);
        }

        let bridge = TextFieldBridge::new(
            runtime.handle(),
            state.clone(),
            self.options,
            self.delegate,
        );
        let widget = FakeTextWidget::new();
        widget.set_focusable(self.focusable);
        bridge.create_widget(widget.clone());
        runtime.set_needs_frame(false);

        let mut rule = FieldTestRule {
            runtime,
            state,
            bridge,
            widget,
            frames: 0,
        };
        rule.pump_until_idle();
        rule
    }
}

/// Headless harness owning one field and its fake widget.
pub struct FieldTestRule {
    runtime: Runtime,
    state: FieldState,
    bridge: TextFieldBridge<FakeTextWidget>,
    widget: FakeTextWidget,
    frames: usize,
}

impl FieldTestRule {
    pub fn builder(initial: impl Into<String>) -> FieldTestRuleBuilder {
        FieldTestRuleBuilder {
            initial: initial.into(),
            secure: false,
            editing: false,
            identifier: None,
            options: TextFieldOptions::new(),
            delegate: FieldDelegate::new(),
            focusable: true,
        }
    }

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    pub fn bridge(&self) -> &TextFieldBridge<FakeTextWidget> {
        &self.bridge
    }

    pub fn widget(&self) -> &FakeTextWidget {
        &self.widget
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn value(&self) -> String {
        self.state.value()
    }

    pub fn widget_text(&self) -> String {
        self.widget.text()
    }

    /// Number of re-renders (bridge updates) performed so far.
    pub fn frames_rendered(&self) -> usize {
        self.frames
    }

    /// Drives the loop until no deferred work, focus callbacks or frame
    /// requests remain.
    ///
    /// # Panics
    ///
    /// Panics if the field keeps requesting frames, which means the bridge and
    /// the state are feeding each other.
    pub fn pump_until_idle(&mut self) {
        for _ in 0..MAX_PUMP_ROUNDS {
            let mut progressed = self.runtime.handle().drain_ui() > 0;

            for event in self.widget.take_events() {
                progressed = true;
                match event {
                    WidgetEvent::FocusGained => self.bridge.did_begin_editing(),
                    WidgetEvent::FocusLost => self.bridge.did_end_editing(&self.widget.text()),
                }
            }

            if self.runtime.needs_frame() {
                if self.runtime.handle().has_pending_ui() {
                    // Deferred work first; it may change what the frame shows.
                    continue;
                }
                self.runtime.set_needs_frame(false);
                self.bridge
                    .update()
                    .expect("test rule always creates a widget");
                self.frames += 1;
                progressed = true;
            }

            if !progressed {
                return;
            }
        }
        panic!("text field did not settle after {MAX_PUMP_ROUNDS} rounds");
    }

    /// The user taps the field.
    pub fn tap(&mut self) {
        self.widget.user_focus();
        self.pump_until_idle();
    }

    /// The user moves focus away from the field.
    pub fn blur(&mut self) {
        self.widget.user_blur();
        self.pump_until_idle();
    }

    /// Types `text` one character at a time. Returns how many keystrokes the
    /// bridge let through natively.
    pub fn type_text(&mut self, text: &str) -> usize {
        let mut allowed = 0;
        for c in text.chars() {
            if self.input(&c.to_string()) {
                allowed += 1;
            }
        }
        allowed
    }

    /// Pastes `text` as a single edit.
    pub fn paste(&mut self, text: &str) -> bool {
        self.input(text)
    }

    /// Proposes one insertion at the widget's selection. Returns whether the
    /// native edit was allowed.
    pub fn input(&mut self, text: &str) -> bool {
        assert!(
            self.widget.is_focused(),
            "typing into a field that does not have focus"
        );
        let (current, range, replacement) = self.widget.propose_input(text);
        self.propose(&current, range, &replacement)
    }

    /// Deletes backwards. Returns whether the native edit was allowed; `false`
    /// also when there was nothing to delete.
    pub fn backspace(&mut self) -> bool {
        assert!(
            self.widget.is_focused(),
            "deleting in a field that does not have focus"
        );
        match self.widget.propose_backspace() {
            Some((current, range, replacement)) => self.propose(&current, range, &replacement),
            None => false,
        }
    }

    pub fn select(&mut self, range: TextRange) {
        self.widget.select(range);
    }

    pub fn place_cursor(&mut self, position: usize) {
        self.widget.place_cursor(position);
    }

    /// The user presses the return key. Returns the bridge's answer.
    pub fn press_return(&mut self) -> bool {
        let allowed = self.bridge.should_return();
        self.pump_until_idle();
        allowed
    }

    /// The application changes the value, e.g. a form reset.
    pub fn set_value(&mut self, value: &str) {
        self.state.set_value(value);
        self.pump_until_idle();
    }

    /// The application toggles secure entry, e.g. a "show password" button.
    pub fn set_secure(&mut self, secure: bool) {
        self.state.set_secure(secure);
        self.pump_until_idle();
    }

    /// The application forces the editing flag.
    pub fn set_editing(&mut self, editing: bool) {
        self.state.set_editing(editing);
        self.pump_until_idle();
    }

    fn propose(&mut self, current: &str, range: TextRange, replacement: &str) -> bool {
        let allowed = self.bridge.should_change_text(current, range, replacement);
        if allowed {
            self.widget.apply_native_edit(range, replacement);
        }
        self.pump_until_idle();
        allowed
    }
}
