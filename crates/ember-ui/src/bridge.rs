//! Synchronization bridge between a [`FieldState`] and a native text widget.
//!
//! Two stores hold the same string: the application's `FieldState` and the
//! widget's live edit buffer. The bridge keeps them consistent with a private
//! shadow copy of the last text it synchronized with the widget:
//!
//! - an edit coming from the widget updates the shadow copy and the state
//!   together, so the re-render that follows finds `value == shadow` and
//!   leaves the live buffer and cursor alone;
//! - a value that differs from the shadow copy was written by someone else
//!   and is pushed into the widget.
//!
//! Platform callbacks map onto the bridge as follows:
//!
//! | platform event            | bridge method                              |
//! |---------------------------|--------------------------------------------|
//! | should change characters  | [`TextFieldBridge::should_change_text`]    |
//! | did begin editing         | [`TextFieldBridge::did_begin_editing`]     |
//! | did end editing           | [`TextFieldBridge::did_end_editing`]       |
//! | should return             | [`TextFieldBridge::should_return`]         |
//! | view update / re-render   | [`TextFieldBridge::update`]                |

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use ember_core::RuntimeHandle;
use ember_foundation::text::TextRange;
use ember_foundation::{FieldState, TextFieldOptions};

use crate::delegate::{EditDecision, EditProposal, FieldDelegate};
use crate::error::BridgeError;
use crate::widget::NativeTextWidget;

struct BridgeInner<W: NativeTextWidget> {
    runtime: RuntimeHandle,
    state: FieldState,
    options: RefCell<TextFieldOptions>,
    delegate: RefCell<FieldDelegate>,
    widget: RefCell<Option<W>>,
    /// Last text written into or read from the widget.
    shadow: RefCell<String>,
    /// Bumped on every widget creation; deferred writes aimed at an older
    /// widget are dropped.
    generation: Cell<u64>,
    /// `is_editing` as of the last focus decision; only changes made by the
    /// application move focus.
    editing_seen: Cell<bool>,
}

/// Adapter that owns a native text widget and keeps it consistent with a
/// caller-owned [`FieldState`].
///
/// Cloning is cheap and shares the bridge, which is how platform callbacks
/// get hold of it.
///
/// # Thread Safety
///
/// Uses `Rc<RefCell<...>>` internally; all calls must happen on the UI thread
/// that owns the runtime.
pub struct TextFieldBridge<W: NativeTextWidget> {
    inner: Rc<BridgeInner<W>>,
}

impl<W: NativeTextWidget> Clone for TextFieldBridge<W> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<W: NativeTextWidget> std::fmt::Debug for TextFieldBridge<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextFieldBridge")
            .field("state", &self.inner.state)
            .field("has_widget", &self.has_widget())
            .field("generation", &self.inner.generation.get())
            .finish()
    }
}

impl<W: NativeTextWidget> TextFieldBridge<W> {
    pub fn new(
        runtime: RuntimeHandle,
        state: FieldState,
        options: TextFieldOptions,
        delegate: FieldDelegate,
    ) -> Self {
        let shadow = state.value();
        Self {
            inner: Rc::new(BridgeInner {
                runtime,
                state,
                options: RefCell::new(options),
                delegate: RefCell::new(delegate),
                widget: RefCell::new(None),
                shadow: RefCell::new(shadow),
                generation: Cell::new(0),
                editing_seen: Cell::new(false),
            }),
        }
    }

    pub fn state(&self) -> &FieldState {
        &self.inner.state
    }

    pub fn options(&self) -> TextFieldOptions {
        self.inner.options.borrow().clone()
    }

    pub fn has_widget(&self) -> bool {
        self.inner.widget.borrow().is_some()
    }

    /// Runs `f` against the owned widget, if any.
    pub fn with_widget<R>(&self, f: impl FnOnce(&W) -> R) -> Option<R> {
        self.inner.widget.borrow().as_ref().map(f)
    }

    /// Runs `f` against the owned widget mutably, if any.
    ///
    /// Meant for platform glue and tests; writing text through here bypasses
    /// synchronization until the next edit or [`update`](Self::update).
    pub fn with_widget_mut<R>(&self, f: impl FnOnce(&mut W) -> R) -> Option<R> {
        self.inner.widget.borrow_mut().as_mut().map(f)
    }

    #[cfg(test)]
    pub(crate) fn shadow_text(&self) -> String {
        self.inner.shadow.borrow().clone()
    }

    /// Configures a freshly instantiated widget and takes ownership of it.
    ///
    /// Presentation options and the secure flag are applied before any text is
    /// written, so a secure field never shows its value unmasked. If the state
    /// says the field is editing and the widget can take focus, focus is
    /// requested. Any previously owned widget is dropped and the shadow copy
    /// restarts from the written value.
    pub fn create_widget(&self, mut widget: W) {
        let value = self.inner.state.value();
        widget.apply_options(&self.inner.options.borrow());
        widget.set_secure_entry(self.inner.state.is_secure());
        widget.set_text(&value);
        *self.inner.shadow.borrow_mut() = value;

        let editing = self.inner.state.is_editing();
        self.inner.editing_seen.set(editing);
        if editing && widget.can_become_focused() {
            let focused = widget.request_focus();
            log::debug!("text field created in editing state; focus granted: {focused}");
        }

        self.inner.generation.set(self.inner.generation.get() + 1);
        let previous = self.inner.widget.borrow_mut().replace(widget);
        if previous.is_some() {
            log::debug!(
                "text field widget recreated (generation {})",
                self.inner.generation.get()
            );
        }
    }

    /// Releases the widget, e.g. when the field view is torn down.
    pub fn take_widget(&self) -> Option<W> {
        let widget = self.inner.widget.borrow_mut().take();
        if widget.is_some() {
            self.inner.generation.set(self.inner.generation.get() + 1);
        }
        widget
    }

    pub fn set_delegate(&self, delegate: FieldDelegate) {
        *self.inner.delegate.borrow_mut() = delegate;
    }

    /// Stores new presentation options and applies them to a live widget. The
    /// widget's text is left alone.
    pub fn set_options(&self, options: TextFieldOptions) {
        if *self.inner.options.borrow() == options {
            return;
        }
        *self.inner.options.borrow_mut() = options;
        let options = self.inner.options.borrow();
        if let Some(widget) = self.inner.widget.borrow_mut().as_mut() {
            widget.apply_options(&options);
        }
    }

    /// Reconciles the widget against the current field state.
    ///
    /// Call on every re-render. An unfocused widget is always overwritten with
    /// the state's value. A focused widget is overwritten only when the value
    /// was changed by someone other than the widget, or when the field has just
    /// switched to secure entry while still showing its plain value. The
    /// secure flag is always resynchronized. When the application flips
    /// `is_editing`, focus is requested or resigned to match; a widget whose
    /// focus callback is still in flight is left alone.
    ///
    /// If the widget is busy (an update requested from inside a widget call),
    /// the reconciliation is deferred to the next turn of the UI loop.
    pub fn update(&self) -> Result<(), BridgeError> {
        let Ok(mut slot) = self.inner.widget.try_borrow_mut() else {
            log::debug!("widget busy; deferring text field update");
            self.defer_update();
            return Ok(());
        };
        let widget = slot.as_mut().ok_or(BridgeError::WidgetNotCreated)?;
        self.inner.reconcile(widget);
        Ok(())
    }

    fn defer_update(&self) {
        let weak: Weak<BridgeInner<W>> = Rc::downgrade(&self.inner);
        self.inner.runtime.enqueue_ui_task(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                let bridge = TextFieldBridge { inner };
                if let Err(err) = bridge.update() {
                    log::debug!("deferred text field update skipped: {err}");
                }
            }
        }));
    }

    /// Decides whether the widget may apply an edit.
    ///
    /// Called by the platform before every keystroke, paste or deletion with
    /// the widget's current text. Returns `true` to let the native edit
    /// proceed.
    pub fn should_change_text(
        &self,
        current_text: &str,
        range: TextRange,
        replacement: &str,
    ) -> bool {
        let proposal = EditProposal::new(current_text, range, replacement);
        // Cloned so handlers may replace the delegate.
        let delegate = self.inner.delegate.borrow().clone();
        let decision = delegate.propose_change(self.inner.state.identifier(), &proposal);
        log::trace!(
            "edit proposal {:?} -> {:?}",
            proposal.range(),
            match &decision {
                EditDecision::Accept => "accept",
                EditDecision::Reject => "reject",
                EditDecision::Replace(_) => "replace",
            }
        );

        match decision {
            EditDecision::Accept => {
                self.inner.record_widget_text(proposal.resulting_text());
                true
            }
            EditDecision::Reject => false,
            EditDecision::Replace(text) => {
                self.schedule_replacement(text);
                false
            }
        }
    }

    /// Writes `text` into the widget on the next turn of the UI loop.
    ///
    /// Widgets may not be mutated from inside their own change callback, so
    /// the write cannot happen in [`should_change_text`](Self::should_change_text).
    fn schedule_replacement(&self, text: String) {
        let weak: Weak<BridgeInner<W>> = Rc::downgrade(&self.inner);
        let generation = self.inner.generation.get();
        self.inner.runtime.enqueue_ui_task(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.apply_replacement(generation, text);
            }
        }));
    }

    /// The widget gained focus.
    pub fn did_begin_editing(&self) {
        self.inner.editing_seen.set(true);
        self.inner.state.set_editing(true);
        let delegate = self.inner.delegate.borrow().clone();
        delegate.begin_edit(self.inner.state.identifier());
    }

    /// The widget lost focus; `final_text` is what it displays now.
    ///
    /// The platform passes the text because this callback can fire from
    /// inside a widget call the bridge is making (resigning focus).
    pub fn did_end_editing(&self, final_text: &str) {
        self.inner.record_widget_text(final_text.to_string());
        self.inner.editing_seen.set(false);
        self.inner.state.set_editing(false);
        let delegate = self.inner.delegate.borrow().clone();
        delegate.end_edit(self.inner.state.identifier());
    }

    /// The return key was pressed. Resigns focus if the delegate allows it and
    /// returns the delegate's answer.
    pub fn should_return(&self) -> bool {
        let delegate = self.inner.delegate.borrow().clone();
        let allow = delegate.should_return(self.inner.state.identifier());
        if !allow {
            return false;
        }
        match self.inner.widget.try_borrow_mut() {
            Ok(mut slot) => match slot.as_mut() {
                Some(widget) => widget.resign_focus(),
                None => log::warn!("return key reported with no widget attached"),
            },
            Err(_) => log::warn!("widget busy; cannot resign focus on return"),
        }
        true
    }
}

impl<W: NativeTextWidget> BridgeInner<W> {
    /// Records text the widget now shows (or is about to show) as both the
    /// shadow copy and the authoritative value.
    fn record_widget_text(&self, text: String) {
        // Shadow first: state listeners may reconcile immediately.
        *self.shadow.borrow_mut() = text.clone();
        self.state.set_value(text);
    }

    fn reconcile(&self, widget: &mut W) {
        let is_secure = self.state.is_secure();
        let entering_secure = is_secure && !widget.is_secure_entry();
        widget.set_secure_entry(is_secure);

        let value = self.state.value();
        if widget.is_focused() {
            let masking_artifact = entering_secure && widget.text() == value;
            let changed_elsewhere = *self.shadow.borrow() != value;
            if masking_artifact || changed_elsewhere {
                log::debug!(
                    "overwriting focused widget (masking artifact: {masking_artifact}, external change: {changed_elsewhere})"
                );
                widget.set_text(&value);
                *self.shadow.borrow_mut() = value;
            }
        } else {
            widget.set_text(&value);
            *self.shadow.borrow_mut() = value;
        }

        let wants_focus = self.state.is_editing();
        if wants_focus == self.editing_seen.replace(wants_focus) {
            return;
        }
        if wants_focus && !widget.is_focused() && widget.can_become_focused() {
            log::debug!("application started editing; requesting focus");
            widget.request_focus();
        } else if !wants_focus && widget.is_focused() {
            log::debug!("application stopped editing; resigning focus");
            widget.resign_focus();
        }
    }

    fn apply_replacement(&self, generation: u64, text: String) {
        if generation != self.generation.get() {
            log::debug!("dropping replacement aimed at a recreated widget");
            return;
        }
        match self.widget.try_borrow_mut() {
            Ok(mut slot) => match slot.as_mut() {
                Some(widget) => widget.set_text(&text),
                None => {
                    log::warn!("replacement scheduled but widget is gone");
                    return;
                }
            },
            Err(_) => {
                log::warn!("widget busy; replacement dropped");
                return;
            }
        }
        log::debug!("applied deferred replacement");
        self.record_widget_text(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::{DefaultScheduler, Runtime};
    use std::sync::Arc;

    /// Minimal widget: a text buffer with focus and secure flags and a write
    /// counter.
    #[derive(Default)]
    struct TestWidget {
        text: String,
        focused: bool,
        secure: bool,
        writes: usize,
        focusable: bool,
    }

    impl NativeTextWidget for TestWidget {
        fn text(&self) -> String {
            self.text.clone()
        }
        fn set_text(&mut self, text: &str) {
            self.text = text.to_string();
            self.writes += 1;
        }
        fn is_focused(&self) -> bool {
            self.focused
        }
        fn can_become_focused(&self) -> bool {
            self.focusable
        }
        fn request_focus(&mut self) -> bool {
            self.focused = self.focusable;
            self.focused
        }
        fn resign_focus(&mut self) {
            self.focused = false;
        }
        fn is_secure_entry(&self) -> bool {
            self.secure
        }
        fn set_secure_entry(&mut self, secure: bool) {
            self.secure = secure;
        }
        fn apply_options(&mut self, _options: &TextFieldOptions) {}
    }

    fn focusable() -> TestWidget {
        TestWidget {
            focusable: true,
            ..TestWidget::default()
        }
    }

    fn bridge_with(
        runtime: &Runtime,
        state: FieldState,
        delegate: FieldDelegate,
    ) -> TextFieldBridge<TestWidget> {
        TextFieldBridge::new(runtime.handle(), state, TextFieldOptions::new(), delegate)
    }

    fn runtime() -> Runtime {
        Runtime::new(Arc::new(DefaultScheduler))
    }

    #[test]
    fn create_writes_value_and_initialises_shadow() {
        let runtime = runtime();
        let bridge = bridge_with(&runtime, FieldState::new("hello"), FieldDelegate::new());

        bridge.create_widget(focusable());

        assert_eq!(bridge.with_widget(|w| w.text()), Some("hello".to_string()));
        assert_eq!(bridge.shadow_text(), "hello");
        assert_eq!(bridge.with_widget(|w| w.focused), Some(false));
    }

    #[test]
    fn create_requests_focus_when_already_editing() {
        let runtime = runtime();
        let state = FieldState::new("").with_editing(true);
        let bridge = bridge_with(&runtime, state, FieldDelegate::new());

        bridge.create_widget(focusable());

        assert_eq!(bridge.with_widget(|w| w.focused), Some(true));
    }

    #[test]
    fn create_skips_focus_when_widget_cannot_focus() {
        let runtime = runtime();
        let state = FieldState::new("").with_editing(true);
        let bridge = bridge_with(&runtime, state, FieldDelegate::new());

        bridge.create_widget(TestWidget::default());

        assert_eq!(bridge.with_widget(|w| w.focused), Some(false));
    }

    #[test]
    fn update_without_widget_is_an_error() {
        let runtime = runtime();
        let bridge = bridge_with(&runtime, FieldState::new(""), FieldDelegate::new());
        assert_eq!(bridge.update(), Err(BridgeError::WidgetNotCreated));
    }

    #[test]
    fn accept_updates_state_and_shadow() {
        let runtime = runtime();
        let state = FieldState::new("ab");
        let bridge = bridge_with(&runtime, state.clone(), FieldDelegate::new());
        bridge.create_widget(focusable());

        assert!(bridge.should_change_text("ab", TextRange::new(1, 1), "c"));

        assert_eq!(state.value(), "acb");
        assert_eq!(bridge.shadow_text(), "acb");
    }

    #[test]
    fn reject_leaves_state_and_shadow() {
        let runtime = runtime();
        let state = FieldState::new("ab");
        let delegate = FieldDelegate::new().on_propose_change(|_| EditDecision::Reject);
        let bridge = bridge_with(&runtime, state.clone(), delegate);
        bridge.create_widget(focusable());

        assert!(!bridge.should_change_text("ab", TextRange::new(1, 1), "c"));

        assert_eq!(state.value(), "ab");
        assert_eq!(bridge.shadow_text(), "ab");
    }

    #[test]
    fn replace_is_deferred_until_drain() {
        let runtime = runtime();
        let state = FieldState::new("ab");
        let delegate =
            FieldDelegate::new().on_propose_change(|_| EditDecision::Replace("XYZ".into()));
        let bridge = bridge_with(&runtime, state.clone(), delegate);
        bridge.create_widget(focusable());

        assert!(!bridge.should_change_text("ab", TextRange::new(1, 1), "c"));
        assert_eq!(state.value(), "ab");
        assert_eq!(bridge.with_widget(|w| w.text()), Some("ab".to_string()));

        runtime.handle().drain_ui();

        assert_eq!(state.value(), "XYZ");
        assert_eq!(bridge.shadow_text(), "XYZ");
        assert_eq!(bridge.with_widget(|w| w.text()), Some("XYZ".to_string()));
    }

    #[test]
    fn replace_for_recreated_widget_is_dropped() {
        let runtime = runtime();
        let state = FieldState::new("ab");
        let delegate =
            FieldDelegate::new().on_propose_change(|_| EditDecision::Replace("XYZ".into()));
        let bridge = bridge_with(&runtime, state.clone(), delegate);
        bridge.create_widget(focusable());

        bridge.should_change_text("ab", TextRange::cursor(2), "c");
        bridge.create_widget(focusable());
        runtime.handle().drain_ui();

        assert_eq!(state.value(), "ab");
        assert_eq!(bridge.with_widget(|w| w.text()), Some("ab".to_string()));
    }

    #[test]
    fn update_unfocused_overwrites_and_is_idempotent() {
        let runtime = runtime();
        let state = FieldState::new("same");
        let bridge = bridge_with(&runtime, state.clone(), FieldDelegate::new());
        bridge.create_widget(focusable());

        bridge.update().unwrap();
        bridge.update().unwrap();

        assert_eq!(bridge.with_widget(|w| w.text()), Some("same".to_string()));
        assert_eq!(bridge.shadow_text(), "same");
    }

    #[test]
    fn update_focused_keeps_live_buffer_when_value_matches_shadow() {
        let runtime = runtime();
        let state = FieldState::new("ab");
        let bridge = bridge_with(&runtime, state.clone(), FieldDelegate::new());
        bridge.create_widget(focusable());
        bridge.with_widget_mut(|w| w.request_focus());
        bridge.did_begin_editing();

        // The native edit lands in the widget after the bridge accepted it.
        assert!(bridge.should_change_text("ab", TextRange::cursor(2), "c"));
        bridge.with_widget_mut(|w| w.text = "abc".into());
        let writes_before = bridge.with_widget(|w| w.writes).unwrap();

        bridge.update().unwrap();

        assert_eq!(bridge.with_widget(|w| w.writes), Some(writes_before));
        assert_eq!(bridge.with_widget(|w| w.text()), Some("abc".to_string()));
    }

    #[test]
    fn update_focused_pushes_external_change() {
        let runtime = runtime();
        let state = FieldState::new("draft");
        let bridge = bridge_with(&runtime, state.clone(), FieldDelegate::new());
        bridge.create_widget(focusable());
        bridge.with_widget_mut(|w| w.request_focus());
        bridge.did_begin_editing();

        state.set_value("");
        bridge.update().unwrap();

        assert_eq!(bridge.with_widget(|w| w.text()), Some(String::new()));
        assert_eq!(bridge.shadow_text(), "");
    }

    #[test]
    fn entering_secure_mode_while_focused_rewrites_text() {
        let runtime = runtime();
        let state = FieldState::new("secret");
        let bridge = bridge_with(&runtime, state.clone(), FieldDelegate::new());
        bridge.create_widget(focusable());
        bridge.with_widget_mut(|w| w.request_focus());
        bridge.did_begin_editing();
        let writes_before = bridge.with_widget(|w| w.writes).unwrap();

        state.set_secure(true);
        bridge.update().unwrap();

        assert_eq!(bridge.with_widget(|w| w.secure), Some(true));
        assert_eq!(bridge.with_widget(|w| w.writes), Some(writes_before + 1));
        assert_eq!(bridge.with_widget(|w| w.text()), Some("secret".to_string()));
    }

    #[test]
    fn leaving_secure_mode_while_focused_keeps_buffer() {
        let runtime = runtime();
        let state = FieldState::new("secret").with_secure(true);
        let bridge = bridge_with(&runtime, state.clone(), FieldDelegate::new());
        bridge.create_widget(focusable());
        bridge.with_widget_mut(|w| w.request_focus());
        bridge.did_begin_editing();
        let writes_before = bridge.with_widget(|w| w.writes).unwrap();

        state.set_secure(false);
        bridge.update().unwrap();

        assert_eq!(bridge.with_widget(|w| w.secure), Some(false));
        assert_eq!(bridge.with_widget(|w| w.writes), Some(writes_before));
    }

    #[test]
    fn begin_and_end_editing_toggle_flag_and_commit_text() {
        let runtime = runtime();
        let state = FieldState::new("");
        let bridge = bridge_with(&runtime, state.clone(), FieldDelegate::new());
        bridge.create_widget(focusable());

        bridge.did_begin_editing();
        assert!(state.is_editing());

        bridge.did_end_editing("final");
        assert!(!state.is_editing());
        assert_eq!(state.value(), "final");
        assert_eq!(bridge.shadow_text(), "final");
    }

    #[test]
    fn should_return_resigns_only_when_allowed() {
        let runtime = runtime();
        let allow = Rc::new(Cell::new(false));
        let allow_clone = allow.clone();
        let delegate = FieldDelegate::new().on_should_return(move || allow_clone.get());
        let bridge = bridge_with(&runtime, FieldState::new(""), delegate);
        bridge.create_widget(focusable());
        bridge.with_widget_mut(|w| w.request_focus());

        assert!(!bridge.should_return());
        assert_eq!(bridge.with_widget(|w| w.focused), Some(true));

        allow.set(true);
        assert!(bridge.should_return());
        assert_eq!(bridge.with_widget(|w| w.focused), Some(false));
    }

    #[test]
    fn forced_editing_flag_drives_focus() {
        let runtime = runtime();
        let state = FieldState::new("");
        let bridge = bridge_with(&runtime, state.clone(), FieldDelegate::new());
        bridge.create_widget(focusable());

        state.set_editing(true);
        bridge.update().unwrap();
        assert_eq!(bridge.with_widget(|w| w.focused), Some(true));

        state.set_editing(false);
        bridge.update().unwrap();
        assert_eq!(bridge.with_widget(|w| w.focused), Some(false));
    }

    #[test]
    fn update_from_inside_widget_borrow_is_deferred() {
        let runtime = runtime();
        let state = FieldState::new("later");
        let bridge = bridge_with(&runtime, state.clone(), FieldDelegate::new());
        bridge.create_widget(TestWidget::default());
        bridge.with_widget_mut(|w| w.text = "stale".into());

        let inner_bridge = bridge.clone();
        bridge.with_widget_mut(|_| inner_bridge.update()).unwrap().unwrap();
        assert_eq!(bridge.with_widget(|w| w.text()), Some("stale".to_string()));

        runtime.handle().drain_ui();
        assert_eq!(bridge.with_widget(|w| w.text()), Some("later".to_string()));
    }

    #[test]
    fn set_options_applies_to_live_widget_without_touching_text() {
        let runtime = runtime();
        let bridge = bridge_with(&runtime, FieldState::new("keep"), FieldDelegate::new());
        bridge.create_widget(focusable());
        let writes_before = bridge.with_widget(|w| w.writes).unwrap();

        bridge.set_options(TextFieldOptions::new().with_placeholder("Name"));

        assert_eq!(bridge.options().placeholder.as_deref(), Some("Name"));
        assert_eq!(bridge.with_widget(|w| w.writes), Some(writes_before));
    }

    #[test]
    fn take_widget_detaches() {
        let runtime = runtime();
        let bridge = bridge_with(&runtime, FieldState::new("x"), FieldDelegate::new());
        bridge.create_widget(focusable());

        let widget = bridge.take_widget();

        assert!(widget.is_some());
        assert!(!bridge.has_widget());
    }

    #[test]
    fn replace_after_runtime_dropped_never_touches_widget() {
        let runtime = runtime();
        let state = FieldState::new("ab");
        let delegate =
            FieldDelegate::new().on_propose_change(|_| EditDecision::Replace("XYZ".into()));
        let bridge = bridge_with(&runtime, state.clone(), delegate);
        bridge.create_widget(focusable());
        drop(runtime);

        assert!(!bridge.should_change_text("ab", TextRange::cursor(2), "c"));

        assert_eq!(bridge.with_widget(|w| w.text()), Some("ab".to_string()));
        assert_eq!(state.value(), "ab");
    }

    #[test]
    fn reentrant_update_after_runtime_dropped_is_discarded() {
        let runtime = runtime();
        let bridge = bridge_with(&runtime, FieldState::new("later"), FieldDelegate::new());
        bridge.create_widget(TestWidget::default());
        bridge.with_widget_mut(|w| w.text = "stale".into());
        drop(runtime);

        let inner_bridge = bridge.clone();
        let result = bridge.with_widget_mut(|_| inner_bridge.update());

        assert_eq!(result, Some(Ok(())));
        assert_eq!(bridge.with_widget(|w| w.text()), Some("stale".to_string()));
    }

    #[test]
    fn update_before_focus_callback_keeps_user_focus() {
        let runtime = runtime();
        let state = FieldState::new("");
        let bridge = bridge_with(&runtime, state.clone(), FieldDelegate::new());
        bridge.create_widget(focusable());

        // The user tapped; the platform has not reported it yet.
        bridge.with_widget_mut(|w| w.focused = true);
        bridge.update().unwrap();

        assert_eq!(bridge.with_widget(|w| w.focused), Some(true));
        assert!(!state.is_editing());
    }

    #[test]
    fn platform_focus_changes_do_not_count_as_requests() {
        let runtime = runtime();
        let state = FieldState::new("");
        let bridge = bridge_with(&runtime, state.clone(), FieldDelegate::new());
        bridge.create_widget(focusable());
        bridge.with_widget_mut(|w| w.focused = true);
        bridge.did_begin_editing();
        bridge.update().unwrap();

        // The user leaves; the end callback has not arrived yet.
        bridge.with_widget_mut(|w| w.focused = false);
        bridge.update().unwrap();

        assert_eq!(bridge.with_widget(|w| w.focused), Some(false));
    }
}
