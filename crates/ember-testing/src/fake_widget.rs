//! Headless stand-in for a platform text control.
//!
//! `FakeTextWidget` behaves like the native widgets the bridge is written
//! against, including the parts that make synchronization hard:
//!
//! - focus changes triggered by the widget are reported back as queued
//!   [`WidgetEvent`]s, the way platforms deliver their focus callbacks after
//!   the triggering call returns;
//! - switching a focused widget into secure entry arms the platform quirk
//!   where the next keystroke replaces the whole text instead of inserting.
//!   Any programmatic `set_text` disarms it.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use ember_foundation::text::{apply_edit, prev_char_boundary, TextRange};
use ember_foundation::TextFieldOptions;
use ember_ui::NativeTextWidget;

/// Focus callbacks the widget owes the bridge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WidgetEvent {
    FocusGained,
    FocusLost,
}

/// One state of what the widget showed on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Displayed {
    pub text: String,
    pub masked: bool,
}

#[derive(Debug)]
struct FakeWidgetState {
    text: String,
    selection: TextRange,
    focused: bool,
    focusable: bool,
    secure: bool,
    erase_on_next_input: bool,
    options: Option<TextFieldOptions>,
    writes: usize,
    displayed: Vec<Displayed>,
    events: VecDeque<WidgetEvent>,
}

impl FakeWidgetState {
    fn record_display(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let entry = Displayed {
            text: self.text.clone(),
            masked: self.secure,
        };
        if self.displayed.last() != Some(&entry) {
            self.displayed.push(entry);
        }
    }
}

/// Cloneable handle to a fake native text widget.
///
/// The bridge owns one clone; tests keep another to drive and inspect it.
#[derive(Clone, Debug)]
pub struct FakeTextWidget {
    state: Rc<RefCell<FakeWidgetState>>,
}

impl Default for FakeTextWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeTextWidget {
    /// An empty, focusable widget.
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(FakeWidgetState {
                text: String::new(),
                selection: TextRange::cursor(0),
                focused: false,
                focusable: true,
                secure: false,
                erase_on_next_input: false,
                options: None,
                writes: 0,
                displayed: Vec::new(),
                events: VecDeque::new(),
            })),
        }
    }

    /// Controls whether the widget can take focus (e.g. not yet in a window).
    pub fn set_focusable(&self, focusable: bool) {
        self.state.borrow_mut().focusable = focusable;
    }

    pub fn selection(&self) -> TextRange {
        self.state.borrow().selection
    }

    pub fn place_cursor(&self, position: usize) {
        let mut state = self.state.borrow_mut();
        let range = TextRange::cursor(position).normalized_in(&state.text);
        state.selection = TextRange::cursor(range.start);
    }

    pub fn select(&self, range: TextRange) {
        let mut state = self.state.borrow_mut();
        state.selection = range.normalized_in(&state.text);
    }

    /// Number of programmatic `set_text` calls so far.
    pub fn writes(&self) -> usize {
        self.state.borrow().writes
    }

    pub fn options(&self) -> Option<TextFieldOptions> {
        self.state.borrow().options.clone()
    }

    /// Everything the widget has shown, in order.
    pub fn display_history(&self) -> Vec<Displayed> {
        self.state.borrow().displayed.clone()
    }

    /// True if `text` was ever on screen without masking.
    pub fn showed_unmasked(&self, text: &str) -> bool {
        self.state
            .borrow()
            .displayed
            .iter()
            .any(|entry| !entry.masked && entry.text == text)
    }

    /// True while the secure-entry quirk is armed.
    pub fn will_erase_on_next_input(&self) -> bool {
        self.state.borrow().erase_on_next_input
    }

    pub fn take_events(&self) -> Vec<WidgetEvent> {
        self.state.borrow_mut().events.drain(..).collect()
    }

    /// The user tapped the widget.
    pub fn user_focus(&self) {
        let mut state = self.state.borrow_mut();
        if state.focusable && !state.focused {
            state.focused = true;
            state.events.push_back(WidgetEvent::FocusGained);
        }
    }

    /// The user moved focus elsewhere.
    pub fn user_blur(&self) {
        self.resign_focus_inner();
    }

    /// The edit the platform would propose for typing `input` right now:
    /// `(current_text, range, replacement)`.
    pub fn propose_input(&self, input: &str) -> (String, TextRange, String) {
        let state = self.state.borrow();
        let range = if state.erase_on_next_input {
            TextRange::all(state.text.len())
        } else {
            state.selection
        };
        (state.text.clone(), range, input.to_string())
    }

    /// The edit the platform would propose for a backspace, if any.
    pub fn propose_backspace(&self) -> Option<(String, TextRange, String)> {
        let state = self.state.borrow();
        let range = if state.erase_on_next_input {
            TextRange::all(state.text.len())
        } else if !state.selection.collapsed() {
            state.selection
        } else if state.selection.start == 0 {
            return None;
        } else {
            let end = state.selection.start;
            TextRange::new(prev_char_boundary(&state.text, end), end)
        };
        Some((state.text.clone(), range, String::new()))
    }

    /// Applies an edit the bridge allowed, as the native widget would.
    pub fn apply_native_edit(&self, range: TextRange, replacement: &str) {
        let mut state = self.state.borrow_mut();
        let range = range.normalized_in(&state.text);
        state.text = apply_edit(&state.text, range, replacement);
        state.selection = TextRange::cursor(range.start + replacement.len());
        state.erase_on_next_input = false;
        state.record_display();
    }

    fn resign_focus_inner(&self) {
        let mut state = self.state.borrow_mut();
        if state.focused {
            state.focused = false;
            state.erase_on_next_input = false;
            state.events.push_back(WidgetEvent::FocusLost);
        }
    }
}

impl NativeTextWidget for FakeTextWidget {
    fn text(&self) -> String {
        self.state.borrow().text.clone()
    }

    fn set_text(&mut self, text: &str) {
        let mut state = self.state.borrow_mut();
        state.text = text.to_string();
        state.selection = TextRange::cursor(text.len());
        state.erase_on_next_input = false;
        state.writes += 1;
        state.record_display();
    }

    fn is_focused(&self) -> bool {
        self.state.borrow().focused
    }

    fn can_become_focused(&self) -> bool {
        self.state.borrow().focusable
    }

    fn request_focus(&mut self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.focusable && !state.focused {
            state.focused = true;
            state.events.push_back(WidgetEvent::FocusGained);
        }
        state.focused
    }

    fn resign_focus(&mut self) {
        self.resign_focus_inner();
    }

    fn is_secure_entry(&self) -> bool {
        self.state.borrow().secure
    }

    fn set_secure_entry(&mut self, secure: bool) {
        let mut state = self.state.borrow_mut();
        if secure && !state.secure && state.focused {
            state.erase_on_next_input = true;
        }
        if state.secure != secure {
            state.secure = secure;
            state.record_display();
        }
    }

    fn apply_options(&mut self, options: &TextFieldOptions) {
        self.state.borrow_mut().options = Some(options.clone());
    }
}
