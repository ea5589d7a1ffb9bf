//! Caller-owned state of a controlled text field.

use ember_core::{ListenerId, MutableState, RuntimeHandle};

use crate::FieldId;

/// Plain copy of a [`FieldState`] at one point in time.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FieldSnapshot {
    pub value: String,
    pub is_secure: bool,
    pub is_editing: bool,
}

/// Authoritative value and flags of one text field.
///
/// The application creates a `FieldState` alongside its field view and hands a
/// clone to the bridge. Both sides observe the same cells: the bridge writes
/// `value` and `is_editing` as the user edits, the application reads them to
/// drive the rest of the UI and may write them to force a change.
///
/// # Example
///
/// ```
/// use ember_foundation::{FieldId, FieldState};
///
/// let password = FieldState::new("")
///     .with_secure(true)
///     .with_identifier("password");
///
/// assert!(password.is_secure());
/// assert_eq!(password.identifier(), Some(&FieldId::new("password")));
/// ```
///
/// # Thread Safety
///
/// `FieldState` uses `Rc` internally and must stay on the UI thread.
#[derive(Clone)]
pub struct FieldState {
    value: MutableState<String>,
    is_secure: MutableState<bool>,
    is_editing: MutableState<bool>,
    identifier: Option<FieldId>,
}

impl std::fmt::Debug for FieldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the value of a secure field.
        let is_secure = self.is_secure();
        let mut debug = f.debug_struct("FieldState");
        if is_secure {
            debug.field("value", &"<redacted>");
        } else {
            self.value.with(|value| {
                debug.field("value", value);
            });
        }
        debug
            .field("is_secure", &is_secure)
            .field("is_editing", &self.is_editing())
            .field("identifier", &self.identifier)
            .finish()
    }
}

impl FieldState {
    /// Creates a plain, unfocused field attached to the current runtime.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: MutableState::new(value.into()),
            is_secure: MutableState::new(false),
            is_editing: MutableState::new(false),
            identifier: None,
        }
    }

    /// Creates a field whose changes schedule frames on `runtime`.
    pub fn new_in(value: impl Into<String>, runtime: RuntimeHandle) -> Self {
        Self {
            value: MutableState::new_in(value.into(), runtime.clone()),
            is_secure: MutableState::new_in(false, runtime.clone()),
            is_editing: MutableState::new_in(false, runtime),
            identifier: None,
        }
    }

    pub fn with_secure(self, is_secure: bool) -> Self {
        self.is_secure.set(is_secure);
        self
    }

    pub fn with_editing(self, is_editing: bool) -> Self {
        self.is_editing.set(is_editing);
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<FieldId>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn value(&self) -> String {
        self.value.get()
    }

    /// Reads the value without cloning it.
    pub fn with_value<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        self.value.with(|value| f(value))
    }

    /// Sets the value. Returns `true` if it changed.
    pub fn set_value(&self, value: impl Into<String>) -> bool {
        self.value.set(value.into())
    }

    pub fn is_secure(&self) -> bool {
        self.is_secure.get()
    }

    pub fn set_secure(&self, is_secure: bool) -> bool {
        self.is_secure.set(is_secure)
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing.get()
    }

    pub fn set_editing(&self, is_editing: bool) -> bool {
        self.is_editing.set(is_editing)
    }

    pub fn identifier(&self) -> Option<&FieldId> {
        self.identifier.as_ref()
    }

    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            value: self.value(),
            is_secure: self.is_secure(),
            is_editing: self.is_editing(),
        }
    }

    /// Observes value changes.
    pub fn add_value_listener(&self, listener: impl Fn(&String) + 'static) -> ListenerId {
        self.value.add_listener(listener)
    }

    pub fn remove_value_listener(&self, id: ListenerId) -> bool {
        self.value.remove_listener(id)
    }

    /// Observes focus changes.
    pub fn add_editing_listener(&self, listener: impl Fn(&bool) + 'static) -> ListenerId {
        self.is_editing.add_listener(listener)
    }

    pub fn remove_editing_listener(&self, id: ListenerId) -> bool {
        self.is_editing.remove_listener(id)
    }
}

impl Default for FieldState {
    fn default() -> Self {
        Self::new("")
    }
}

impl PartialEq for FieldState {
    fn eq(&self, other: &Self) -> bool {
        // Same state instance
        self.value == other.value
    }
}
