//! Delegation protocol for text field callbacks.
//!
//! A [`FieldDelegate`] bundles four decision points. Each has an unscoped
//! handler and an identifier-scoped override. A field that carries a
//! [`FieldId`] reaches the scoped handler first; otherwise, or when no scoped
//! handler is set, the unscoped one runs. With neither, the delegate is
//! permissive: edits are accepted and the return key is allowed.

use std::fmt;
use std::rc::Rc;

use ember_foundation::text::{apply_edit, TextRange};
use ember_foundation::FieldId;

/// Outcome of an edit proposal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditDecision {
    /// Let the native edit proceed and record its result.
    Accept,
    /// Veto the edit; the widget keeps its current text.
    Reject,
    /// Veto the edit, then set the whole text to the given value once the
    /// current edit pass has finished.
    Replace(String),
}

/// An edit the widget is about to apply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditProposal {
    current_text: String,
    range: TextRange,
    replacement: String,
}

impl EditProposal {
    /// Creates a proposal. The range is normalised against `current_text`.
    pub fn new(
        current_text: impl Into<String>,
        range: TextRange,
        replacement: impl Into<String>,
    ) -> Self {
        let current_text = current_text.into();
        let range = range.normalized_in(&current_text);
        Self {
            current_text,
            range,
            replacement: replacement.into(),
        }
    }

    pub fn current_text(&self) -> &str {
        &self.current_text
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// The text the widget would show if the edit were accepted.
    pub fn resulting_text(&self) -> String {
        apply_edit(&self.current_text, self.range, &self.replacement)
    }

    /// True for a pure deletion.
    pub fn is_deletion(&self) -> bool {
        self.replacement.is_empty() && !self.range.collapsed()
    }
}

type Handler<A, R> = Rc<dyn Fn(&A) -> R>;
type ScopedHandler<A, R> = Rc<dyn Fn(&FieldId, &A) -> R>;

/// One decision point: an unscoped handler plus an identifier-scoped override.
struct Hook<A, R> {
    unscoped: Option<Handler<A, R>>,
    scoped: Option<ScopedHandler<A, R>>,
}

impl<A, R> Hook<A, R> {
    fn resolve(&self, identifier: Option<&FieldId>, arg: &A) -> Option<R> {
        if let (Some(identifier), Some(scoped)) = (identifier, &self.scoped) {
            return Some(scoped(identifier, arg));
        }
        self.unscoped.as_ref().map(|handler| handler(arg))
    }

    fn is_set(&self) -> bool {
        self.unscoped.is_some() || self.scoped.is_some()
    }
}

impl<A, R> Default for Hook<A, R> {
    fn default() -> Self {
        Self {
            unscoped: None,
            scoped: None,
        }
    }
}

impl<A, R> Clone for Hook<A, R> {
    fn clone(&self) -> Self {
        Self {
            unscoped: self.unscoped.clone(),
            scoped: self.scoped.clone(),
        }
    }
}

/// Caller-supplied handlers for edit interception and focus/return events.
///
/// Cloning is cheap and shares the handlers, so one delegate can serve many
/// fields; give each field an identifier and use the `*_for` handlers to
/// tell them apart.
///
/// # Example
///
/// ```
/// use ember_foundation::{text::TextRange, FieldId};
/// use ember_ui::{EditDecision, EditProposal, FieldDelegate};
///
/// let delegate = FieldDelegate::new()
///     .on_propose_change_for(|id, proposal| {
///         if id.as_str() == "pin" && proposal.resulting_text().len() > 4 {
///             EditDecision::Reject
///         } else {
///             EditDecision::Accept
///         }
///     });
///
/// let pin = FieldId::new("pin");
/// let proposal = EditProposal::new("1234", TextRange::cursor(4), "5");
/// assert_eq!(delegate.propose_change(Some(&pin), &proposal), EditDecision::Reject);
/// assert_eq!(delegate.propose_change(None, &proposal), EditDecision::Accept);
/// ```
#[derive(Clone, Default)]
pub struct FieldDelegate {
    begin_edit: Hook<(), ()>,
    end_edit: Hook<(), ()>,
    should_return: Hook<(), bool>,
    propose_change: Hook<EditProposal, EditDecision>,
}

impl fmt::Debug for FieldDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDelegate")
            .field("begin_edit", &self.begin_edit.is_set())
            .field("end_edit", &self.end_edit.is_set())
            .field("should_return", &self.should_return.is_set())
            .field("propose_change", &self.propose_change.is_set())
            .finish()
    }
}

impl FieldDelegate {
    /// A delegate with no handlers: accepts every edit and allows return.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects edits that grow the text past `max_chars` characters.
    ///
    /// Text already over the limit (set by the application) can still be
    /// shortened.
    pub fn max_length(max_chars: usize) -> Self {
        Self::new().on_propose_change(move |proposal| {
            let result_chars = proposal.resulting_text().chars().count();
            let current_chars = proposal.current_text().chars().count();
            if result_chars <= max_chars || result_chars <= current_chars {
                EditDecision::Accept
            } else {
                EditDecision::Reject
            }
        })
    }

    /// Drops inserted characters that fail `keep`.
    ///
    /// Edits that insert only accepted characters pass through untouched;
    /// otherwise the field is set to the filtered result.
    pub fn filter(keep: impl Fn(char) -> bool + 'static) -> Self {
        Self::new().on_propose_change(move |proposal| {
            let filtered: String = proposal.replacement().chars().filter(|c| keep(*c)).collect();
            if filtered.len() == proposal.replacement().len() {
                EditDecision::Accept
            } else if filtered.is_empty() && proposal.range().collapsed() {
                EditDecision::Reject
            } else {
                EditDecision::Replace(apply_edit(
                    proposal.current_text(),
                    proposal.range(),
                    &filtered,
                ))
            }
        })
    }

    pub fn on_begin_edit(mut self, handler: impl Fn() + 'static) -> Self {
        self.begin_edit.unscoped = Some(Rc::new(move |_: &()| handler()));
        self
    }

    pub fn on_begin_edit_for(mut self, handler: impl Fn(&FieldId) + 'static) -> Self {
        self.begin_edit.scoped = Some(Rc::new(move |id: &FieldId, _: &()| handler(id)));
        self
    }

    pub fn on_end_edit(mut self, handler: impl Fn() + 'static) -> Self {
        self.end_edit.unscoped = Some(Rc::new(move |_: &()| handler()));
        self
    }

    pub fn on_end_edit_for(mut self, handler: impl Fn(&FieldId) + 'static) -> Self {
        self.end_edit.scoped = Some(Rc::new(move |id: &FieldId, _: &()| handler(id)));
        self
    }

    pub fn on_should_return(mut self, handler: impl Fn() -> bool + 'static) -> Self {
        self.should_return.unscoped = Some(Rc::new(move |_: &()| handler()));
        self
    }

    pub fn on_should_return_for(mut self, handler: impl Fn(&FieldId) -> bool + 'static) -> Self {
        self.should_return.scoped = Some(Rc::new(move |id: &FieldId, _: &()| handler(id)));
        self
    }

    pub fn on_propose_change(
        mut self,
        handler: impl Fn(&EditProposal) -> EditDecision + 'static,
    ) -> Self {
        self.propose_change.unscoped = Some(Rc::new(handler));
        self
    }

    pub fn on_propose_change_for(
        mut self,
        handler: impl Fn(&FieldId, &EditProposal) -> EditDecision + 'static,
    ) -> Self {
        self.propose_change.scoped = Some(Rc::new(handler));
        self
    }

    pub fn begin_edit(&self, identifier: Option<&FieldId>) {
        self.begin_edit.resolve(identifier, &());
    }

    pub fn end_edit(&self, identifier: Option<&FieldId>) {
        self.end_edit.resolve(identifier, &());
    }

    pub fn should_return(&self, identifier: Option<&FieldId>) -> bool {
        self.should_return.resolve(identifier, &()).unwrap_or(true)
    }

    pub fn propose_change(
        &self,
        identifier: Option<&FieldId>,
        proposal: &EditProposal,
    ) -> EditDecision {
        self.propose_change
            .resolve(identifier, proposal)
            .unwrap_or(EditDecision::Accept)
    }
}
