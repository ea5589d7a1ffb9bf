//! The seam between the bridge and a platform's editable text control.

use ember_foundation::TextFieldOptions;

/// A native, stateful, cursor-bearing text control.
///
/// Platform adapters implement this over the real widget; the bridge is its
/// only owner. Focus changes, edit proposals and return-key presses reach the
/// bridge through the platform's own callbacks
/// ([`TextFieldBridge::did_begin_editing`](crate::TextFieldBridge::did_begin_editing)
/// and friends).
///
/// Focus callbacks usually run after the method that triggered them returns,
/// but some platforms deliver them synchronously from inside
/// [`request_focus`](Self::request_focus) or
/// [`resign_focus`](Self::resign_focus). The bridge accepts both orders:
/// [`did_end_editing`](crate::TextFieldBridge::did_end_editing) receives the
/// final text instead of reading it back from the widget. No other method may
/// call back into the bridge.
pub trait NativeTextWidget: 'static {
    /// Text currently displayed (unmasked).
    fn text(&self) -> String;

    /// Replaces the displayed text. Programmatic writes do not produce edit
    /// proposals.
    fn set_text(&mut self, text: &str);

    fn is_focused(&self) -> bool;

    /// Whether the widget is currently able to take input focus (attached to
    /// a window, enabled, not hidden).
    fn can_become_focused(&self) -> bool;

    /// Asks for input focus. Returns `true` if the widget is focused afterwards.
    fn request_focus(&mut self) -> bool;

    fn resign_focus(&mut self);

    fn is_secure_entry(&self) -> bool;

    fn set_secure_entry(&mut self, secure: bool);

    /// Applies non-interactive presentation: font, colors, placeholder and
    /// keyboard/content hints.
    fn apply_options(&mut self, options: &TextFieldOptions);
}
