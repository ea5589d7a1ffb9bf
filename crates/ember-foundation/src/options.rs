//! Static presentation configuration for text fields.
//!
//! None of these values take part in synchronization; the bridge hands them to
//! the native widget once at creation and again whenever they change.

/// RGBA color with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    pub const BLACK: Color = Color(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color(0.0, 0.0, 0.0, 0.0);

    pub const fn with_alpha(self, alpha: f32) -> Color {
        Color(self.0, self.1, self.2, alpha)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Medium,
    Semibold,
    Bold,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    /// Family name; `None` selects the platform's system font.
    pub family: Option<String>,
    pub size: f32,
    pub weight: FontWeight,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: None,
            size: 16.0,
            weight: FontWeight::Regular,
        }
    }
}

/// Text colors per field state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldColors {
    pub text: Color,
    /// Text color while the field holds focus
    pub editing_text: Color,
    pub placeholder: Color,
    pub disabled_text: Color,
    /// Cursor and selection tint
    pub tint: Color,
}

impl Default for FieldColors {
    fn default() -> Self {
        Self {
            text: Color::BLACK,
            editing_text: Color::BLACK,
            placeholder: Color::BLACK.with_alpha(0.4),
            disabled_text: Color::BLACK.with_alpha(0.3),
            tint: Color(0.0, 0.48, 1.0, 1.0),
        }
    }
}

impl FieldColors {
    /// Color the widget should use for its text in the given state.
    pub fn text_color(&self, enabled: bool, editing: bool) -> Color {
        match (enabled, editing) {
            (false, _) => self.disabled_text,
            (true, true) => self.editing_text,
            (true, false) => self.text,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeyboardType {
    #[default]
    Default,
    Email,
    Number,
    Decimal,
    Phone,
    Url,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ReturnKey {
    #[default]
    Default,
    Done,
    Next,
    Go,
    Search,
    Send,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Capitalization {
    None,
    Words,
    #[default]
    Sentences,
    Characters,
}

/// Autofill hint passed to the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentType {
    Username,
    Password,
    NewPassword,
    OneTimeCode,
    Email,
    Phone,
    Name,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyboardOptions {
    pub keyboard_type: KeyboardType,
    pub return_key: ReturnKey,
    pub capitalization: Capitalization,
    pub autocorrect: bool,
}

impl Default for KeyboardOptions {
    fn default() -> Self {
        Self {
            keyboard_type: KeyboardType::Default,
            return_key: ReturnKey::Default,
            capitalization: Capitalization::Sentences,
            autocorrect: true,
        }
    }
}

impl KeyboardOptions {
    /// Keyboard suited to credentials: no capitalization or autocorrection.
    pub fn credentials() -> Self {
        Self {
            capitalization: Capitalization::None,
            autocorrect: false,
            ..Self::default()
        }
    }
}

/// Options for customizing text field appearance and input hints.
#[derive(Clone, Debug, PartialEq)]
pub struct TextFieldOptions {
    pub font: FontSpec,
    pub colors: FieldColors,
    pub placeholder: Option<String>,
    pub keyboard: KeyboardOptions,
    pub content_type: Option<ContentType>,
    pub enabled: bool,
}

impl Default for TextFieldOptions {
    fn default() -> Self {
        Self {
            font: FontSpec::default(),
            colors: FieldColors::default(),
            placeholder: None,
            keyboard: KeyboardOptions::default(),
            content_type: None,
            enabled: true,
        }
    }
}

impl TextFieldOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    pub fn with_colors(mut self, colors: FieldColors) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_keyboard(mut self, keyboard: KeyboardOptions) -> Self {
        self.keyboard = keyboard;
        self
    }

    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_options_are_enabled() {
        let options = TextFieldOptions::new();
        assert!(options.enabled);
        assert_eq!(options.placeholder, None);
    }

    #[test]
    fn builder_sets_fields() {
        let options = TextFieldOptions::new()
            .with_placeholder("Password")
            .with_keyboard(KeyboardOptions::credentials())
            .with_content_type(ContentType::Password);

        assert_eq!(options.placeholder.as_deref(), Some("Password"));
        assert!(!options.keyboard.autocorrect);
        assert_eq!(options.keyboard.capitalization, Capitalization::None);
        assert_eq!(options.content_type, Some(ContentType::Password));
    }

    #[test]
    fn text_color_follows_state() {
        let colors = FieldColors {
            editing_text: Color::WHITE,
            ..FieldColors::default()
        };
        assert_eq!(colors.text_color(true, true), Color::WHITE);
        assert_eq!(colors.text_color(true, false), Color::BLACK);
        assert_eq!(colors.text_color(false, true), colors.disabled_text);
    }
}
