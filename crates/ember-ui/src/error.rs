/// Errors reported by [`TextFieldBridge`](crate::TextFieldBridge).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeError {
    /// The operation needs a native widget but none has been created yet.
    WidgetNotCreated,
}

impl std::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BridgeError::WidgetNotCreated => write!(f, "no native widget has been created"),
        }
    }
}

impl std::error::Error for BridgeError {}
