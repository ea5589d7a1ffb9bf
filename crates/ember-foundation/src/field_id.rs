use std::fmt;
use std::rc::Rc;

/// Opaque key that lets one delegate tell several fields apart.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(Rc<str>);

impl FieldId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Rc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for FieldId {
    fn from(id: String) -> Self {
        Self(Rc::from(id))
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
