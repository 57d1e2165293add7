use vodca::{AsRefln, Fromln};

/// Tri-state flag mirroring the nullable storage column: unset and `false`
/// both mean the loan is outstanding, `true` means it was returned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct Returned(Option<bool>);

impl Returned {
    pub fn new(value: impl Into<Option<bool>>) -> Self {
        Self(value.into())
    }

    pub fn is_returned(&self) -> bool {
        self.0.unwrap_or(false)
    }
}

impl Default for Returned {
    fn default() -> Self {
        Self(None)
    }
}
