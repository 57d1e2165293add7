use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Intended-unique within the catalog. Uniqueness is checked by the
/// create-book use case, not by storage.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Isbn(String);

impl Isbn {
    pub fn new(isbn: impl Into<String>) -> Self {
        Self(isbn.into())
    }
}
