use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Fromln, AsRefln)]
pub struct Customer(String);

impl Customer {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Fromln, AsRefln)]
pub struct CustomerEmail(String);

impl CustomerEmail {
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }
}
