use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Days after which an outstanding loan counts as late.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct LoanPeriod(i64);

impl LoanPeriod {
    pub fn new(days: impl Into<i64>) -> Self {
        Self(days.into().max(1))
    }
}

impl Default for LoanPeriod {
    fn default() -> Self {
        Self(4)
    }
}
