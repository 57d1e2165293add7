use time::Date;
use vodca::{AsRefln, Fromln};

/// Date the loan was created, stamped by the workflow, never by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Fromln, AsRefln)]
pub struct LoanDate(Date);

impl LoanDate {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }
}
