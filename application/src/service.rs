mod book;
mod loan;

pub use self::{book::*, loan::*};

use error_stack::Report;

use kernel::prelude::entity::{PageNumber, PageRequest, PageSize};
use kernel::KernelError;

pub(crate) fn require_text(
    field: &'static str,
    value: &str,
) -> error_stack::Result<(), KernelError> {
    if value.trim().is_empty() {
        Err(Report::new(KernelError::Validation(format!(
            "{field} must not be empty"
        ))))
    } else {
        Ok(())
    }
}

pub(crate) fn page_request(page: Option<i64>, size: Option<i64>) -> PageRequest {
    PageRequest::new(
        page.map(PageNumber::new).unwrap_or_default(),
        size.map(PageSize::new).unwrap_or_default(),
    )
}
