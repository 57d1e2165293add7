mod customer;
mod id;
mod loan_date;
mod returned;

pub use self::{customer::*, id::*, loan_date::*, returned::*};
use destructure::{Destructure, Mutation};
use vodca::References;

use crate::entity::BookId;

/// A record of one customer borrowing one book. References the book by id;
/// the loan never owns the book's lifecycle.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Loan {
    id: LoanId,
    book_id: BookId,
    customer: Customer,
    customer_email: Option<CustomerEmail>,
    loan_date: LoanDate,
    returned: Returned,
}

impl Loan {
    pub fn new(
        id: LoanId,
        book_id: BookId,
        customer: Customer,
        customer_email: Option<CustomerEmail>,
        loan_date: LoanDate,
        returned: Returned,
    ) -> Self {
        Self {
            id,
            book_id,
            customer,
            customer_email,
            loan_date,
            returned,
        }
    }

    /// An active loan blocks further loans of the same book.
    pub fn is_active(&self) -> bool {
        !self.returned.is_returned()
    }
}
