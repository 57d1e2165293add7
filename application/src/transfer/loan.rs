use time::Date;
use uuid::Uuid;

use kernel::prelude::entity::{Book, DestructLoan, Loan, LoanPeriod};

use crate::transfer::BookDto;

/// A loan with its referenced book resolved, ready for presentation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LoanDto {
    pub id: Uuid,
    pub book: BookDto,
    pub customer: String,
    pub customer_email: Option<String>,
    pub loan_date: Date,
    pub returned: Option<bool>,
}

impl LoanDto {
    pub fn new(loan: Loan, book: Book) -> Self {
        let DestructLoan {
            id,
            customer,
            customer_email,
            loan_date,
            returned,
            ..
        } = loan.into_destruct();
        Self {
            id: id.into(),
            book: BookDto::from(book),
            customer: customer.into(),
            customer_email: customer_email.map(Into::into),
            loan_date: loan_date.into(),
            returned: returned.into(),
        }
    }
}

pub struct CreateLoanDto {
    pub isbn: String,
    pub customer: String,
    pub customer_email: Option<String>,
}

pub struct GetLoanDto {
    pub id: Uuid,
}

pub struct ReturnLoanDto {
    pub id: Uuid,
    pub returned: bool,
}

pub struct FindLoansDto {
    pub isbn: Option<String>,
    pub customer: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

pub struct GetLoansByBookDto {
    pub book_id: Uuid,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

pub struct GetLateLoansDto {
    pub period: LoanPeriod,
}
