use crate::controller::Intake;
use application::transfer::{CreateLoanDto, FindLoansDto, ReturnLoanDto};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    isbn: String,
    customer: String,
    customer_email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReturnRequest {
    returned: bool,
}

#[derive(Debug, Deserialize)]
pub struct FindRequest {
    isbn: Option<String>,
    customer: Option<String>,
    page: Option<i64>,
    size: Option<i64>,
}

pub struct Transformer;

impl Intake<CreateRequest> for Transformer {
    type To = CreateLoanDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateLoanDto {
            isbn: input.isbn,
            customer: input.customer,
            customer_email: input.customer_email,
        }
    }
}

impl Intake<(Uuid, ReturnRequest)> for Transformer {
    type To = ReturnLoanDto;
    fn emit(&self, (id, input): (Uuid, ReturnRequest)) -> Self::To {
        ReturnLoanDto {
            id,
            returned: input.returned,
        }
    }
}

impl Intake<FindRequest> for Transformer {
    type To = FindLoansDto;
    fn emit(&self, input: FindRequest) -> Self::To {
        FindLoansDto {
            isbn: input.isbn,
            customer: input.customer,
            page: input.page,
            size: input.size,
        }
    }
}
