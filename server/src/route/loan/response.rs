use crate::controller::Exhaust;
use crate::route::book::response::BookResponse;
use crate::route::page::PageResponse;
use application::transfer::LoanDto;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kernel::prelude::entity::Page;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct LoanResponse {
    id: Uuid,
    book: BookResponse,
    customer: String,
    customer_email: Option<String>,
    loan_date: String,
    returned: Option<bool>,
}

impl From<LoanDto> for LoanResponse {
    fn from(value: LoanDto) -> Self {
        Self {
            id: value.id,
            book: BookResponse::from(value.book),
            customer: value.customer,
            customer_email: value.customer_email,
            loan_date: value.loan_date.to_string(),
            returned: value.returned,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    id: Uuid,
}

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

pub struct CreatedPresenter;

impl Exhaust<Uuid> for CreatedPresenter {
    type To = CreatedResponse;
    fn emit(&self, input: Uuid) -> Self::To {
        CreatedResponse { id: input }
    }
}

pub struct Presenter;

impl Exhaust<Page<LoanDto>> for Presenter {
    type To = Json<PageResponse<LoanResponse>>;
    fn emit(&self, input: Page<LoanDto>) -> Self::To {
        Json(PageResponse::new(input, LoanResponse::from))
    }
}

impl Exhaust<Vec<LoanDto>> for Presenter {
    type To = Json<Vec<LoanResponse>>;
    fn emit(&self, input: Vec<LoanDto>) -> Self::To {
        Json(input.into_iter().map(LoanResponse::from).collect())
    }
}

impl Exhaust<()> for Presenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::OK
    }
}
