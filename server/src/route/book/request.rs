use crate::controller::Intake;
use application::transfer::{
    CreateBookDto, DeleteBookDto, FindBooksDto, GetBookDto, GetLoansByBookDto, UpdateBookDto,
};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    title: String,
    author: String,
    isbn: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    title: String,
    author: String,
}

#[derive(Debug)]
pub struct GetRequest {
    id: Uuid,
}

impl GetRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteRequest {
    id: Uuid,
}

impl DeleteRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug, Deserialize)]
pub struct FindRequest {
    title: Option<String>,
    author: Option<String>,
    page: Option<i64>,
    size: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<i64>,
    size: Option<i64>,
}

#[derive(Debug)]
pub struct GetLoansRequest {
    id: Uuid,
    page: PageQuery,
}

impl GetLoansRequest {
    pub fn new(id: Uuid, page: PageQuery) -> Self {
        Self { id, page }
    }
}

pub struct Transformer;

impl Intake<CreateRequest> for Transformer {
    type To = CreateBookDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateBookDto {
            title: input.title,
            author: input.author,
            isbn: input.isbn,
        }
    }
}

impl Intake<(Uuid, UpdateRequest)> for Transformer {
    type To = UpdateBookDto;
    fn emit(&self, (id, input): (Uuid, UpdateRequest)) -> Self::To {
        UpdateBookDto {
            id,
            title: input.title,
            author: input.author,
        }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetBookDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetBookDto { id: input.id }
    }
}

impl Intake<DeleteRequest> for Transformer {
    type To = DeleteBookDto;
    fn emit(&self, input: DeleteRequest) -> Self::To {
        DeleteBookDto { id: input.id }
    }
}

impl Intake<FindRequest> for Transformer {
    type To = FindBooksDto;
    fn emit(&self, input: FindRequest) -> Self::To {
        FindBooksDto {
            title: input.title,
            author: input.author,
            page: input.page,
            size: input.size,
        }
    }
}

impl Intake<GetLoansRequest> for Transformer {
    type To = GetLoansByBookDto;
    fn emit(&self, input: GetLoansRequest) -> Self::To {
        GetLoansByBookDto {
            book_id: input.id,
            page: input.page.page,
            size: input.page.size,
        }
    }
}
