use uuid::Uuid;

use kernel::prelude::entity::{Book, DestructBook};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: String,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            author,
            isbn,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
        }
    }
}

pub struct GetBookDto {
    pub id: Uuid,
}

pub struct GetBookByIsbnDto {
    pub isbn: String,
}

pub struct CreateBookDto {
    pub title: String,
    pub author: String,
    pub isbn: String,
}

pub struct UpdateBookDto {
    pub id: Uuid,
    pub title: String,
    pub author: String,
}

pub struct DeleteBookDto {
    pub id: Uuid,
}

pub struct FindBooksDto {
    pub title: Option<String>,
    pub author: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}
