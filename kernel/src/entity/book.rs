mod author;
mod id;
mod isbn;
mod title;

pub use self::{author::*, id::*, isbn::*, title::*};
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    isbn: Isbn,
}

impl Book {
    pub fn new(id: BookId, title: BookTitle, author: BookAuthor, isbn: Isbn) -> Self {
        Self {
            id,
            title,
            author,
            isbn,
        }
    }
}
