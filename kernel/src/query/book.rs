use vodca::References;

use crate::database::Transaction;
use crate::entity::{Book, BookId, Isbn, Page, PageRequest};
use crate::KernelError;

/// Catalog search criteria. Absent fields impose no constraint; present
/// fields match as case-insensitive substrings.
#[derive(Debug, Clone, Default, Eq, PartialEq, References)]
pub struct BookFilter {
    title: Option<String>,
    author: Option<String>,
}

impl BookFilter {
    pub fn new(title: Option<String>, author: Option<String>) -> Self {
        Self { title, author }
    }
}

#[async_trait::async_trait]
pub trait BookQuery<Connection: Transaction>: Sync + Send + 'static {
    async fn find_by_id(
        &self,
        con: &mut Connection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError>;

    async fn find_by_isbn(
        &self,
        con: &mut Connection,
        isbn: &Isbn,
    ) -> error_stack::Result<Option<Book>, KernelError>;

    async fn exists_by_isbn(
        &self,
        con: &mut Connection,
        isbn: &Isbn,
    ) -> error_stack::Result<bool, KernelError>;

    async fn find_all(
        &self,
        con: &mut Connection,
        filter: &BookFilter,
        page: &PageRequest,
    ) -> error_stack::Result<Page<Book>, KernelError>;
}

pub trait DependOnBookQuery<Connection: Transaction>: Sync + Send + 'static {
    type BookQuery: BookQuery<Connection>;
    fn book_query(&self) -> &Self::BookQuery;
}
