use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::{BookFilter, BookQuery};
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookAuthor, BookId, BookTitle, Isbn, Page, PageRequest};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::{ConvertError, DriverError};

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery<PostgresTransaction> for PostgresBookRepository {
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con.connection(), id)
            .await
            .convert_error()
    }

    async fn find_by_isbn(
        &self,
        con: &mut PostgresTransaction,
        isbn: &Isbn,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_isbn(con.connection(), isbn)
            .await
            .convert_error()
    }

    async fn exists_by_isbn(
        &self,
        con: &mut PostgresTransaction,
        isbn: &Isbn,
    ) -> error_stack::Result<bool, KernelError> {
        PgBookInternal::exists_by_isbn(con.connection(), isbn)
            .await
            .convert_error()
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
        filter: &BookFilter,
        page: &PageRequest,
    ) -> error_stack::Result<Page<Book>, KernelError> {
        PgBookInternal::find_all(con.connection(), filter, page)
            .await
            .convert_error()
    }
}

#[async_trait::async_trait]
impl BookModifier<PostgresTransaction> for PostgresBookRepository {
    async fn create(
        &self,
        con: &mut PostgresTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::create(con.connection(), book)
            .await
            .convert_error()
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::update(con.connection(), book)
            .await
            .convert_error()
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::delete(con.connection(), book_id)
            .await
            .convert_error()
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: Uuid,
    title: String,
    author: String,
    isbn: String,
}

impl From<BookRow> for Book {
    fn from(value: BookRow) -> Self {
        Book::new(
            BookId::new(value.id),
            BookTitle::new(value.title),
            BookAuthor::new(value.author),
            Isbn::new(value.isbn),
        )
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn find_by_id(con: &mut PgConnection, id: &BookId) -> Result<Option<Book>, DriverError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, isbn
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await?;
        Ok(row.map(Book::from))
    }

    async fn find_by_isbn(
        con: &mut PgConnection,
        isbn: &Isbn,
    ) -> Result<Option<Book>, DriverError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, isbn
            FROM books
            WHERE isbn = $1
            "#,
        )
        .bind(isbn.as_ref())
        .fetch_optional(con)
        .await?;
        Ok(row.map(Book::from))
    }

    async fn exists_by_isbn(con: &mut PgConnection, isbn: &Isbn) -> Result<bool, DriverError> {
        let exists = sqlx::query_scalar::<_, bool>(
            // language=postgresql
            r#"
            SELECT EXISTS (SELECT 1 FROM books WHERE isbn = $1)
            "#,
        )
        .bind(isbn.as_ref())
        .fetch_one(con)
        .await?;
        Ok(exists)
    }

    async fn find_all(
        con: &mut PgConnection,
        filter: &BookFilter,
        page: &PageRequest,
    ) -> Result<Page<Book>, DriverError> {
        let title = filter.title().as_deref();
        let author = filter.author().as_deref();
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, isbn
            FROM books
            WHERE ($1::text IS NULL OR title ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR author ILIKE '%' || $2 || '%')
            ORDER BY title, id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(title)
        .bind(author)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *con)
        .await?;
        let total = sqlx::query_scalar::<_, i64>(
            // language=postgresql
            r#"
            SELECT COUNT(*)
            FROM books
            WHERE ($1::text IS NULL OR title ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR author ILIKE '%' || $2 || '%')
            "#,
        )
        .bind(title)
        .bind(author)
        .fetch_one(&mut *con)
        .await?;
        let content = rows.into_iter().map(Book::from).collect();
        Ok(Page::new(content, page.clone(), total))
    }

    async fn create(con: &mut PgConnection, book: &Book) -> Result<(), DriverError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO books (id, title, author, isbn)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.isbn().as_ref())
        .execute(con)
        .await?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, book: &Book) -> Result<(), DriverError> {
        // Identifier and isbn are immutable; only title and author move.
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE books
            SET title = $2, author = $3
            WHERE id = $1
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .execute(con)
        .await?;
        Ok(())
    }

    async fn delete(con: &mut PgConnection, book_id: &BookId) -> Result<(), DriverError> {
        // language=postgresql
        sqlx::query(
            r#"
            DELETE FROM books
            WHERE id = $1
            "#,
        )
        .bind(book_id.as_ref())
        .execute(con)
        .await?;
        Ok(())
    }
}
