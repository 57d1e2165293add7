use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{
    DependOnDatabaseConnection, QueryDatabaseConnection, Transaction,
};
use kernel::interface::query::{
    BookFilter, BookQuery, DependOnBookQuery, DependOnLoanQuery, LoanQuery,
};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{Book, BookAuthor, BookId, BookTitle, Isbn, Page};
use kernel::KernelError;

use crate::service::{page_request, require_text};
use crate::transfer::{
    BookDto, CreateBookDto, DeleteBookDto, FindBooksDto, GetBookByIsbnDto, GetBookDto,
    UpdateBookDto,
};

#[async_trait::async_trait]
pub trait CreateBookService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookQuery<Connection>
    + DependOnBookModifier<Connection>
{
    /// Registers a book. ISBN uniqueness is enforced here, not by storage,
    /// so the catalog itself stays a dumb store.
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        require_text("title", &dto.title)?;
        require_text("author", &dto.author)?;
        require_text("isbn", &dto.isbn)?;

        let mut connection = self.database_connection().transact().await?;

        let isbn = Isbn::new(dto.isbn);
        if self
            .book_query()
            .exists_by_isbn(&mut connection, &isbn)
            .await?
        {
            return Err(Report::new(KernelError::BusinessRule(
                "isbn already registered".into(),
            )));
        }

        let book = Book::new(
            BookId::new(Uuid::new_v4()),
            BookTitle::new(dto.title),
            BookAuthor::new(dto.author),
            isbn,
        );
        self.book_modifier().create(&mut connection, &book).await?;
        connection.commit().await?;

        Ok(BookDto::from(book))
    }
}

impl<Connection: Transaction + Send, T> CreateBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBookQuery<Connection>
        + DependOnBookModifier<Connection>
{
}

#[async_trait::async_trait]
pub trait GetBookService<Connection: Transaction + Send>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection> + DependOnBookQuery<Connection>
{
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let book = self.book_query().find_by_id(&mut connection, &id).await?;

        Ok(book.map(BookDto::from))
    }

    async fn get_book_by_isbn(
        &self,
        dto: GetBookByIsbnDto,
    ) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let isbn = Isbn::new(dto.isbn);
        let book = self
            .book_query()
            .find_by_isbn(&mut connection, &isbn)
            .await?;

        Ok(book.map(BookDto::from))
    }
}

impl<Connection: Transaction + Send, T> GetBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnBookQuery<Connection>
{
}

#[async_trait::async_trait]
pub trait UpdateBookService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookQuery<Connection>
    + DependOnBookModifier<Connection>
{
    /// Replaces title and author. Identifier and ISBN are immutable.
    async fn update_book(&self, dto: UpdateBookDto) -> error_stack::Result<BookDto, KernelError> {
        require_text("title", &dto.title)?;
        require_text("author", &dto.author)?;

        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let book = self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| Report::new(KernelError::NotFound("book not found".into())))?;

        let book = book.reconstruct(|b| {
            b.title = BookTitle::new(dto.title);
            b.author = BookAuthor::new(dto.author);
        });
        self.book_modifier().update(&mut connection, &book).await?;
        connection.commit().await?;

        Ok(BookDto::from(book))
    }
}

impl<Connection: Transaction + Send, T> UpdateBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBookQuery<Connection>
        + DependOnBookModifier<Connection>
{
}

#[async_trait::async_trait]
pub trait DeleteBookService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookQuery<Connection>
    + DependOnBookModifier<Connection>
    + DependOnLoanQuery<Connection>
{
    /// Deletion is refused while any loan, active or returned, still
    /// references the book, so the ledger never holds orphan records.
    async fn delete_book(&self, dto: DeleteBookDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let book = self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| Report::new(KernelError::NotFound("book not found".into())))?;

        if self
            .loan_query()
            .exists_by_book_id(&mut connection, book.id())
            .await?
        {
            return Err(Report::new(KernelError::BusinessRule(
                "book has loan history".into(),
            )));
        }

        self.book_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;

        Ok(())
    }
}

impl<Connection: Transaction + Send, T> DeleteBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBookQuery<Connection>
        + DependOnBookModifier<Connection>
        + DependOnLoanQuery<Connection>
{
}

#[async_trait::async_trait]
pub trait FindBooksService<Connection: Transaction + Send>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection> + DependOnBookQuery<Connection>
{
    async fn find_books(
        &self,
        dto: FindBooksDto,
    ) -> error_stack::Result<Page<BookDto>, KernelError> {
        let filter = BookFilter::new(dto.title, dto.author);
        let page = page_request(dto.page, dto.size);

        let mut connection = self.database_connection().transact().await?;

        let books = self
            .book_query()
            .find_all(&mut connection, &filter, &page)
            .await?;

        Ok(books.map(BookDto::from))
    }
}

impl<Connection: Transaction + Send, T> FindBooksService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnBookQuery<Connection>
{
}

#[cfg(test)]
mod test {
    use kernel::KernelError;

    use crate::inmemory::InMemoryModule;
    use crate::service::book::{
        CreateBookService, DeleteBookService, FindBooksService, GetBookService, UpdateBookService,
    };
    use crate::transfer::{
        CreateBookDto, DeleteBookDto, FindBooksDto, GetBookByIsbnDto, GetBookDto, UpdateBookDto,
    };

    fn create_dto(title: &str, author: &str, isbn: &str) -> CreateBookDto {
        CreateBookDto {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
        }
    }

    #[tokio::test]
    async fn created_book_round_trips_through_get() {
        let module = InMemoryModule::new();

        let created = module
            .create_book(create_dto("As aventuras", "Fulano", "123"))
            .await
            .expect("creation must succeed");

        let found = module
            .get_book(GetBookDto { id: created.id })
            .await
            .expect("lookup must succeed")
            .expect("book must exist");
        assert_eq!(found, created);
        assert_eq!(found.title, "As aventuras");
        assert_eq!(found.author, "Fulano");
        assert_eq!(found.isbn, "123");
    }

    #[tokio::test]
    async fn blank_required_field_is_rejected() {
        let module = InMemoryModule::new();

        let report = module
            .create_book(create_dto("", "Fulano", "123"))
            .await
            .expect_err("blank title must fail");
        assert!(matches!(
            report.current_context(),
            KernelError::Validation(_)
        ));
        assert!(module.database().store().books.is_empty());
    }

    #[tokio::test]
    async fn duplicate_isbn_is_a_business_rule_violation() {
        let module = InMemoryModule::new();
        module
            .create_book(create_dto("As aventuras", "Fulano", "123"))
            .await
            .expect("first creation must succeed");

        let report = module
            .create_book(create_dto("Other", "Beltrano", "123"))
            .await
            .expect_err("second isbn 123 must fail");
        assert!(matches!(
            report.current_context(),
            KernelError::BusinessRule(reason) if reason.as_str() == "isbn already registered"
        ));
        assert_eq!(module.database().store().books.len(), 1);
    }

    #[tokio::test]
    async fn lookup_by_isbn_finds_the_book() {
        let module = InMemoryModule::new();
        let created = module
            .create_book(create_dto("As aventuras", "Fulano", "1230"))
            .await
            .expect("creation must succeed");

        let found = module
            .get_book_by_isbn(GetBookByIsbnDto {
                isbn: "1230".into(),
            })
            .await
            .expect("lookup must succeed")
            .expect("book must exist");
        assert_eq!(found.id, created.id);

        let missing = module
            .get_book_by_isbn(GetBookByIsbnDto { isbn: "999".into() })
            .await
            .expect("lookup must succeed");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn update_replaces_title_and_author_but_never_isbn() {
        let module = InMemoryModule::new();
        let created = module
            .create_book(create_dto("As aventuras", "Fulano", "123"))
            .await
            .expect("creation must succeed");

        let updated = module
            .update_book(UpdateBookDto {
                id: created.id,
                title: "Some other title".into(),
                author: "Beltrano".into(),
            })
            .await
            .expect("update must succeed");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Some other title");
        assert_eq!(updated.author, "Beltrano");
        assert_eq!(updated.isbn, created.isbn);
    }

    #[tokio::test]
    async fn update_of_missing_book_is_not_found() {
        let module = InMemoryModule::new();

        let report = module
            .update_book(UpdateBookDto {
                id: uuid::Uuid::new_v4(),
                title: "Title".into(),
                author: "Author".into(),
            })
            .await
            .expect_err("missing book must fail");
        assert!(matches!(report.current_context(), KernelError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_a_book_without_loans() {
        let module = InMemoryModule::new();
        let created = module
            .create_book(create_dto("As aventuras", "Fulano", "123"))
            .await
            .expect("creation must succeed");

        module
            .delete_book(DeleteBookDto { id: created.id })
            .await
            .expect("delete must succeed");

        let found = module
            .get_book(GetBookDto { id: created.id })
            .await
            .expect("lookup must succeed");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn delete_is_blocked_while_loan_history_exists() {
        let module = InMemoryModule::new();
        let book = module.seed_book("As aventuras", "Fulano", "123");
        module.seed_loan(book.id().clone(), "Fulano", 0, Some(true));

        let report = module
            .delete_book(DeleteBookDto {
                id: *book.id().as_ref(),
            })
            .await
            .expect_err("history must block deletion");
        assert!(matches!(
            report.current_context(),
            KernelError::BusinessRule(reason) if reason.as_str() == "book has loan history"
        ));
        assert_eq!(module.database().store().books.len(), 1);
    }

    #[tokio::test]
    async fn find_books_matches_on_title_and_author() {
        let module = InMemoryModule::new();
        module.seed_book("As aventuras", "Artur", "123");
        module.seed_book("Unrelated", "Someone", "456");

        let page = module
            .find_books(FindBooksDto {
                title: Some("As aventuras".into()),
                author: Some("Artur".into()),
                page: Some(0),
                size: Some(100),
            })
            .await
            .expect("search must succeed");

        assert_eq!(page.content().len(), 1);
        assert_eq!(page.total_elements(), 1);
        assert_eq!(*page.number().as_ref(), 0);
        assert_eq!(*page.size().as_ref(), 100);
        assert_eq!(page.content()[0].isbn, "123");
    }

    #[tokio::test]
    async fn find_books_matches_substrings_case_insensitively() {
        let module = InMemoryModule::new();
        module.seed_book("As aventuras", "Artur", "123");

        let page = module
            .find_books(FindBooksDto {
                title: Some("aVenturas".into()),
                author: None,
                page: None,
                size: None,
            })
            .await
            .expect("search must succeed");
        assert_eq!(page.total_elements(), 1);
    }
}
