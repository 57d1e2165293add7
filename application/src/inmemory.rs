//! In-memory implementations of the kernel storage contracts, enough to run
//! the use-case services without a database.

use std::sync::{Arc, Mutex, MutexGuard};

use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use kernel::interface::database::{QueryDatabaseConnection, Transaction};
use kernel::interface::query::{
    BookFilter, BookQuery, DependOnBookQuery, DependOnLoanQuery, LoanFilter, LoanQuery,
};
use kernel::interface::update::{
    BookModifier, DependOnBookModifier, DependOnLoanModifier, LoanModifier,
};
use kernel::prelude::entity::{
    Book, BookAuthor, BookId, BookTitle, Customer, Isbn, Loan, LoanDate, LoanId, Page, PageRequest,
    Returned,
};
use kernel::KernelError;

#[derive(Debug, Default)]
pub(crate) struct Store {
    pub books: Vec<Book>,
    pub loans: Vec<Loan>,
}

#[derive(Clone, Default)]
pub(crate) struct InMemoryDatabase(Arc<Mutex<Store>>);

impl InMemoryDatabase {
    pub fn store(&self) -> MutexGuard<'_, Store> {
        self.0.lock().expect("store lock poisoned")
    }
}

pub(crate) struct InMemoryTransaction(Arc<Mutex<Store>>);

impl InMemoryTransaction {
    fn store(&self) -> MutexGuard<'_, Store> {
        self.0.lock().expect("store lock poisoned")
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

#[async_trait::async_trait]
impl QueryDatabaseConnection<InMemoryTransaction> for InMemoryDatabase {
    async fn transact(&self) -> error_stack::Result<InMemoryTransaction, KernelError> {
        Ok(InMemoryTransaction(Arc::clone(&self.0)))
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub(crate) struct InMemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery<InMemoryTransaction> for InMemoryBookRepository {
    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con.store().books.iter().find(|b| b.id() == id).cloned())
    }

    async fn find_by_isbn(
        &self,
        con: &mut InMemoryTransaction,
        isbn: &Isbn,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con.store().books.iter().find(|b| b.isbn() == isbn).cloned())
    }

    async fn exists_by_isbn(
        &self,
        con: &mut InMemoryTransaction,
        isbn: &Isbn,
    ) -> error_stack::Result<bool, KernelError> {
        Ok(con.store().books.iter().any(|b| b.isbn() == isbn))
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
        filter: &BookFilter,
        page: &PageRequest,
    ) -> error_stack::Result<Page<Book>, KernelError> {
        let books = con
            .store()
            .books
            .iter()
            .filter(|book| {
                filter
                    .title()
                    .as_ref()
                    .map_or(true, |t| contains_ci(book.title().as_ref(), t))
                    && filter
                        .author()
                        .as_ref()
                        .map_or(true, |a| contains_ci(book.author().as_ref(), a))
            })
            .cloned()
            .collect::<Vec<_>>();
        Ok(page.slice(books))
    }
}

#[async_trait::async_trait]
impl BookModifier<InMemoryTransaction> for InMemoryBookRepository {
    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        con.store().books.push(book.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        let mut store = con.store();
        if let Some(slot) = store.books.iter_mut().find(|b| b.id() == book.id()) {
            *slot = book.clone();
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        con.store().books.retain(|b| b.id() != book_id);
        Ok(())
    }
}

pub(crate) struct InMemoryLoanRepository;

#[async_trait::async_trait]
impl LoanQuery<InMemoryTransaction> for InMemoryLoanRepository {
    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &LoanId,
    ) -> error_stack::Result<Option<Loan>, KernelError> {
        Ok(con.store().loans.iter().find(|l| l.id() == id).cloned())
    }

    async fn find_by_book_id(
        &self,
        con: &mut InMemoryTransaction,
        book_id: &BookId,
        page: &PageRequest,
    ) -> error_stack::Result<Page<Loan>, KernelError> {
        let loans = con
            .store()
            .loans
            .iter()
            .filter(|l| l.book_id() == book_id)
            .cloned()
            .collect::<Vec<_>>();
        Ok(page.slice(loans))
    }

    async fn exists_by_book_id(
        &self,
        con: &mut InMemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<bool, KernelError> {
        Ok(con.store().loans.iter().any(|l| l.book_id() == book_id))
    }

    async fn exists_active_by_book_id(
        &self,
        con: &mut InMemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<bool, KernelError> {
        Ok(con
            .store()
            .loans
            .iter()
            .any(|l| l.book_id() == book_id && l.is_active()))
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
        filter: &LoanFilter,
        page: &PageRequest,
    ) -> error_stack::Result<Page<Loan>, KernelError> {
        let store = con.store();
        let loans = store
            .loans
            .iter()
            .filter(|loan| {
                match (filter.isbn().as_deref(), filter.customer().as_deref()) {
                    (None, None) => true,
                    (isbn, customer) => {
                        let isbn_match = isbn.map_or(false, |i| {
                            store
                                .books
                                .iter()
                                .any(|b| b.id() == loan.book_id() && b.isbn().as_ref().as_str() == i)
                        });
                        let customer_match =
                            customer.map_or(false, |c| loan.customer().as_ref().as_str() == c);
                        isbn_match || customer_match
                    }
                }
            })
            .cloned()
            .collect::<Vec<_>>();
        Ok(page.slice(loans))
    }

    async fn find_late(
        &self,
        con: &mut InMemoryTransaction,
        cutoff: &LoanDate,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        Ok(con
            .store()
            .loans
            .iter()
            .filter(|l| l.loan_date() < cutoff && l.is_active())
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl LoanModifier<InMemoryTransaction> for InMemoryLoanRepository {
    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError> {
        con.store().loans.push(loan.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError> {
        let mut store = con.store();
        if let Some(slot) = store.loans.iter_mut().find(|l| l.id() == loan.id()) {
            *slot = loan.clone();
        }
        Ok(())
    }
}

pub(crate) struct InMemoryModule {
    database: InMemoryDatabase,
    books: InMemoryBookRepository,
    loans: InMemoryLoanRepository,
}

impl InMemoryModule {
    pub fn new() -> Self {
        Self {
            database: InMemoryDatabase::default(),
            books: InMemoryBookRepository,
            loans: InMemoryLoanRepository,
        }
    }

    pub fn database(&self) -> &InMemoryDatabase {
        &self.database
    }

    pub fn seed_book(&self, title: &str, author: &str, isbn: &str) -> Book {
        let book = Book::new(
            BookId::new(Uuid::new_v4()),
            BookTitle::new(title),
            BookAuthor::new(author),
            Isbn::new(isbn),
        );
        self.database.store().books.push(book.clone());
        book
    }

    pub fn seed_loan(
        &self,
        book_id: BookId,
        customer: &str,
        days_ago: i64,
        returned: Option<bool>,
    ) -> Loan {
        let date = OffsetDateTime::now_utc().date() - Duration::days(days_ago);
        let loan = Loan::new(
            LoanId::new(Uuid::new_v4()),
            book_id,
            Customer::new(customer),
            None,
            LoanDate::new(date),
            Returned::new(returned),
        );
        self.database.store().loans.push(loan.clone());
        loan
    }
}

#[async_trait::async_trait]
impl QueryDatabaseConnection<InMemoryTransaction> for InMemoryModule {
    async fn transact(&self) -> error_stack::Result<InMemoryTransaction, KernelError> {
        self.database.transact().await
    }
}

impl DependOnBookQuery<InMemoryTransaction> for InMemoryModule {
    type BookQuery = InMemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &self.books
    }
}

impl DependOnBookModifier<InMemoryTransaction> for InMemoryModule {
    type BookModifier = InMemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &self.books
    }
}

impl DependOnLoanQuery<InMemoryTransaction> for InMemoryModule {
    type LoanQuery = InMemoryLoanRepository;
    fn loan_query(&self) -> &Self::LoanQuery {
        &self.loans
    }
}

impl DependOnLoanModifier<InMemoryTransaction> for InMemoryModule {
    type LoanModifier = InMemoryLoanRepository;
    fn loan_modifier(&self) -> &Self::LoanModifier {
        &self.loans
    }
}
