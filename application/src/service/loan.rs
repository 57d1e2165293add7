use error_stack::Report;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use kernel::interface::database::{
    DependOnDatabaseConnection, QueryDatabaseConnection, Transaction,
};
use kernel::interface::query::{
    BookQuery, DependOnBookQuery, DependOnLoanQuery, LoanFilter, LoanQuery,
};
use kernel::interface::update::{DependOnLoanModifier, LoanModifier};
use kernel::prelude::entity::{
    Book, BookId, Customer, CustomerEmail, Isbn, Loan, LoanDate, LoanId, Page, PageRequest,
    Returned,
};
use kernel::KernelError;

use crate::service::{page_request, require_text};
use crate::transfer::{
    CreateLoanDto, FindLoansDto, GetLateLoansDto, GetLoanDto, GetLoansByBookDto, LoanDto,
    ReturnLoanDto,
};

fn today() -> LoanDate {
    LoanDate::new(OffsetDateTime::now_utc().date())
}

/// The lending workflow: the only place where catalog and ledger state are
/// combined in one business rule.
#[async_trait::async_trait]
pub trait CreateLoanService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookQuery<Connection>
    + DependOnLoanQuery<Connection>
    + DependOnLoanModifier<Connection>
{
    /// All reads happen before the single insert; the active-loan check and
    /// the insert share one transaction so concurrent calls cannot both
    /// pass the check. Returns the new loan's id only.
    async fn create_loan(&self, dto: CreateLoanDto) -> error_stack::Result<Uuid, KernelError> {
        require_text("customer", &dto.customer)?;

        let mut connection = self.database_connection().transact().await?;

        let isbn = Isbn::new(dto.isbn);
        let book = self
            .book_query()
            .find_by_isbn(&mut connection, &isbn)
            .await?
            .ok_or_else(|| Report::new(KernelError::Reference("book not found for isbn".into())))?;

        if self
            .loan_query()
            .exists_active_by_book_id(&mut connection, book.id())
            .await?
        {
            return Err(Report::new(KernelError::BusinessRule(
                "book already loaned".into(),
            )));
        }

        let id = Uuid::new_v4();
        let loan = Loan::new(
            LoanId::new(id),
            book.id().clone(),
            Customer::new(dto.customer),
            dto.customer_email.map(CustomerEmail::new),
            today(),
            Returned::default(),
        );
        self.loan_modifier().create(&mut connection, &loan).await?;
        connection.commit().await?;

        Ok(id)
    }
}

impl<Connection: Transaction + Send, T> CreateLoanService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBookQuery<Connection>
        + DependOnLoanQuery<Connection>
        + DependOnLoanModifier<Connection>
{
}

#[async_trait::async_trait]
pub trait ReturnLoanService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnLoanQuery<Connection>
    + DependOnLoanModifier<Connection>
{
    /// Sets the returned flag and nothing else. Re-returning a loan is a
    /// no-op rather than an error.
    async fn return_loan(&self, dto: ReturnLoanDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = LoanId::new(dto.id);
        let loan = self
            .loan_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| Report::new(KernelError::NotFound("loan not found".into())))?;

        let loan = loan.reconstruct(|l| l.returned = Returned::new(dto.returned));
        self.loan_modifier().update(&mut connection, &loan).await?;
        connection.commit().await?;

        Ok(())
    }
}

impl<Connection: Transaction + Send, T> ReturnLoanService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnLoanQuery<Connection>
        + DependOnLoanModifier<Connection>
{
}

#[async_trait::async_trait]
pub trait GetLoanService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookQuery<Connection>
    + DependOnLoanQuery<Connection>
{
    async fn get_loan(&self, dto: GetLoanDto) -> error_stack::Result<Option<LoanDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = LoanId::new(dto.id);
        let loan = self.loan_query().find_by_id(&mut connection, &id).await?;
        match loan {
            None => Ok(None),
            Some(loan) => {
                let book = resolve_book(self.book_query(), &mut connection, loan.book_id()).await?;
                Ok(Some(LoanDto::new(loan, book)))
            }
        }
    }

    async fn get_loans_by_book(
        &self,
        dto: GetLoansByBookDto,
    ) -> error_stack::Result<Page<LoanDto>, KernelError> {
        let page = page_request(dto.page, dto.size);
        let mut connection = self.database_connection().transact().await?;

        let book_id = BookId::new(dto.book_id);
        let loans = self
            .loan_query()
            .find_by_book_id(&mut connection, &book_id, &page)
            .await?;

        attach_books(self.book_query(), &mut connection, loans).await
    }
}

impl<Connection: Transaction + Send, T> GetLoanService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBookQuery<Connection>
        + DependOnLoanQuery<Connection>
{
}

#[async_trait::async_trait]
pub trait FindLoansService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookQuery<Connection>
    + DependOnLoanQuery<Connection>
{
    async fn find_loans(
        &self,
        dto: FindLoansDto,
    ) -> error_stack::Result<Page<LoanDto>, KernelError> {
        let filter = LoanFilter::new(dto.isbn, dto.customer);
        let page = page_request(dto.page, dto.size);

        let mut connection = self.database_connection().transact().await?;

        let loans = self
            .loan_query()
            .find_all(&mut connection, &filter, &page)
            .await?;

        attach_books(self.book_query(), &mut connection, loans).await
    }
}

impl<Connection: Transaction + Send, T> FindLoansService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBookQuery<Connection>
        + DependOnLoanQuery<Connection>
{
}

#[async_trait::async_trait]
pub trait LateLoanService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookQuery<Connection>
    + DependOnLoanQuery<Connection>
{
    /// Outstanding loans older than the configured loan period.
    async fn get_late_loans(
        &self,
        dto: GetLateLoansDto,
    ) -> error_stack::Result<Vec<LoanDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let days = *dto.period.as_ref();
        let cutoff = LoanDate::new(OffsetDateTime::now_utc().date() - Duration::days(days));
        let loans = self
            .loan_query()
            .find_late(&mut connection, &cutoff)
            .await?;

        let mut late = Vec::with_capacity(loans.len());
        for loan in loans {
            let book = resolve_book(self.book_query(), &mut connection, loan.book_id()).await?;
            late.push(LoanDto::new(loan, book));
        }
        Ok(late)
    }
}

impl<Connection: Transaction + Send, T> LateLoanService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBookQuery<Connection>
        + DependOnLoanQuery<Connection>
{
}

async fn resolve_book<Connection: Transaction + Send>(
    query: &impl BookQuery<Connection>,
    connection: &mut Connection,
    book_id: &BookId,
) -> error_stack::Result<Book, KernelError> {
    query
        .find_by_id(connection, book_id)
        .await?
        .ok_or_else(|| {
            Report::new(KernelError::Internal).attach_printable("loan references a missing book")
        })
}

/// Resolves the referenced book for every loan in the page, explicitly and
/// page-bounded, instead of navigating a lazy entity edge.
async fn attach_books<Connection: Transaction + Send>(
    query: &impl BookQuery<Connection>,
    connection: &mut Connection,
    loans: Page<Loan>,
) -> error_stack::Result<Page<LoanDto>, KernelError> {
    let (loans, number, size, total_elements) = loans.into_parts();
    let mut content = Vec::with_capacity(loans.len());
    for loan in loans {
        let book = resolve_book(query, connection, loan.book_id()).await?;
        content.push(LoanDto::new(loan, book));
    }
    Ok(Page::new(
        content,
        PageRequest::new(number, size),
        total_elements,
    ))
}
