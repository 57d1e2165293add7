use sqlx::PgConnection;
use time::Date;
use uuid::Uuid;

use kernel::interface::query::{LoanFilter, LoanQuery};
use kernel::interface::update::LoanModifier;
use kernel::prelude::entity::{
    BookId, Customer, CustomerEmail, Loan, LoanDate, LoanId, Page, PageRequest, Returned,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::{ConvertError, DriverError};

pub struct PostgresLoanRepository;

#[async_trait::async_trait]
impl LoanQuery<PostgresTransaction> for PostgresLoanRepository {
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &LoanId,
    ) -> error_stack::Result<Option<Loan>, KernelError> {
        PgLoanInternal::find_by_id(con.connection(), id)
            .await
            .convert_error()
    }

    async fn find_by_book_id(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
        page: &PageRequest,
    ) -> error_stack::Result<Page<Loan>, KernelError> {
        PgLoanInternal::find_by_book_id(con.connection(), book_id, page)
            .await
            .convert_error()
    }

    async fn exists_by_book_id(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<bool, KernelError> {
        PgLoanInternal::exists_by_book_id(con.connection(), book_id)
            .await
            .convert_error()
    }

    async fn exists_active_by_book_id(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<bool, KernelError> {
        PgLoanInternal::exists_active_by_book_id(con.connection(), book_id)
            .await
            .convert_error()
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
        filter: &LoanFilter,
        page: &PageRequest,
    ) -> error_stack::Result<Page<Loan>, KernelError> {
        PgLoanInternal::find_all(con.connection(), filter, page)
            .await
            .convert_error()
    }

    async fn find_late(
        &self,
        con: &mut PostgresTransaction,
        cutoff: &LoanDate,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        PgLoanInternal::find_late(con.connection(), cutoff)
            .await
            .convert_error()
    }
}

#[async_trait::async_trait]
impl LoanModifier<PostgresTransaction> for PostgresLoanRepository {
    async fn create(
        &self,
        con: &mut PostgresTransaction,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError> {
        PgLoanInternal::create(con.connection(), loan)
            .await
            .convert_error()
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError> {
        PgLoanInternal::update(con.connection(), loan)
            .await
            .convert_error()
    }
}

#[derive(sqlx::FromRow)]
struct LoanRow {
    id: Uuid,
    book_id: Uuid,
    customer: String,
    customer_email: Option<String>,
    loan_date: Date,
    returned: Option<bool>,
}

impl From<LoanRow> for Loan {
    fn from(value: LoanRow) -> Self {
        Loan::new(
            LoanId::new(value.id),
            BookId::new(value.book_id),
            Customer::new(value.customer),
            value.customer_email.map(CustomerEmail::new),
            LoanDate::new(value.loan_date),
            Returned::new(value.returned),
        )
    }
}

pub(in crate::database) struct PgLoanInternal;

impl PgLoanInternal {
    async fn find_by_id(con: &mut PgConnection, id: &LoanId) -> Result<Option<Loan>, DriverError> {
        let row = sqlx::query_as::<_, LoanRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, customer, customer_email, loan_date, returned
            FROM loans
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await?;
        Ok(row.map(Loan::from))
    }

    async fn find_by_book_id(
        con: &mut PgConnection,
        book_id: &BookId,
        page: &PageRequest,
    ) -> Result<Page<Loan>, DriverError> {
        let rows = sqlx::query_as::<_, LoanRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, customer, customer_email, loan_date, returned
            FROM loans
            WHERE book_id = $1
            ORDER BY loan_date, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(book_id.as_ref())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *con)
        .await?;
        let total = sqlx::query_scalar::<_, i64>(
            // language=postgresql
            r#"
            SELECT COUNT(*) FROM loans WHERE book_id = $1
            "#,
        )
        .bind(book_id.as_ref())
        .fetch_one(&mut *con)
        .await?;
        let content = rows.into_iter().map(Loan::from).collect();
        Ok(Page::new(content, page.clone(), total))
    }

    async fn exists_by_book_id(
        con: &mut PgConnection,
        book_id: &BookId,
    ) -> Result<bool, DriverError> {
        let exists = sqlx::query_scalar::<_, bool>(
            // language=postgresql
            r#"
            SELECT EXISTS (SELECT 1 FROM loans WHERE book_id = $1)
            "#,
        )
        .bind(book_id.as_ref())
        .fetch_one(con)
        .await?;
        Ok(exists)
    }

    async fn exists_active_by_book_id(
        con: &mut PgConnection,
        book_id: &BookId,
    ) -> Result<bool, DriverError> {
        // IS NOT TRUE keeps rows whose flag was never set counted as active.
        let exists = sqlx::query_scalar::<_, bool>(
            // language=postgresql
            r#"
            SELECT EXISTS (SELECT 1 FROM loans WHERE book_id = $1 AND returned IS NOT TRUE)
            "#,
        )
        .bind(book_id.as_ref())
        .fetch_one(con)
        .await?;
        Ok(exists)
    }

    async fn find_all(
        con: &mut PgConnection,
        filter: &LoanFilter,
        page: &PageRequest,
    ) -> Result<Page<Loan>, DriverError> {
        let isbn = filter.isbn().as_deref();
        let customer = filter.customer().as_deref();
        let rows = sqlx::query_as::<_, LoanRow>(
            // language=postgresql
            r#"
            SELECT l.id, l.book_id, l.customer, l.customer_email, l.loan_date, l.returned
            FROM loans l
                JOIN books b ON b.id = l.book_id
            WHERE ($1::text IS NULL AND $2::text IS NULL)
               OR ($1::text IS NOT NULL AND b.isbn = $1)
               OR ($2::text IS NOT NULL AND l.customer = $2)
            ORDER BY l.loan_date, l.id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(isbn)
        .bind(customer)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *con)
        .await?;
        let total = sqlx::query_scalar::<_, i64>(
            // language=postgresql
            r#"
            SELECT COUNT(*)
            FROM loans l
                JOIN books b ON b.id = l.book_id
            WHERE ($1::text IS NULL AND $2::text IS NULL)
               OR ($1::text IS NOT NULL AND b.isbn = $1)
               OR ($2::text IS NOT NULL AND l.customer = $2)
            "#,
        )
        .bind(isbn)
        .bind(customer)
        .fetch_one(&mut *con)
        .await?;
        let content = rows.into_iter().map(Loan::from).collect();
        Ok(Page::new(content, page.clone(), total))
    }

    async fn find_late(
        con: &mut PgConnection,
        cutoff: &LoanDate,
    ) -> Result<Vec<Loan>, DriverError> {
        let rows = sqlx::query_as::<_, LoanRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, customer, customer_email, loan_date, returned
            FROM loans
            WHERE loan_date < $1 AND returned IS NOT TRUE
            ORDER BY loan_date, id
            "#,
        )
        .bind(cutoff.as_ref())
        .fetch_all(con)
        .await?;
        Ok(rows.into_iter().map(Loan::from).collect())
    }

    async fn create(con: &mut PgConnection, loan: &Loan) -> Result<(), DriverError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO loans (id, book_id, customer, customer_email, loan_date, returned)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(loan.id().as_ref())
        .bind(loan.book_id().as_ref())
        .bind(loan.customer().as_ref())
        .bind(loan.customer_email().as_ref().map(|email| email.as_ref()))
        .bind(loan.loan_date().as_ref())
        .bind(loan.returned().as_ref())
        .execute(con)
        .await?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, loan: &Loan) -> Result<(), DriverError> {
        // Only the returned flag is mutable once a loan exists.
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE loans
            SET returned = $2
            WHERE id = $1
            "#,
        )
        .bind(loan.id().as_ref())
        .bind(loan.returned().as_ref())
        .execute(con)
        .await?;
        Ok(())
    }
}
