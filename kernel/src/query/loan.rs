use vodca::References;

use crate::database::Transaction;
use crate::entity::{BookId, Loan, LoanDate, LoanId, Page, PageRequest};
use crate::KernelError;

/// Ledger search criteria. With both fields absent every loan matches;
/// otherwise a loan matches when its book's ISBN equals `isbn` or its
/// customer name equals `customer` (OR, the observed reference behavior).
#[derive(Debug, Clone, Default, Eq, PartialEq, References)]
pub struct LoanFilter {
    isbn: Option<String>,
    customer: Option<String>,
}

impl LoanFilter {
    pub fn new(isbn: Option<String>, customer: Option<String>) -> Self {
        Self { isbn, customer }
    }
}

#[async_trait::async_trait]
pub trait LoanQuery<Connection: Transaction>: Sync + Send + 'static {
    async fn find_by_id(
        &self,
        con: &mut Connection,
        id: &LoanId,
    ) -> error_stack::Result<Option<Loan>, KernelError>;

    /// Explicit replacement for a lazy book-to-loans relationship.
    async fn find_by_book_id(
        &self,
        con: &mut Connection,
        book_id: &BookId,
        page: &PageRequest,
    ) -> error_stack::Result<Page<Loan>, KernelError>;

    async fn exists_by_book_id(
        &self,
        con: &mut Connection,
        book_id: &BookId,
    ) -> error_stack::Result<bool, KernelError>;

    /// True iff a loan referencing the book is still outstanding. The
    /// single-active-loan invariant is built on this predicate; callers must
    /// evaluate it in the same transaction as the insert it guards.
    async fn exists_active_by_book_id(
        &self,
        con: &mut Connection,
        book_id: &BookId,
    ) -> error_stack::Result<bool, KernelError>;

    async fn find_all(
        &self,
        con: &mut Connection,
        filter: &LoanFilter,
        page: &PageRequest,
    ) -> error_stack::Result<Page<Loan>, KernelError>;

    /// Outstanding loans with `loan_date` strictly before `cutoff`.
    async fn find_late(
        &self,
        con: &mut Connection,
        cutoff: &LoanDate,
    ) -> error_stack::Result<Vec<Loan>, KernelError>;
}

pub trait DependOnLoanQuery<Connection: Transaction>: Sync + Send + 'static {
    type LoanQuery: LoanQuery<Connection>;
    fn loan_query(&self) -> &Self::LoanQuery;
}
