use crate::database::Transaction;
use crate::entity::Loan;
use crate::KernelError;

/// Loans are only ever inserted and flag-updated, never deleted.
#[async_trait::async_trait]
pub trait LoanModifier<Connection: Transaction>: 'static + Sync + Send {
    async fn create(
        &self,
        con: &mut Connection,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError>;

    async fn update(
        &self,
        con: &mut Connection,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnLoanModifier<Connection: Transaction>: 'static + Sync + Send {
    type LoanModifier: LoanModifier<Connection>;
    fn loan_modifier(&self) -> &Self::LoanModifier;
}
