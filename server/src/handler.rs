use std::ops::Deref;
use std::sync::Arc;

use driver::database::{
    PostgresBookRepository, PostgresDatabase, PostgresLoanRepository, PostgresTransaction,
};
use kernel::interface::database::QueryDatabaseConnection;
use kernel::interface::query::{DependOnBookQuery, DependOnLoanQuery};
use kernel::interface::update::{DependOnBookModifier, DependOnLoanModifier};
use kernel::prelude::entity::LoanPeriod;
use kernel::KernelError;
use vodca::References;

static LOAN_PERIOD_DAYS: &str = "LOAN_PERIOD_DAYS";

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init().await?)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

#[derive(References)]
pub struct Handler {
    pgpool: PostgresDatabase,
    book_repository: PostgresBookRepository,
    loan_repository: PostgresLoanRepository,
    loan_period: LoanPeriod,
}

impl Handler {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let pgpool = PostgresDatabase::new().await?;
        let loan_period = std::env::var(LOAN_PERIOD_DAYS)
            .ok()
            .and_then(|days| days.parse::<i64>().ok())
            .map(LoanPeriod::new)
            .unwrap_or_default();
        tracing::debug!("late loans cutoff period: {:?}", loan_period);

        Ok(Self {
            pgpool,
            book_repository: PostgresBookRepository,
            loan_repository: PostgresLoanRepository,
            loan_period,
        })
    }
}

#[async_trait::async_trait]
impl QueryDatabaseConnection<PostgresTransaction> for Handler {
    async fn transact(&self) -> error_stack::Result<PostgresTransaction, KernelError> {
        self.pgpool.transact().await
    }
}

impl DependOnBookQuery<PostgresTransaction> for Handler {
    type BookQuery = PostgresBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &self.book_repository
    }
}

impl DependOnBookModifier<PostgresTransaction> for Handler {
    type BookModifier = PostgresBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &self.book_repository
    }
}

impl DependOnLoanQuery<PostgresTransaction> for Handler {
    type LoanQuery = PostgresLoanRepository;
    fn loan_query(&self) -> &Self::LoanQuery {
        &self.loan_repository
    }
}

impl DependOnLoanModifier<PostgresTransaction> for Handler {
    type LoanModifier = PostgresLoanRepository;
    fn loan_modifier(&self) -> &Self::LoanModifier {
        &self.loan_repository
    }
}
