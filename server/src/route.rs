mod book;
mod loan;
mod page;

pub use self::{book::BookRouter, loan::LoanRouter};
