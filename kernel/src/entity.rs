mod book;
mod common;
mod loan;

pub use self::{book::*, common::*, loan::*};
