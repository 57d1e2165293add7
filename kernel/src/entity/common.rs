mod page;
mod policy;

pub use self::{page::*, policy::*};
