pub mod service;
pub mod transfer;

#[cfg(test)]
pub(crate) mod inmemory;
