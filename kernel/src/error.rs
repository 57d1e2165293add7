use std::fmt::Display;

use error_stack::Context;

#[derive(Debug)]
pub enum KernelError {
    Validation(String),
    NotFound(String),
    BusinessRule(String),
    Reference(String),
    Concurrency,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Validation(reason) => write!(f, "{reason}"),
            KernelError::NotFound(reason) => write!(f, "{reason}"),
            KernelError::BusinessRule(reason) => write!(f, "{reason}"),
            KernelError::Reference(reason) => write!(f, "{reason}"),
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
