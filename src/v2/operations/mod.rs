//! v2 resource operations

pub mod token_operations;

pub use token_operations::TokenOperations;
