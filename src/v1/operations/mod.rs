//! v1 resource operations
//!
//! Each operation builds the resource URL, sends one request through the
//! shared executor and decodes the body. Error statuses come back as
//! [`crate::CraasError::Api`] with the classified [`crate::Outcome`] attached.

pub mod gc_operations;
pub mod registry_operations;
pub mod repository_operations;
pub mod token_operations;

pub use gc_operations::GcOperations;
pub use registry_operations::RegistryOperations;
pub use repository_operations::RepositoryOperations;
pub use token_operations::TokenOperations;

pub(crate) use crate::client::require;
