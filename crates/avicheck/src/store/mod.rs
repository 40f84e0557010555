//! In-memory adapters for the form and account stores. Used by the HTTP
//! service, the CLI demo and the test suites.

mod memory;

pub use memory::{InMemoryFormRepository, InMemoryUserRepository};
