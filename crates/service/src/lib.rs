//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod dto;
pub mod db;
pub mod beer;
pub mod customer;
pub mod csv;
pub mod bootstrap;
#[cfg(test)]
pub mod test_support;
