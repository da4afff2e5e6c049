pub mod repository;
pub mod service;

pub use repository::{CustomerRepository, InMemoryCustomerRepository, SeaOrmCustomerRepository};
pub use service::CustomerService;
