pub mod errors;
pub mod db;
pub mod beer;
pub mod customer;
