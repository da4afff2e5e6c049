pub mod beer_service;
pub mod customer_service;
