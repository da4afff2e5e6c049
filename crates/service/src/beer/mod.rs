pub mod repository;
pub mod service;

pub use repository::{BeerRepository, InMemoryBeerRepository, SeaOrmBeerRepository};
pub use service::{BeerListQuery, BeerService};
