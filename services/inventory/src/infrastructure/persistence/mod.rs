//! Persistence implementations

mod memory;
mod migrations;
mod postgres;
mod rows;

pub use memory::InMemoryProductRepository;
pub use migrations::{migrations, run_migrations};
pub use postgres::PostgresProductRepository;
