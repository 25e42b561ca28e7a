mod memory;
pub mod model;
mod orm;
mod repository;

#[rustfmt::skip]
pub use {
    memory::{MemoryRepo, SeedData},
    orm::{Database, OrmRepo},
};
