//! Repository layer for data access.
//!
//! `UserRepository` is the record store port; `UserStore` (PostgreSQL) and
//! `MemoryStore` implement it.

pub mod entities;
mod memory_store;
mod user_repository;

pub use memory_store::MemoryStore;
pub use user_repository::{StoreError, StoreResult, UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
