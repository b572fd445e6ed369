//! Repository implementations using SQLite.

mod token_repository;

pub use token_repository::SqliteTokenRepository;
