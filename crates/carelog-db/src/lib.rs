//! Carelog Database Library
//!
//! sqlx/Postgres repositories for records and users. Each record is written
//! once by its owning request; no cross-record transactions are needed.

pub mod records;
pub mod users;

pub use records::{NewRecord, RecordRepository};
pub use users::UserRepository;
