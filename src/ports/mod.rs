pub mod book_repository;
pub mod errors;
pub mod user_loan_history_repository;
pub mod user_repository;

pub use book_repository::*;
pub use errors::{RepositoryError, Result};
pub use user_loan_history_repository::*;
pub use user_repository::*;
