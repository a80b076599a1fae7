pub mod book_repository;
pub mod store;
pub mod user_loan_history_repository;
pub mod user_repository;

pub use book_repository::BookRepository;
pub use store::InMemoryStore;
pub use user_loan_history_repository::UserLoanHistoryRepository;
pub use user_repository::UserRepository;
