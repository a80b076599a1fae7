pub mod book;
pub mod errors;
pub mod loan_history;
pub mod user;
pub mod value_objects;

pub use book::Book;
pub use errors::*;
pub use loan_history::UserLoanHistory;
pub use user::{MAX_AGE, User};
pub use value_objects::*;
