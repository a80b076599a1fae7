mod user_service;

pub use user_service::{
    BookHistory, SaveUser, UpdateUserName, UserLoanHistories, delete_user, get_user_loan_histories,
    get_users, save_user, update_user_name,
};
